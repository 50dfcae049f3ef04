//! Chairside Game Engine
//!
//! Platform-agnostic core game logic for the Chairside dental-clinic tycoon
//! game. This crate provides all simulation mechanics without UI or
//! platform-specific dependencies; a presentation layer drives it by
//! calling [`SimClock::tick`] on a fixed interval and issuing commands.

pub mod achievements;
pub mod clock;
pub mod commands;
pub mod constants;
pub mod data;
pub mod events;
pub mod ledger;
pub mod numbers;
pub mod patients;
pub mod queue;
pub mod state;
pub mod treatment;
pub mod upgrades;

// Re-export commonly used types
pub use achievements::{AchievementId, AchievementSpec, Condition};
pub use clock::{SimClock, hour_of};
pub use commands::CommandError;
pub use data::{Event, EventChoice, EventData, EventKind, EventOutcome, OutcomeList};
pub use ledger::{PeriodStatement, StatementBreakdown};
pub use patients::{Patient, PatientKind, PatientSpec};
pub use state::{ClinicState, Counters, LogEntry, LogKind, Meters};
pub use treatment::Treatment;
pub use upgrades::{UpgradeId, UpgradeLevels, UpgradeSpec};

/// Trait for abstracting event-catalog loading
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the event deck from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_events(&self) -> Result<EventData, Self::Error>;
}

/// The compiled-in event deck. Loading it cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEvents;

impl CatalogSource for BuiltinEvents {
    type Error = std::convert::Infallible;

    fn load_events(&self) -> Result<EventData, Self::Error> {
        Ok(EventData::builtin())
    }
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait ClinicStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a run
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    fn save_run(&self, save_name: &str, state: &ClinicState) -> Result<(), Self::Error>;

    /// Load a run
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    fn load_run(&self, save_name: &str) -> Result<Option<ClinicState>, Self::Error>;

    /// Delete a saved run
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// One complete run: the state, the clock driving it, and the catalog it
/// was built from (kept so a reset replays identically).
pub struct ClinicEngine {
    state: ClinicState,
    clock: SimClock,
    catalog: EventData,
}

impl ClinicEngine {
    /// Start a fresh run from a seed and an event deck.
    #[must_use]
    pub fn new(seed: u64, catalog: EventData) -> Self {
        Self {
            state: ClinicState::default().with_seed(seed, catalog.clone()),
            clock: SimClock::new(),
            catalog,
        }
    }

    /// Start a fresh run, loading the deck from a catalog source.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn from_source<C: CatalogSource>(seed: u64, source: &C) -> Result<Self, C::Error> {
        Ok(Self::new(seed, source.load_events()?))
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        self.clock.tick(&mut self.state);
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> &ClinicState {
        &self.state
    }

    /// Buy the next level of an upgrade.
    ///
    /// # Errors
    ///
    /// Returns an error if the run has ended, the upgrade is at its
    /// maximum level, or cash is insufficient.
    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> Result<(), CommandError> {
        commands::purchase_upgrade(&mut self.state, id)
    }

    /// Pay for a deep clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the run has ended or cash is insufficient.
    pub fn perform_cleaning(&mut self) -> Result<(), CommandError> {
        commands::perform_cleaning(&mut self.state)
    }

    /// Answer the outstanding event with a choice id.
    ///
    /// # Errors
    ///
    /// Returns an error if the run has ended, no event is outstanding,
    /// the choice id is unknown, or the choice is unaffordable.
    pub fn resolve_event_choice(&mut self, choice_id: &str) -> Result<(), CommandError> {
        commands::resolve_event_choice(&mut self.state, choice_id)
    }

    /// Close the period-summary popup and cancel its auto-dismiss timer.
    pub fn dismiss_period_summary(&mut self) {
        self.clock.dismiss_summary(&mut self.state);
    }

    /// Discard the run, pending timers included, and rebuild the starting
    /// state from the same seed and catalog.
    pub fn reset(&mut self) {
        let seed = self.state.seed;
        self.clock.cancel_timers();
        self.clock = SimClock::new();
        self.state = ClinicState::default().with_seed(seed, self.catalog.clone());
    }

    /// Save the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn save_run<S: ClinicStorage>(&self, storage: &S, save_name: &str) -> Result<(), S::Error> {
        storage.save_run(save_name, &self.state)
    }

    /// Load a saved run, rehydrating the RNG and catalog that serde skips.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be loaded.
    pub fn load_run<S: ClinicStorage>(
        storage: &S,
        save_name: &str,
        catalog: EventData,
    ) -> Result<Option<Self>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        if let Some(state) = storage.load_run(save_name).map_err(Into::into)? {
            let state = state.rehydrate(catalog.clone());
            Ok(Some(Self {
                state,
                clock: SimClock::new(),
                catalog,
            }))
        } else {
            Ok(None)
        }
    }
}
