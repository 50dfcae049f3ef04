//! Root simulation state. One value owns everything the clock mutates;
//! every component reads the previously committed value and writes the next.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::achievements::AchievementId;
use crate::constants::{
    ACTIVITY_LOG_CAP, LOG_VICTORY, LOG_WELCOME, METER_MAX, METER_MIN,
    REPUTATION_MAX, REPUTATION_MIN, STARTING_CASH, STARTING_CLEANLINESS, STARTING_ENERGY,
    STARTING_PRIMARY_STAFF, STARTING_REPUTATION, STARTING_STATIONS, STARTING_SUPPORT_STAFF,
    WIN_REVENUE_THRESHOLD,
};
use crate::data::{Event, EventData};
use crate::ledger::PeriodStatement;
use crate::patients::Patient;
use crate::treatment::Treatment;
use crate::upgrades::UpgradeLevels;

#[cfg(debug_assertions)]
pub(crate) fn debug_log_enabled() -> bool {
    matches!(std::env::var(crate::constants::DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
pub(crate) const fn debug_log_enabled() -> bool {
    false
}

/// Resource meters, clamped after every mutation that can push them out of
/// range. `cash` is only floored at period close, never mid-period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meters {
    pub cash: i64,
    pub reputation: i32,
    pub cleanliness: i32,
    pub energy: i32,
}

impl Default for Meters {
    fn default() -> Self {
        Self {
            cash: STARTING_CASH,
            reputation: STARTING_REPUTATION,
            cleanliness: STARTING_CLEANLINESS,
            energy: STARTING_ENERGY,
        }
    }
}

impl Meters {
    pub fn clamp(&mut self) {
        self.reputation = self.reputation.clamp(REPUTATION_MIN, REPUTATION_MAX);
        self.cleanliness = self.cleanliness.clamp(METER_MIN, METER_MAX);
        self.energy = self.energy.clamp(METER_MIN, METER_MAX);
    }
}

/// Lifetime statistics (never reset by period rollover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Counters {
    pub patients_served: u32,
    pub patients_lost: u32,
    pub lifetime_revenue: i64,
}

/// Category of an activity-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Treatment,
    Event,
    Upgrade,
    Cost,
    Achievement,
    System,
}

/// One bounded activity-log entry: a stable `log.*` key plus the meter
/// deltas that were applied. Pure observability; nothing reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub key: String,
    #[serde(default)]
    pub cash: i64,
    #[serde(default)]
    pub reputation: i32,
    #[serde(default)]
    pub cleanliness: i32,
}

/// The single root of simulation state, exclusively owned by the clock.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicState {
    pub seed: u64,
    pub meters: Meters,

    // Progress
    pub period_index: u32,
    pub elapsed_secs: f64,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub game_won: bool,

    // Capacity
    pub station_count: u32,
    pub primary_staff_count: u32,
    pub support_staff_count: u32,
    pub upgrades: UpgradeLevels,

    // Collections
    pub waiting_queue: VecDeque<Patient>,
    pub active_services: Vec<Treatment>,

    // Accounting
    pub ledger_history: Vec<PeriodStatement>,
    pub period_revenue: i64,
    pub period_expense: i64,
    pub period_event_income: i64,
    pub period_event_expense: i64,

    pub counters: Counters,
    pub completed_achievements: BTreeSet<AchievementId>,

    // Interaction
    pub active_event: Option<Event>,
    pub show_summary: bool,

    pub logs: VecDeque<LogEntry>,
    pub next_entity_id: u64,

    #[serde(skip)]
    pub rng: Option<ChaCha20Rng>,
    #[serde(skip)]
    pub data: Option<EventData>,
}

impl Default for ClinicState {
    fn default() -> Self {
        let mut logs = VecDeque::with_capacity(ACTIVITY_LOG_CAP);
        logs.push_front(LogEntry {
            kind: LogKind::System,
            key: LOG_WELCOME.to_string(),
            cash: 0,
            reputation: 0,
            cleanliness: 0,
        });
        Self {
            seed: 0,
            meters: Meters::default(),
            period_index: 1,
            elapsed_secs: 0.0,
            running: true,
            paused: false,
            game_over: false,
            game_won: false,
            station_count: STARTING_STATIONS,
            primary_staff_count: STARTING_PRIMARY_STAFF,
            support_staff_count: STARTING_SUPPORT_STAFF,
            upgrades: UpgradeLevels::default(),
            waiting_queue: VecDeque::new(),
            active_services: Vec::new(),
            ledger_history: Vec::new(),
            period_revenue: 0,
            period_expense: 0,
            period_event_income: 0,
            period_event_expense: 0,
            counters: Counters::default(),
            completed_achievements: BTreeSet::new(),
            active_event: None,
            show_summary: false,
            logs,
            next_entity_id: 1,
            rng: None,
            data: None,
        }
    }
}

impl ClinicState {
    fn seed_bytes(s: u64) -> [u8; 32] {
        #[inline]
        fn b(x: u64, shift: u8, xorv: u8) -> u8 {
            (((x >> shift) & 0xFF) as u8) ^ xorv
        }
        let mut bytes = [0u8; 32];
        let masks: [u8; 4] = [0x00, 0xA5, 0x3C, 0x96];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let shift = 56 - 8 * (i % 8) as u8;
            *byte = b(s, shift, masks[i / 8]);
        }
        bytes
    }

    /// Attach a seeded RNG and the event deck, producing the starting state
    /// for a reproducible run.
    #[must_use]
    pub fn with_seed(mut self, seed: u64, data: EventData) -> Self {
        self.seed = seed;
        self.rng = Some(ChaCha20Rng::from_seed(Self::seed_bytes(seed)));
        self.data = Some(data);
        self
    }

    /// Reattach skipped fields after deserialization.
    #[must_use]
    pub fn rehydrate(mut self, data: EventData) -> Self {
        self.rng = Some(ChaCha20Rng::from_seed(Self::seed_bytes(self.seed)));
        self.data = Some(data);
        self
    }

    /// Effective service capacity: stations are useless without a primary
    /// staff member to run them.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.station_count.min(self.primary_staff_count)
    }

    /// Lowest station id with no active service, if any.
    #[must_use]
    pub fn free_station(&self) -> Option<u32> {
        (0..self.capacity()).find(|id| !self.active_services.iter().any(|t| t.station == *id))
    }

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Roll a probability gate. Without an attached RNG no stochastic branch
    /// ever fires, which is how deterministic tests run.
    pub(crate) fn chance(&mut self, probability: f32) -> bool {
        self.rng
            .as_mut()
            .is_some_and(|rng| rng.random::<f32>() < probability)
    }

    /// Draw a uniform index into `0..len`, or `None` without an RNG.
    pub(crate) fn draw_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.rng.as_mut().map(|rng| rng.random_range(0..len))
    }

    /// A uniform draw in `[0, 100)` for outcome selection.
    pub(crate) fn draw_percent(&mut self) -> Option<f32> {
        self.rng.as_mut().map(|rng| rng.random::<f32>() * 100.0)
    }

    /// `paused` is derived: true while either pause cause is outstanding.
    pub(crate) fn sync_pause(&mut self) {
        self.paused = self.active_event.is_some() || self.show_summary;
    }

    pub(crate) fn dismiss_summary(&mut self) {
        self.show_summary = false;
        self.sync_pause();
    }

    /// Victory check, run after every tick and after every command that
    /// changed state. Idempotent once `game_won` is set.
    pub(crate) fn check_win(&mut self) {
        if self.game_won || self.game_over {
            return;
        }
        if self.counters.lifetime_revenue >= WIN_REVENUE_THRESHOLD {
            self.game_won = true;
            self.running = false;
            self.push_log(LogKind::System, LOG_VICTORY);
        }
    }

    pub(crate) fn push_log<K: Into<String>>(&mut self, kind: LogKind, key: K) {
        self.push_log_effects(kind, key, 0, 0, 0);
    }

    pub(crate) fn push_log_effects<K: Into<String>>(
        &mut self,
        kind: LogKind,
        key: K,
        cash: i64,
        reputation: i32,
        cleanliness: i32,
    ) {
        self.logs.push_front(LogEntry {
            kind,
            key: key.into(),
            cash,
            reputation,
            cleanliness,
        });
        self.logs.truncate(ACTIVITY_LOG_CAP);
        if debug_log_enabled() {
            if let Some(entry) = self.logs.front() {
                println!(
                    "[{:>6.1}s] {} (cash {:+}, rep {:+}, clean {:+})",
                    self.elapsed_secs, entry.key, entry.cash, entry.reputation, entry.cleanliness
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meters_clamp_to_documented_ranges() {
        let mut meters = Meters {
            cash: -10,
            reputation: 300,
            cleanliness: -4,
            energy: 140,
        };
        meters.clamp();
        assert_eq!(meters.reputation, 100);
        assert_eq!(meters.cleanliness, 0);
        assert_eq!(meters.energy, 100);
        // Cash is deliberately untouched mid-period.
        assert_eq!(meters.cash, -10);
    }

    #[test]
    fn capacity_is_bounded_by_staff() {
        let mut state = ClinicState::default();
        state.station_count = 4;
        state.primary_staff_count = 2;
        assert_eq!(state.capacity(), 2);
        assert_eq!(state.free_station(), Some(0));
    }

    #[test]
    fn free_station_skips_occupied_ids() {
        let mut state = ClinicState::default();
        state.station_count = 3;
        state.primary_staff_count = 3;
        state.active_services.push(Treatment {
            id: 1,
            patient_id: 1,
            patient_name: "Emma".to_string(),
            kind: crate::patients::PatientKind::Checkup,
            station: 0,
            total_secs: 3.0,
            remaining_secs: 3.0,
            revenue: 80,
        });
        assert_eq!(state.free_station(), Some(1));
    }

    #[test]
    fn log_ring_is_capped_most_recent_first() {
        let mut state = ClinicState::default();
        for i in 0..20 {
            state.push_log(LogKind::System, format!("log.test.{i}"));
        }
        assert_eq!(state.logs.len(), ACTIVITY_LOG_CAP);
        assert_eq!(state.logs[0].key, "log.test.19");
    }

    #[test]
    fn rngless_state_never_fires_chances() {
        let mut state = ClinicState::default();
        assert!(!state.chance(1.0));
        assert!(state.draw_index(5).is_none());
        assert!(state.draw_percent().is_none());
    }

    #[test]
    fn same_seed_yields_same_draw_sequence() {
        let mut a = ClinicState::default().with_seed(7, EventData::empty());
        let mut b = ClinicState::default().with_seed(7, EventData::empty());
        for _ in 0..16 {
            assert_eq!(a.draw_index(100), b.draw_index(100));
        }
    }

    #[test]
    fn win_check_fires_exactly_once() {
        let mut state = ClinicState::default();
        state.counters.lifetime_revenue = WIN_REVENUE_THRESHOLD;
        state.check_win();
        assert!(state.game_won);
        assert!(!state.running);
        let logs_after_first = state.logs.clone();
        state.check_win();
        assert_eq!(state.logs, logs_after_first);
    }
}
