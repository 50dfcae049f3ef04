//! Centralized balance and tuning constants for Chairside game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "CHAIRSIDE_DEBUG_LOGS";
pub(crate) const LOG_WELCOME: &str = "log.welcome";
pub(crate) const LOG_TREATMENT_DONE: &str = "log.treatment.done";
pub(crate) const LOG_PATIENTS_LOST: &str = "log.patients.lost";
pub(crate) const LOG_PERIOD_CLOSED: &str = "log.period.closed";
pub(crate) const LOG_BANKRUPT: &str = "log.bankrupt";
pub(crate) const LOG_VICTORY: &str = "log.victory";
pub(crate) const LOG_UPGRADE_PREFIX: &str = "log.upgrade.";
pub(crate) const LOG_CLEANING_DONE: &str = "log.cleaning.done";
pub(crate) const LOG_EVENT_PREFIX: &str = "log.event.";
pub(crate) const LOG_EVENT_CHOICE_COST: &str = "log.event.choice-cost";
pub(crate) const LOG_ACHIEVEMENT_PREFIX: &str = "log.achievement.";
pub(crate) const LOG_REJECT_CASH: &str = "log.reject.cash";
pub(crate) const LOG_REJECT_MAX_LEVEL: &str = "log.reject.max-level";
pub(crate) const LOG_REJECT_NO_EVENT: &str = "log.reject.no-event";
pub(crate) const LOG_REJECT_UNKNOWN_CHOICE: &str = "log.reject.unknown-choice";
pub(crate) const LOG_REJECT_ENDED: &str = "log.reject.ended";

// Clock --------------------------------------------------------------------
pub(crate) const TICK_SECONDS: f64 = 1.0;
pub(crate) const TICK_INTERVAL_MS: u32 = 1_000;
pub(crate) const PERIOD_SECONDS: f64 = 20.0;
pub(crate) const TICKS_PER_PERIOD: f32 = 20.0;
pub(crate) const BUSINESS_OPEN_HOUR: f64 = 9.0;
pub(crate) const BUSINESS_CLOSE_HOUR: f64 = 17.0;
pub(crate) const SUMMARY_AUTO_CLOSE_MS: u32 = 5_000;

// Starting state -----------------------------------------------------------
pub(crate) const STARTING_CASH: i64 = 300;
pub(crate) const STARTING_REPUTATION: i32 = 0;
pub(crate) const STARTING_CLEANLINESS: i32 = 70;
pub(crate) const STARTING_ENERGY: i32 = 100;
pub(crate) const STARTING_STATIONS: u32 = 1;
pub(crate) const STARTING_PRIMARY_STAFF: u32 = 1;
pub(crate) const STARTING_SUPPORT_STAFF: u32 = 0;

// Meter bounds -------------------------------------------------------------
pub(crate) const REPUTATION_MIN: i32 = -50;
pub(crate) const REPUTATION_MAX: i32 = 100;
pub(crate) const METER_MIN: i32 = 0;
pub(crate) const METER_MAX: i32 = 100;

// Arrivals and patience ----------------------------------------------------
pub(crate) const BASE_ARRIVAL_RATE: f32 = 0.2;
pub(crate) const MARKETING_ARRIVAL_BONUS: f32 = 0.1;
pub(crate) const PATIENCE_DECAY_PER_TICK: f32 = 1.0;
pub(crate) const SUPPORT_PATIENCE_RELIEF: f32 = 0.05;
pub(crate) const CLEANING_PATIENCE_RELIEF: f32 = 0.10;
pub(crate) const PATIENCE_DECAY_FLOOR: f32 = 0.5;
pub(crate) const LOST_REPUTATION_PENALTY: i32 = 1;

// Treatment ----------------------------------------------------------------
pub(crate) const TREATMENT_PROGRESS_PER_TICK: f32 = 1.0;
pub(crate) const SUPPORT_SPEED_BONUS_PER_LEVEL: f32 = 0.2;
pub(crate) const SERVICE_REPUTATION_GAIN: i32 = 1;
pub(crate) const CLEANLINESS_LOSS_PER_SERVICE: i32 = 5;

// Fixed costs per period ---------------------------------------------------
pub(crate) const RENT_PER_PERIOD: i64 = 80;
pub(crate) const SALARY_PER_PRIMARY: i64 = 50;
pub(crate) const UTILITIES_PER_PERIOD: i64 = 20;

// Cleaning action ----------------------------------------------------------
pub(crate) const CLEANING_COST: i64 = 30;
pub(crate) const CLEANING_GAIN: i32 = 20;
pub(crate) const CLEANING_UPGRADE_BONUS: i32 = 10;

// Events -------------------------------------------------------------------
pub(crate) const EVENT_CHANCE_PER_PERIOD: f32 = 0.8;
pub(crate) const EVENT_CHANCE_PER_TICK: f32 = EVENT_CHANCE_PER_PERIOD / TICKS_PER_PERIOD;
pub(crate) const OUTCOME_WEIGHT_TOTAL: u32 = 100;

// Terminal conditions ------------------------------------------------------
pub(crate) const WIN_REVENUE_THRESHOLD: i64 = 100_000;

// Observability ------------------------------------------------------------
pub(crate) const ACTIVITY_LOG_CAP: usize = 8;
