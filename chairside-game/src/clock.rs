//! The tick driver. One `tick` call is one simulated second; the caller
//! schedules calls at the real-time interval it wants.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BUSINESS_CLOSE_HOUR, BUSINESS_OPEN_HOUR, PERIOD_SECONDS, SUMMARY_AUTO_CLOSE_MS,
    TICK_INTERVAL_MS, TICK_SECONDS,
};
use crate::numbers::floor_f64_to_u32;
use crate::state::ClinicState;
use crate::{achievements, events, ledger, queue, treatment};

/// In-game clock hour for a point in simulated time. Each period maps
/// linearly onto the business day.
#[must_use]
pub fn hour_of(elapsed_secs: f64) -> f64 {
    let frac = (elapsed_secs % PERIOD_SECONDS) / PERIOD_SECONDS;
    BUSINESS_OPEN_HOUR + frac * (BUSINESS_CLOSE_HOUR - BUSINESS_OPEN_HOUR)
}

fn doors_open(elapsed_secs: f64) -> bool {
    let hour = hour_of(elapsed_secs);
    (BUSINESS_OPEN_HOUR..BUSINESS_CLOSE_HOUR).contains(&hour)
}

/// Drives the simulation and owns the summary auto-dismiss countdown.
/// The countdown tracks real time by counting driver invocations, one
/// tick interval each.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    summary_timer_ms: Option<u32>,
}

impl SimClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the simulation by one tick. Paused ticks still advance
    /// simulated time and handle period rollover; the activity steps are
    /// skipped until the pause clears.
    pub fn tick(&mut self, state: &mut ClinicState) {
        if !state.running || state.game_over || state.game_won {
            return;
        }
        state.elapsed_secs += TICK_SECONDS;

        let period_now = floor_f64_to_u32(state.elapsed_secs / PERIOD_SECONDS) + 1;
        if period_now != state.period_index {
            ledger::close_period(state, period_now);
            if state.show_summary {
                self.summary_timer_ms = Some(0);
            }
            state.check_win();
            return;
        }

        if state.paused {
            self.poll_summary(state);
            return;
        }

        if doors_open(state.elapsed_secs) {
            queue::spawn_walk_in(state);
        }
        treatment::assign_next(state);
        treatment::advance(state);
        queue::expire_impatient(state);
        events::maybe_fire(state);
        achievements::evaluate(state);
    }

    fn poll_summary(&mut self, state: &mut ClinicState) {
        if !state.show_summary {
            return;
        }
        let elapsed = self.summary_timer_ms.unwrap_or(0) + TICK_INTERVAL_MS;
        if elapsed >= SUMMARY_AUTO_CLOSE_MS {
            self.summary_timer_ms = None;
            state.dismiss_summary();
        } else {
            self.summary_timer_ms = Some(elapsed);
        }
    }

    /// Manual dismissal cancels the countdown so a stale timer can never
    /// re-fire after the popup is gone.
    pub fn dismiss_summary(&mut self, state: &mut ClinicState) {
        self.summary_timer_ms = None;
        state.dismiss_summary();
    }

    /// Drop any pending countdown. Used when the whole run is rebuilt.
    pub fn cancel_timers(&mut self) {
        self.summary_timer_ms = None;
    }
}
