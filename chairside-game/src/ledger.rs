//! Period accounting: running accumulators, the rollover charge, and the
//! statement history shown in the summary popup.

use serde::{Deserialize, Serialize};

use crate::constants::{
    LOG_BANKRUPT, LOG_PERIOD_CLOSED, RENT_PER_PERIOD, SALARY_PER_PRIMARY, UTILITIES_PER_PERIOD,
};
use crate::state::{ClinicState, LogKind};

/// Itemized lines behind one statement. Income is positive, expense
/// lines are stored as positive magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatementBreakdown {
    pub service_revenue: i64,
    pub event_income: i64,
    pub rent: i64,
    pub salaries: i64,
    pub utilities: i64,
    pub misc_expense: i64,
    pub event_expense: i64,
}

/// One closed period's profit and loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatement {
    pub period: u32,
    pub revenue: i64,
    pub expenses: i64,
    pub net: i64,
    pub breakdown: StatementBreakdown,
}

/// Fixed operating cost charged at every rollover.
#[must_use]
pub(crate) fn fixed_costs(state: &ClinicState) -> i64 {
    RENT_PER_PERIOD + SALARY_PER_PRIMARY * i64::from(state.primary_staff_count) + UTILITIES_PER_PERIOD
}

fn build_statement(state: &ClinicState, charged: i64) -> PeriodStatement {
    let salaries = SALARY_PER_PRIMARY * i64::from(state.primary_staff_count);
    let revenue = state.period_revenue + state.period_event_income;
    let expenses = state.period_expense + state.period_event_expense + charged;
    PeriodStatement {
        period: state.period_index,
        revenue,
        expenses,
        net: revenue - expenses,
        breakdown: StatementBreakdown {
            service_revenue: state.period_revenue,
            event_income: state.period_event_income,
            rent: RENT_PER_PERIOD,
            salaries,
            utilities: UTILITIES_PER_PERIOD,
            misc_expense: state.period_expense,
            event_expense: state.period_event_expense,
        },
    }
}

/// Close the current period: charge fixed costs, append the statement,
/// reset the accumulators, and either open the summary or end the run.
pub(crate) fn close_period(state: &mut ClinicState, new_period: u32) {
    let charge = fixed_costs(state);
    let cash_before = state.meters.cash;
    state.meters.cash = (state.meters.cash - charge).max(0);
    let statement = build_statement(state, charge);
    state.ledger_history.push(statement);

    state.period_revenue = 0;
    state.period_expense = 0;
    state.period_event_income = 0;
    state.period_event_expense = 0;
    state.period_index = new_period;

    if cash_before > 0 && state.meters.cash == 0 {
        state.game_over = true;
        state.running = false;
        state.push_log_effects(LogKind::Cost, LOG_BANKRUPT, -charge, 0, 0);
        return;
    }
    state.show_summary = true;
    state.sync_pause();
    state.push_log_effects(LogKind::Cost, LOG_PERIOD_CLOSED, -charge, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_costs_scale_with_primary_staff() {
        let mut state = ClinicState::default();
        assert_eq!(fixed_costs(&state), 150);
        state.primary_staff_count = 3;
        assert_eq!(fixed_costs(&state), 250);
    }

    #[test]
    fn rollover_charges_and_opens_summary() {
        let mut state = ClinicState::default();
        state.meters.cash = 1000;
        state.period_revenue = 400;
        close_period(&mut state, 2);
        assert_eq!(state.meters.cash, 850);
        assert_eq!(state.period_index, 2);
        assert!(state.show_summary);
        assert!(state.paused);
        assert!(!state.game_over);
        assert_eq!(state.period_revenue, 0);
        let statement = state.ledger_history[0];
        assert_eq!(statement.period, 1);
        assert_eq!(statement.revenue, 400);
        assert_eq!(statement.expenses, 150);
        assert_eq!(statement.net, 250);
        assert_eq!(statement.breakdown.rent, 80);
        assert_eq!(statement.breakdown.salaries, 50);
        assert_eq!(statement.breakdown.utilities, 20);
    }

    #[test]
    fn charge_through_zero_is_bankruptcy() {
        let mut state = ClinicState::default();
        state.meters.cash = 50;
        close_period(&mut state, 2);
        assert_eq!(state.meters.cash, 0);
        assert!(state.game_over);
        assert!(!state.running);
        assert!(!state.show_summary);
        assert_eq!(state.logs[0].key, LOG_BANKRUPT);
    }

    #[test]
    fn already_broke_clinic_limps_on() {
        let mut state = ClinicState::default();
        state.meters.cash = 0;
        close_period(&mut state, 2);
        assert_eq!(state.meters.cash, 0);
        assert!(!state.game_over);
        assert!(state.show_summary);
    }
}
