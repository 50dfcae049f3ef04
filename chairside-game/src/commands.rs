//! Player commands. Every command either applies atomically or rejects
//! with an error and a log entry, leaving state untouched.

use thiserror::Error;

use crate::achievements;
use crate::constants::{
    CLEANING_COST, CLEANING_GAIN, LOG_CLEANING_DONE, LOG_REJECT_CASH, LOG_REJECT_ENDED,
};
use crate::events;
use crate::state::{ClinicState, LogKind};
use crate::upgrades::{self, UpgradeId};

/// Why a command was rejected. None of these are fatal to the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("not enough cash")]
    InsufficientCash,
    #[error("upgrade already at maximum level")]
    MaxLevelReached,
    #[error("no event is awaiting a choice")]
    NoActiveEvent,
    #[error("unknown choice id")]
    UnknownChoice,
    #[error("the run has already ended")]
    SimulationEnded,
}

fn ensure_active(state: &mut ClinicState) -> Result<(), CommandError> {
    if state.game_over || state.game_won {
        state.push_log(LogKind::System, LOG_REJECT_ENDED);
        return Err(CommandError::SimulationEnded);
    }
    Ok(())
}

pub(crate) fn purchase_upgrade(state: &mut ClinicState, id: UpgradeId) -> Result<(), CommandError> {
    ensure_active(state)?;
    upgrades::purchase(state, id)?;
    achievements::evaluate(state);
    Ok(())
}

/// Pay for a deep clean of the waiting room. Booked as a misc expense on
/// the current period.
pub(crate) fn perform_cleaning(state: &mut ClinicState) -> Result<(), CommandError> {
    ensure_active(state)?;
    if state.meters.cash < CLEANING_COST {
        state.push_log(LogKind::System, LOG_REJECT_CASH);
        return Err(CommandError::InsufficientCash);
    }
    state.meters.cash -= CLEANING_COST;
    state.period_expense += CLEANING_COST;
    state.meters.cleanliness += CLEANING_GAIN;
    state.meters.clamp();
    state.push_log_effects(LogKind::Cost, LOG_CLEANING_DONE, -CLEANING_COST, 0, CLEANING_GAIN);
    achievements::evaluate(state);
    Ok(())
}

pub(crate) fn resolve_event_choice(
    state: &mut ClinicState,
    choice_id: &str,
) -> Result<(), CommandError> {
    ensure_active(state)?;
    events::resolve_choice(state, choice_id)?;
    achievements::evaluate(state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaning_trades_cash_for_cleanliness() {
        let mut state = ClinicState::default();
        state.meters.cleanliness = 40;
        perform_cleaning(&mut state).unwrap();
        assert_eq!(state.meters.cash, 270);
        assert_eq!(state.meters.cleanliness, 60);
        assert_eq!(state.period_expense, 30);
        assert_eq!(state.logs[0].key, LOG_CLEANING_DONE);
    }

    #[test]
    fn cleaning_gain_clamps_at_full() {
        let mut state = ClinicState::default();
        state.meters.cleanliness = 95;
        perform_cleaning(&mut state).unwrap();
        assert_eq!(state.meters.cleanliness, 100);
    }

    #[test]
    fn cleaning_rejected_without_cash() {
        let mut state = ClinicState::default();
        state.meters.cash = 29;
        let before = state.clone();
        let err = perform_cleaning(&mut state).unwrap_err();
        assert_eq!(err, CommandError::InsufficientCash);
        assert_eq!(state.meters, before.meters);
        assert_eq!(state.logs[0].key, LOG_REJECT_CASH);
    }

    #[test]
    fn commands_rejected_after_game_over() {
        let mut state = ClinicState::default();
        state.game_over = true;
        assert_eq!(
            purchase_upgrade(&mut state, UpgradeId::Chair),
            Err(CommandError::SimulationEnded)
        );
        assert_eq!(perform_cleaning(&mut state), Err(CommandError::SimulationEnded));
        assert_eq!(
            resolve_event_choice(&mut state, "any"),
            Err(CommandError::SimulationEnded)
        );
    }

    #[test]
    fn upgrade_purchase_can_unlock_achievements() {
        let mut state = ClinicState::default();
        state.meters.cash = 1000;
        purchase_upgrade(&mut state, UpgradeId::Marketing).unwrap();
        assert!(state
            .completed_achievements
            .contains(&crate::achievements::AchievementId::MarketingMaster));
        // 1000 - 500 cost + 150 reward.
        assert_eq!(state.meters.cash, 650);
    }
}
