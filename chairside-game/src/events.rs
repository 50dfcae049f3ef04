//! Random clinic events: firing them mid-tick and resolving the player's
//! choice into one weighted outcome.

use crate::commands::CommandError;
use crate::constants::{
    EVENT_CHANCE_PER_TICK, LOG_EVENT_CHOICE_COST, LOG_EVENT_PREFIX, LOG_REJECT_CASH,
    LOG_REJECT_NO_EVENT, LOG_REJECT_UNKNOWN_CHOICE,
};
use crate::data::{EventChoice, EventOutcome};
use crate::state::{ClinicState, LogKind};

/// Roll the per-tick event gate and, on a hit, pick one catalog event
/// uniformly and pause the clock on it. At most one event is outstanding.
pub(crate) fn maybe_fire(state: &mut ClinicState) {
    if state.active_event.is_some() {
        return;
    }
    let deck_len = state.data.as_ref().map_or(0, |d| d.events.len());
    if deck_len == 0 {
        return;
    }
    if !state.chance(EVENT_CHANCE_PER_TICK) {
        return;
    }
    let Some(idx) = state.draw_index(deck_len) else {
        return;
    };
    let Some(event) = state.data.as_ref().map(|d| d.events[idx].clone()) else {
        return;
    };
    let key = format!("{LOG_EVENT_PREFIX}{}", event.id);
    state.active_event = Some(event);
    state.sync_pause();
    state.push_log(LogKind::Event, key);
}

/// Cumulative-weight selection over a draw in `[0, 100)`. Declaration
/// order breaks ties: the first outcome with `draw < cumulative` wins.
fn select_outcome(choice: &EventChoice, draw: f32) -> &EventOutcome {
    let mut cumulative = 0u32;
    for outcome in &choice.outcomes {
        cumulative += outcome.weight;
        #[allow(clippy::cast_precision_loss)]
        if draw < cumulative as f32 {
            return outcome;
        }
    }
    // Weights sum to 100 and the draw is below 100, so this is the
    // rounding backstop only.
    choice
        .outcomes
        .last()
        .unwrap_or_else(|| unreachable!("choices carry at least one outcome"))
}

/// Resolve the outstanding event with the given choice id. Rejections
/// leave state untouched apart from a log entry.
pub(crate) fn resolve_choice(state: &mut ClinicState, choice_id: &str) -> Result<(), CommandError> {
    let Some(event) = state.active_event.clone() else {
        state.push_log(LogKind::Event, LOG_REJECT_NO_EVENT);
        return Err(CommandError::NoActiveEvent);
    };
    let Some(choice) = event.choice(choice_id) else {
        state.push_log(LogKind::Event, LOG_REJECT_UNKNOWN_CHOICE);
        return Err(CommandError::UnknownChoice);
    };
    if choice.cost > 0 && state.meters.cash < choice.cost {
        state.push_log(LogKind::Event, LOG_REJECT_CASH);
        return Err(CommandError::InsufficientCash);
    }
    if choice.cost > 0 {
        state.meters.cash -= choice.cost;
        state.period_event_expense += choice.cost;
        state.push_log_effects(LogKind::Event, LOG_EVENT_CHOICE_COST, -choice.cost, 0, 0);
    }

    let draw = state.draw_percent().unwrap_or(0.0);
    let outcome = select_outcome(choice, draw).clone();
    state.meters.cash += outcome.cash;
    state.meters.reputation += outcome.reputation;
    state.meters.cleanliness += outcome.cleanliness;
    state.meters.clamp();
    if outcome.cash >= 0 {
        state.period_event_income += outcome.cash;
    } else {
        state.period_event_expense += -outcome.cash;
    }
    let key = format!("{LOG_EVENT_PREFIX}{}.{}", event.id, choice.id);
    state.active_event = None;
    state.sync_pause();
    state.push_log_effects(
        LogKind::Event,
        key,
        outcome.cash,
        outcome.reputation,
        outcome.cleanliness,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EventData, OutcomeList};

    fn two_way_choice() -> EventChoice {
        let mut outcomes = OutcomeList::new();
        outcomes.push(EventOutcome {
            weight: 40,
            desc: "good".to_string(),
            cash: 100,
            reputation: 0,
            cleanliness: 0,
        });
        outcomes.push(EventOutcome {
            weight: 60,
            desc: "bad".to_string(),
            cash: -100,
            reputation: 0,
            cleanliness: 0,
        });
        EventChoice {
            id: "pick".to_string(),
            label: "Pick".to_string(),
            cost: 0,
            outcomes,
        }
    }

    #[test]
    fn draw_below_first_weight_selects_first() {
        let choice = two_way_choice();
        assert_eq!(select_outcome(&choice, 39.9).cash, 100);
        assert_eq!(select_outcome(&choice, 40.0).cash, -100);
        assert_eq!(select_outcome(&choice, 99.9).cash, -100);
        assert_eq!(select_outcome(&choice, 0.0).cash, 100);
    }

    #[test]
    fn resolving_without_event_is_rejected() {
        let mut state = ClinicState::default();
        let cash = state.meters.cash;
        let err = resolve_choice(&mut state, "anything").unwrap_err();
        assert_eq!(err, CommandError::NoActiveEvent);
        assert_eq!(state.meters.cash, cash);
        assert_eq!(state.logs[0].key, LOG_REJECT_NO_EVENT);
    }

    #[test]
    fn unaffordable_choice_leaves_event_outstanding() {
        let mut state = ClinicState::default();
        state.meters.cash = 100;
        let deck = EventData::builtin();
        let event = deck.find("health-inspection").cloned().unwrap();
        state.active_event = Some(event);
        state.sync_pause();
        let err = resolve_choice(&mut state, "emergency-clean").unwrap_err();
        assert_eq!(err, CommandError::InsufficientCash);
        assert!(state.active_event.is_some());
        assert!(state.paused);
        assert_eq!(state.meters.cash, 100);
    }

    #[test]
    fn resolution_applies_deltas_and_unpauses() {
        let mut state = ClinicState::default();
        state.meters.cash = 1000;
        let deck = EventData::builtin();
        let event = deck.find("supplier-discount").cloned().unwrap();
        state.active_event = Some(event);
        state.sync_pause();
        // No RNG attached, so the draw falls back to 0.0 and the first
        // declared outcome applies: pay 400, gain 200 and 1 reputation.
        resolve_choice(&mut state, "bulk-buy").unwrap();
        assert!(state.active_event.is_none());
        assert!(!state.paused);
        assert_eq!(state.meters.cash, 800);
        assert_eq!(state.meters.reputation, 1);
        assert_eq!(state.period_event_expense, 400);
        assert_eq!(state.period_event_income, 200);
    }

    #[test]
    fn rngless_state_never_fires_events() {
        let mut state = ClinicState::default();
        state.data = Some(EventData::builtin());
        for _ in 0..100 {
            maybe_fire(&mut state);
        }
        assert!(state.active_event.is_none());
    }
}
