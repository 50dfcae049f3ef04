#![allow(clippy::field_reassign_with_default)]

use std::cell::RefCell;
use std::convert::Infallible;

use chairside_game::{
    AchievementId, BuiltinEvents, CatalogSource, ClinicEngine, ClinicState, ClinicStorage,
    CommandError, EventData, UpgradeId,
};

struct OneShot(RefCell<Option<ClinicState>>);

impl ClinicStorage for OneShot {
    type Error = Infallible;

    fn save_run(&self, _name: &str, _state: &ClinicState) -> Result<(), Self::Error> {
        Ok(())
    }

    fn load_run(&self, _name: &str) -> Result<Option<ClinicState>, Self::Error> {
        Ok(self.0.borrow_mut().take())
    }

    fn delete_save(&self, _name: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Build an engine around a tweaked starting state by round-tripping it
/// through storage, the same path a resumed save takes.
fn engine_with(tweak: impl FnOnce(&mut ClinicState)) -> ClinicEngine {
    let mut state = ClinicState::default();
    tweak(&mut state);
    let storage = OneShot(RefCell::new(Some(state)));
    ClinicEngine::load_run(&storage, "fixture", EventData::builtin())
        .unwrap()
        .unwrap()
}

#[test]
fn builtin_source_is_infallible() {
    let deck = BuiltinEvents.load_events().unwrap();
    assert!(!deck.events.is_empty());
}

#[test]
fn unaffordable_chair_leaves_everything_unchanged() {
    let mut engine = engine_with(|s| s.meters.cash = 10);
    let err = engine.purchase_upgrade(UpgradeId::Chair).unwrap_err();
    assert_eq!(err, CommandError::InsufficientCash);
    let state = engine.state();
    assert_eq!(state.meters.cash, 10);
    assert_eq!(state.station_count, 1);
    assert_eq!(state.upgrades.chair, 1);
    assert_eq!(state.logs[0].key, "log.reject.cash");
}

#[test]
fn chair_purchase_adds_a_station_and_unlocks_expansion() {
    let mut engine = engine_with(|s| s.meters.cash = 2000);
    engine.purchase_upgrade(UpgradeId::Chair).unwrap();
    let state = engine.state();
    assert_eq!(state.station_count, 2);
    assert_eq!(state.upgrades.chair, 2);
    assert!(state
        .completed_achievements
        .contains(&AchievementId::Expansion));
    // 2000 - 800 chair + 200 expansion reward.
    assert_eq!(state.meters.cash, 1400);
}

#[test]
fn upgrades_cap_at_their_max_level() {
    let mut engine = engine_with(|s| s.meters.cash = 10_000);
    engine.purchase_upgrade(UpgradeId::Cleaning).unwrap();
    assert_eq!(
        engine.purchase_upgrade(UpgradeId::Cleaning),
        Err(CommandError::MaxLevelReached)
    );
    assert_eq!(engine.state().upgrades.cleaning, 1);
    assert_eq!(engine.state().logs[0].key, "log.reject.max-level");
}

#[test]
fn cleaning_upgrade_also_raises_cleanliness() {
    let mut engine = engine_with(|s| s.meters.cash = 1000);
    let before = engine.state().meters.cleanliness;
    engine.purchase_upgrade(UpgradeId::Cleaning).unwrap();
    assert_eq!(engine.state().meters.cleanliness, before + 10);
}

#[test]
fn staff_upgrades_grow_the_roster() {
    let mut engine = engine_with(|s| s.meters.cash = 5000);
    engine.purchase_upgrade(UpgradeId::Dentist).unwrap();
    engine.purchase_upgrade(UpgradeId::Assistant).unwrap();
    let state = engine.state();
    assert_eq!(state.primary_staff_count, 2);
    assert_eq!(state.support_staff_count, 1);
    assert!(state
        .completed_achievements
        .contains(&AchievementId::EfficiencyExpert));
}

#[test]
fn resolving_with_no_event_is_a_pure_rejection() {
    let mut engine = ClinicEngine::new(0, EventData::builtin());
    let cash = engine.state().meters.cash;
    assert_eq!(
        engine.resolve_event_choice("anything"),
        Err(CommandError::NoActiveEvent)
    );
    assert_eq!(engine.state().meters.cash, cash);
    assert_eq!(engine.state().logs[0].key, "log.reject.no-event");
}

#[test]
fn unknown_choice_id_keeps_the_event_open() {
    let mut engine = engine_with(|s| {
        s.active_event = EventData::builtin().find("chair-malfunction").cloned();
        s.paused = true;
    });
    assert_eq!(
        engine.resolve_event_choice("made-up"),
        Err(CommandError::UnknownChoice)
    );
    assert!(engine.state().active_event.is_some());
    assert!(engine.state().paused);
}

#[test]
fn event_choice_cost_is_checked_before_anything_changes() {
    let mut engine = engine_with(|s| {
        s.meters.cash = 100;
        s.active_event = EventData::builtin().find("lawsuit-threat").cloned();
        s.paused = true;
    });
    assert_eq!(
        engine.resolve_event_choice("settle"),
        Err(CommandError::InsufficientCash)
    );
    assert_eq!(engine.state().meters.cash, 100);
    assert!(engine.state().active_event.is_some());
}

#[test]
fn achievement_rewards_are_paid_once() {
    let mut engine = engine_with(|s| {
        s.meters.cash = 1000;
        s.meters.reputation = 60;
    });
    // The first command after the tweak runs the evaluator.
    engine.perform_cleaning().unwrap();
    let cash_after = engine.state().meters.cash;
    assert!(engine
        .state()
        .completed_achievements
        .contains(&AchievementId::ReputationBuilder));
    // 1000 - 30 cleaning + 300 reputation-builder reward.
    assert_eq!(cash_after, 1270);
    engine.perform_cleaning().unwrap();
    assert_eq!(engine.state().meters.cash, cash_after - 30);
}

#[test]
fn commands_are_refused_after_victory() {
    let mut engine = engine_with(|s| {
        s.game_won = true;
        s.running = false;
        s.meters.cash = 10_000;
    });
    assert_eq!(
        engine.purchase_upgrade(UpgradeId::Marketing),
        Err(CommandError::SimulationEnded)
    );
    assert_eq!(engine.perform_cleaning(), Err(CommandError::SimulationEnded));
    assert_eq!(engine.state().meters.cash, 10_000);
}

#[test]
fn dismissing_the_summary_resumes_the_clock() {
    let mut engine = engine_with(|s| {
        s.show_summary = true;
        s.paused = true;
    });
    engine.dismiss_period_summary();
    assert!(!engine.state().show_summary);
    assert!(!engine.state().paused);
}
