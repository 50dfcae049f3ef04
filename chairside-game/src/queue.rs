//! Waiting-room behaviour: walk-in arrivals, patience decay, and walkouts.

use crate::constants::{
    BASE_ARRIVAL_RATE, CLEANING_PATIENCE_RELIEF, LOG_PATIENTS_LOST, LOST_REPUTATION_PENALTY,
    MARKETING_ARRIVAL_BONUS, PATIENCE_DECAY_FLOOR, PATIENCE_DECAY_PER_TICK,
    SUPPORT_PATIENCE_RELIEF,
};
use crate::numbers::u32_to_f32;
use crate::patients::{Patient, PatientKind, NAME_POOL};
use crate::state::{ClinicState, LogKind};
use crate::upgrades::UpgradeId;

/// Per-tick walk-in probability, scaled by marketing level.
fn arrival_chance(state: &ClinicState) -> f32 {
    BASE_ARRIVAL_RATE + MARKETING_ARRIVAL_BONUS * f32::from(state.upgrades.level(UpgradeId::Marketing))
}

/// Per-tick patience loss, relieved by support staff and the cleaning
/// upgrade, floored so patients always eventually walk out.
pub(crate) fn patience_decay(state: &ClinicState) -> f32 {
    let support = u32_to_f32(state.support_staff_count);
    let cleaning = f32::from(state.upgrades.level(UpgradeId::Cleaning));
    let relief = SUPPORT_PATIENCE_RELIEF * support + CLEANING_PATIENCE_RELIEF * cleaning;
    PATIENCE_DECAY_PER_TICK * (1.0 - relief).max(PATIENCE_DECAY_FLOOR)
}

/// At most one walk-in per tick. Both draws come from the shared RNG in a
/// fixed order so runs replay exactly from the seed.
pub(crate) fn spawn_walk_in(state: &mut ClinicState) {
    if !state.chance(arrival_chance(state)) {
        return;
    }
    let Some(kind_idx) = state.draw_index(PatientKind::ALL.len()) else {
        return;
    };
    let Some(name_idx) = state.draw_index(NAME_POOL.len()) else {
        return;
    };
    let kind = PatientKind::ALL[kind_idx];
    let name = NAME_POOL[name_idx].to_string();
    let id = state.allocate_id();
    let patient = Patient::new(id, name, kind, state.elapsed_secs);
    state.waiting_queue.push_back(patient);
}

/// Decay everyone's patience and remove walkouts. Each walkout costs one
/// reputation point and is counted as lost.
pub(crate) fn expire_impatient(state: &mut ClinicState) {
    let decay = patience_decay(state);
    for patient in &mut state.waiting_queue {
        patient.patience_remaining -= decay;
    }
    let before = state.waiting_queue.len();
    state.waiting_queue.retain(|p| p.patience_remaining > 0.0);
    let lost = before - state.waiting_queue.len();
    if lost == 0 {
        return;
    }
    #[allow(clippy::cast_possible_truncation)]
    let lost = lost as u32;
    state.counters.patients_lost += lost;
    #[allow(clippy::cast_possible_wrap)]
    let penalty = LOST_REPUTATION_PENALTY * lost as i32;
    state.meters.reputation -= penalty;
    state.meters.clamp();
    state.push_log_effects(LogKind::System, LOG_PATIENTS_LOST, 0, -penalty, 0);
}
