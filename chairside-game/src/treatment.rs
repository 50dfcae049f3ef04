//! Chairside services: seating the next patient and advancing work in
//! progress until it pays out.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CLEANLINESS_LOSS_PER_SERVICE, LOG_TREATMENT_DONE, SERVICE_REPUTATION_GAIN,
    SUPPORT_SPEED_BONUS_PER_LEVEL, TREATMENT_PROGRESS_PER_TICK,
};
use crate::numbers::u32_to_f32;
use crate::patients::PatientKind;
use crate::state::{ClinicState, LogKind};

/// A patient currently occupying a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: u64,
    pub patient_id: u64,
    pub patient_name: String,
    pub kind: PatientKind,
    pub station: u32,
    pub total_secs: f32,
    pub remaining_secs: f32,
    pub revenue: i64,
}

impl Treatment {
    /// Completion in `[0, 1]` for display purposes.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        if self.total_secs <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining_secs / self.total_secs).clamp(0.0, 1.0)
    }
}

/// Seconds of service performed per tick. Support staff speed everything
/// up linearly.
fn progress_per_tick(state: &ClinicState) -> f32 {
    let support = u32_to_f32(state.support_staff_count);
    TREATMENT_PROGRESS_PER_TICK * (1.0 + SUPPORT_SPEED_BONUS_PER_LEVEL * support)
}

/// Seat at most one waiting patient into the lowest free station.
pub(crate) fn assign_next(state: &mut ClinicState) {
    let Some(station) = state.free_station() else {
        return;
    };
    let Some(patient) = state.waiting_queue.pop_front() else {
        return;
    };
    let id = state.allocate_id();
    state.active_services.push(Treatment {
        id,
        patient_id: patient.id,
        patient_name: patient.name,
        kind: patient.kind,
        station,
        total_secs: patient.service_secs,
        remaining_secs: patient.service_secs,
        revenue: patient.revenue,
    });
}

/// Advance every active service by one tick and settle completions.
pub(crate) fn advance(state: &mut ClinicState) {
    let step = progress_per_tick(state);
    for service in &mut state.active_services {
        service.remaining_secs -= step;
    }
    let mut settled: Vec<Treatment> = Vec::new();
    state.active_services.retain(|service| {
        if service.remaining_secs <= 0.0 {
            settled.push(service.clone());
            false
        } else {
            true
        }
    });
    for service in settled {
        complete(state, &service);
    }
}

fn complete(state: &mut ClinicState, service: &Treatment) {
    state.meters.cash += service.revenue;
    state.period_revenue += service.revenue;
    state.counters.lifetime_revenue += service.revenue;
    state.meters.reputation += SERVICE_REPUTATION_GAIN;
    state.meters.cleanliness -= CLEANLINESS_LOSS_PER_SERVICE;
    state.meters.clamp();
    state.counters.patients_served += 1;
    state.push_log_effects(
        LogKind::Treatment,
        LOG_TREATMENT_DONE,
        service.revenue,
        SERVICE_REPUTATION_GAIN,
        -CLEANLINESS_LOSS_PER_SERVICE,
    );
}
