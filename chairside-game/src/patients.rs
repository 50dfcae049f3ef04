//! Patient archetypes and the waiting-room customer record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of patient archetypes. Every archetype key the simulation can
/// ever see is a variant here, so an unknown key is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientKind {
    Checkup,
    Scaling,
    Filling,
    Whitening,
    Braces,
}

/// Static attributes of one patient archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientSpec {
    pub title: &'static str,
    /// Treatment duration in simulated seconds.
    pub service_secs: f32,
    /// Revenue collected when the treatment completes.
    pub revenue: i64,
    /// Waiting-room tolerance in simulated seconds.
    pub patience: f32,
    /// Cleanliness wear attributed to this archetype.
    pub wear_cost: i32,
}

impl PatientKind {
    pub const ALL: [Self; 5] = [
        Self::Checkup,
        Self::Scaling,
        Self::Filling,
        Self::Whitening,
        Self::Braces,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkup => "checkup",
            Self::Scaling => "scaling",
            Self::Filling => "filling",
            Self::Whitening => "whitening",
            Self::Braces => "braces",
        }
    }

    #[must_use]
    pub const fn spec(self) -> PatientSpec {
        match self {
            Self::Checkup => PatientSpec {
                title: "Checkup",
                service_secs: 3.0,
                revenue: 80,
                patience: 8.0,
                wear_cost: 3,
            },
            Self::Scaling => PatientSpec {
                title: "Scaling",
                service_secs: 4.0,
                revenue: 150,
                patience: 10.0,
                wear_cost: 5,
            },
            Self::Filling => PatientSpec {
                title: "Filling",
                service_secs: 5.0,
                revenue: 220,
                patience: 12.0,
                wear_cost: 7,
            },
            Self::Whitening => PatientSpec {
                title: "Whitening",
                service_secs: 6.0,
                revenue: 300,
                patience: 14.0,
                wear_cost: 8,
            },
            Self::Braces => PatientSpec {
                title: "Braces Consult",
                service_secs: 4.0,
                revenue: 180,
                patience: 10.0,
                wear_cost: 4,
            },
        }
    }
}

impl fmt::Display for PatientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkup" => Ok(Self::Checkup),
            "scaling" => Ok(Self::Scaling),
            "filling" => Ok(Self::Filling),
            "whitening" => Ok(Self::Whitening),
            "braces" => Ok(Self::Braces),
            _ => Err(()),
        }
    }
}

/// Display-name pool for arriving patients.
pub const NAME_POOL: [&str; 24] = [
    "Emma", "Liam", "Olivia", "Noah", "Ava", "William", "Sophia", "James", "Isabella", "Benjamin",
    "Charlotte", "Lucas", "Amelia", "Henry", "Mia", "Alexander", "Harper", "Mason", "Evelyn",
    "Michael", "Abigail", "Ethan", "Emily", "Daniel",
];

/// A customer waiting for a free station. Created on arrival and destroyed
/// either by assignment (converted into a [`crate::Treatment`]) or by
/// patience exhaustion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    pub kind: PatientKind,
    /// Simulated-time arrival stamp.
    pub arrived_at: f64,
    pub patience_remaining: f32,
    pub patience_max: f32,
    pub revenue: i64,
    pub service_secs: f32,
    pub wear_cost: i32,
}

impl Patient {
    #[must_use]
    pub fn new(id: u64, name: String, kind: PatientKind, arrived_at: f64) -> Self {
        let spec = kind.spec();
        Self {
            id,
            name,
            kind,
            arrived_at,
            patience_remaining: spec.patience,
            patience_max: spec.patience,
            revenue: spec.revenue,
            service_secs: spec.service_secs,
            wear_cost: spec.wear_cost,
        }
    }

    /// Fraction of patience left, for presentation layers.
    #[must_use]
    pub fn patience_fraction(&self) -> f32 {
        if self.patience_max <= 0.0 {
            return 0.0;
        }
        (self.patience_remaining / self.patience_max).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_keys_roundtrip() {
        for kind in PatientKind::ALL {
            assert_eq!(kind.as_str().parse::<PatientKind>(), Ok(kind));
        }
        assert!("veneer".parse::<PatientKind>().is_err());
    }

    #[test]
    fn patient_starts_with_full_patience() {
        let patient = Patient::new(1, "Emma".to_string(), PatientKind::Whitening, 4.0);
        assert!((patient.patience_remaining - 14.0).abs() < f32::EPSILON);
        assert!((patient.patience_fraction() - 1.0).abs() < f32::EPSILON);
        assert_eq!(patient.revenue, 300);
    }
}
