//! Milestone achievements: a fixed catalog of threshold conditions, each
//! paying a one-time cash reward when first satisfied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::LOG_ACHIEVEMENT_PREFIX;
use crate::state::{ClinicState, LogKind};
use crate::upgrades::UpgradeId;

/// Threshold compared against current state. Conditions never reference
/// other achievements, so evaluation order does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    PatientsServed(u32),
    LifetimeRevenue(i64),
    Reputation(i32),
    UpgradeLevel(UpgradeId, u8),
}

#[derive(Debug, Clone, Copy)]
pub struct AchievementSpec {
    pub title: &'static str,
    pub reward: i64,
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    FirstPatient,
    FirstThousand,
    Expansion,
    ReputationBuilder,
    EfficiencyExpert,
    MarketingMaster,
}

impl AchievementId {
    pub const ALL: [Self; 6] = [
        Self::FirstPatient,
        Self::FirstThousand,
        Self::Expansion,
        Self::ReputationBuilder,
        Self::EfficiencyExpert,
        Self::MarketingMaster,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstPatient => "first-patient",
            Self::FirstThousand => "first-thousand",
            Self::Expansion => "expansion",
            Self::ReputationBuilder => "reputation-builder",
            Self::EfficiencyExpert => "efficiency-expert",
            Self::MarketingMaster => "marketing-master",
        }
    }

    #[must_use]
    pub const fn spec(self) -> AchievementSpec {
        match self {
            Self::FirstPatient => AchievementSpec {
                title: "First Patient",
                reward: 50,
                condition: Condition::PatientsServed(1),
            },
            Self::FirstThousand => AchievementSpec {
                title: "First Thousand",
                reward: 100,
                condition: Condition::LifetimeRevenue(1000),
            },
            Self::Expansion => AchievementSpec {
                title: "Expansion",
                reward: 200,
                condition: Condition::UpgradeLevel(UpgradeId::Chair, 2),
            },
            Self::ReputationBuilder => AchievementSpec {
                title: "Reputation Builder",
                reward: 300,
                condition: Condition::Reputation(50),
            },
            Self::EfficiencyExpert => AchievementSpec {
                title: "Efficiency Expert",
                reward: 250,
                condition: Condition::UpgradeLevel(UpgradeId::Assistant, 1),
            },
            Self::MarketingMaster => AchievementSpec {
                title: "Marketing Master",
                reward: 150,
                condition: Condition::UpgradeLevel(UpgradeId::Marketing, 1),
            },
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown achievement: {s}"))
    }
}

fn satisfied(condition: Condition, state: &ClinicState) -> bool {
    match condition {
        Condition::PatientsServed(n) => state.counters.patients_served >= n,
        Condition::LifetimeRevenue(n) => state.counters.lifetime_revenue >= n,
        Condition::Reputation(n) => state.meters.reputation >= n,
        Condition::UpgradeLevel(id, level) => state.upgrades.level(id) >= level,
    }
}

/// Scan the catalog against current state and credit anything newly
/// earned. Safe to call every tick; already-earned ids are skipped.
pub(crate) fn evaluate(state: &mut ClinicState) {
    for id in AchievementId::ALL {
        if state.completed_achievements.contains(&id) {
            continue;
        }
        let spec = id.spec();
        if !satisfied(spec.condition, state) {
            continue;
        }
        state.completed_achievements.insert(id);
        state.meters.cash += spec.reward;
        state.push_log_effects(
            LogKind::Achievement,
            format!("{LOG_ACHIEVEMENT_PREFIX}{id}"),
            spec.reward,
            0,
            0,
        );
    }
    state.check_win();
}
