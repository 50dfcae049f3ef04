//! Upgrade catalog and purchase handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::commands::CommandError;
use crate::constants::{
    CLEANING_UPGRADE_BONUS, LOG_REJECT_CASH, LOG_REJECT_MAX_LEVEL, LOG_UPGRADE_PREFIX,
};
use crate::state::{ClinicState, LogKind};

/// Closed set of purchasable upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeId {
    Chair,
    Dentist,
    Assistant,
    Marketing,
    Cleaning,
}

/// Static attributes of one upgrade line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSpec {
    pub title: &'static str,
    pub base_cost: i64,
    pub max_level: u8,
}

impl UpgradeId {
    pub const ALL: [Self; 5] = [
        Self::Chair,
        Self::Dentist,
        Self::Assistant,
        Self::Marketing,
        Self::Cleaning,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chair => "chair",
            Self::Dentist => "dentist",
            Self::Assistant => "assistant",
            Self::Marketing => "marketing",
            Self::Cleaning => "cleaning",
        }
    }

    #[must_use]
    pub const fn spec(self) -> UpgradeSpec {
        match self {
            Self::Chair => UpgradeSpec {
                title: "Extra Chair",
                base_cost: 800,
                max_level: 5,
            },
            Self::Dentist => UpgradeSpec {
                title: "Extra Dentist",
                base_cost: 1_200,
                max_level: 4,
            },
            Self::Assistant => UpgradeSpec {
                title: "Dental Assistant",
                base_cost: 600,
                max_level: 3,
            },
            Self::Marketing => UpgradeSpec {
                title: "Marketing Campaign",
                base_cost: 500,
                max_level: 5,
            },
            Self::Cleaning => UpgradeSpec {
                title: "Professional Cleaning",
                base_cost: 400,
                max_level: 1,
            },
        }
    }

    /// Price of moving to `next_level`. All shipped upgrades price flat.
    #[must_use]
    pub const fn cost_for(self, _next_level: u8) -> i64 {
        self.spec().base_cost
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chair" => Ok(Self::Chair),
            "dentist" => Ok(Self::Dentist),
            "assistant" => Ok(Self::Assistant),
            "marketing" => Ok(Self::Marketing),
            "cleaning" => Ok(Self::Cleaning),
            _ => Err(()),
        }
    }
}

/// Current level per upgrade line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub chair: u8,
    pub dentist: u8,
    pub assistant: u8,
    pub marketing: u8,
    pub cleaning: u8,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        // The starting clinic already owns one chair and one dentist.
        Self {
            chair: 1,
            dentist: 1,
            assistant: 0,
            marketing: 0,
            cleaning: 0,
        }
    }
}

impl UpgradeLevels {
    #[must_use]
    pub const fn level(&self, id: UpgradeId) -> u8 {
        match id {
            UpgradeId::Chair => self.chair,
            UpgradeId::Dentist => self.dentist,
            UpgradeId::Assistant => self.assistant,
            UpgradeId::Marketing => self.marketing,
            UpgradeId::Cleaning => self.cleaning,
        }
    }

    pub(crate) fn bump(&mut self, id: UpgradeId) {
        match id {
            UpgradeId::Chair => self.chair = self.chair.saturating_add(1),
            UpgradeId::Dentist => self.dentist = self.dentist.saturating_add(1),
            UpgradeId::Assistant => self.assistant = self.assistant.saturating_add(1),
            UpgradeId::Marketing => self.marketing = self.marketing.saturating_add(1),
            UpgradeId::Cleaning => self.cleaning = self.cleaning.saturating_add(1),
        }
    }
}

/// Attempt to purchase the next level of `id`. Rejections leave the state
/// unchanged apart from a log entry.
pub(crate) fn purchase(state: &mut ClinicState, id: UpgradeId) -> Result<(), CommandError> {
    let spec = id.spec();
    let current = state.upgrades.level(id);
    if current >= spec.max_level {
        state.push_log(LogKind::System, LOG_REJECT_MAX_LEVEL);
        return Err(CommandError::MaxLevelReached);
    }
    let next = current.saturating_add(1);
    let cost = id.cost_for(next);
    if state.meters.cash < cost {
        state.push_log(LogKind::System, LOG_REJECT_CASH);
        return Err(CommandError::InsufficientCash);
    }

    state.meters.cash -= cost;
    state.upgrades.bump(id);
    match id {
        UpgradeId::Chair => state.station_count += 1,
        UpgradeId::Dentist => state.primary_staff_count += 1,
        UpgradeId::Assistant => state.support_staff_count += 1,
        // The arrival-rate bonus is read from the level at spawn time.
        UpgradeId::Marketing => {}
        UpgradeId::Cleaning => {
            state.meters.cleanliness += CLEANING_UPGRADE_BONUS;
            state.meters.clamp();
        }
    }
    state.push_log_effects(
        LogKind::Upgrade,
        format!("{LOG_UPGRADE_PREFIX}{id}"),
        -cost,
        0,
        0,
    );
    Ok(())
}
