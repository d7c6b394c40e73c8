//! Game tuning: per-difficulty question counts, option counts and deadlines.

mod loader;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, SELECTABLE_OPERANDS};

pub use loader::{load_config, ConfigError};

const fn default_result_delay_ms() -> u64 {
    1200
}

/// How decoy options are placed relative to the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecoyStyle {
    /// Several steps away from the answer, easy to rule out.
    Loose,
    /// Off by a few, or the product of a neighbouring multiplier.
    Moderate,
    /// Off by one or two, or a neighbouring product on either factor.
    Close,
}

/// Settings for a single difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSettings {
    /// Questions per session (fewer if not enough combinations exist).
    pub question_count: usize,
    /// Options shown per question, correct answer included.
    pub option_count: usize,
    /// Time allowed per question in milliseconds.
    pub deadline_ms: u64,
    /// Distinct operands the player has to pick.
    pub min_operands: usize,
    pub decoys: DecoyStyle,
}

impl TierSettings {
    pub fn easy() -> Self {
        Self {
            question_count: 10,
            option_count: 3,
            deadline_ms: 10_000,
            min_operands: 2,
            decoys: DecoyStyle::Loose,
        }
    }

    pub fn medium() -> Self {
        Self {
            question_count: 15,
            option_count: 4,
            deadline_ms: 5_000,
            min_operands: 2,
            decoys: DecoyStyle::Moderate,
        }
    }

    pub fn hard() -> Self {
        Self {
            question_count: 20,
            option_count: 5,
            deadline_ms: 3_000,
            min_operands: 3,
            decoys: DecoyStyle::Close,
        }
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    fn check(&self) -> Result<(), &'static str> {
        if self.question_count == 0 {
            return Err("questionCount must be at least 1");
        }
        if self.option_count < 2 {
            return Err("optionCount must be at least 2");
        }
        if self.deadline_ms == 0 {
            return Err("deadlineMs must be at least 1");
        }
        if self.min_operands == 0 {
            return Err("minOperands must be at least 1");
        }
        if self.min_operands > SELECTABLE_OPERANDS.count() {
            return Err("minOperands must not exceed the 8 selectable numbers");
        }
        Ok(())
    }
}

/// One settings block per difficulty. Omitted tiers keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiers {
    #[serde(default = "TierSettings::easy")]
    pub easy: TierSettings,
    #[serde(default = "TierSettings::medium")]
    pub medium: TierSettings,
    #[serde(default = "TierSettings::hard")]
    pub hard: TierSettings,
}

impl Default for Tiers {
    fn default() -> Self {
        Self {
            easy: TierSettings::easy(),
            medium: TierSettings::medium(),
            hard: TierSettings::hard(),
        }
    }
}

/// Full game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// How long the answer feedback stays on screen before moving on.
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u64,

    #[serde(default)]
    pub tiers: Tiers,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            result_delay_ms: default_result_delay_ms(),
            tiers: Tiers::default(),
        }
    }
}

impl GameConfig {
    pub fn tier(&self, difficulty: Difficulty) -> &TierSettings {
        match difficulty {
            Difficulty::Easy => &self.tiers.easy,
            Difficulty::Medium => &self.tiers.medium,
            Difficulty::Hard => &self.tiers.hard,
        }
    }

    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }

    /// Checks every tier for values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            self.tier(difficulty)
                .check()
                .map_err(|reason| ConfigError::InvalidTier { difficulty, reason })?;
        }
        Ok(())
    }
}
