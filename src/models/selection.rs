use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::data::GameConfig;

use super::Difficulty;

/// Largest operand accepted for a session.
pub const MAX_OPERAND: u32 = 99;

/// Numbers offered on the start screen.
pub const SELECTABLE_OPERANDS: RangeInclusive<u32> = 2..=9;

/// Reasons a difficulty/operand choice cannot start a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Pick at least {required} numbers to multiply ({selected} selected)")]
    TooFewOperands { required: usize, selected: usize },

    #[error("Numbers must be between 1 and 99 (got {0})")]
    InvalidOperand(u32),

    #[error("Difficulty must be 1, 2 or 3 (got {0})")]
    UnknownDifficulty(u8),
}

/// A validated difficulty and operand set, ready to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    difficulty: Difficulty,
    operands: BTreeSet<u32>,
}

impl Selection {
    /// Validates the operand set against the tier's minimum. Duplicates collapse.
    pub fn new<I>(
        difficulty: Difficulty,
        operands: I,
        config: &GameConfig,
    ) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = u32>,
    {
        let operands: BTreeSet<u32> = operands.into_iter().collect();

        if let Some(&bad) = operands.iter().find(|&&n| n == 0 || n > MAX_OPERAND) {
            return Err(SelectionError::InvalidOperand(bad));
        }

        let required = config.tier(difficulty).min_operands;
        if operands.len() < required {
            return Err(SelectionError::TooFewOperands {
                required,
                selected: operands.len(),
            });
        }

        Ok(Self {
            difficulty,
            operands,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn operands(&self) -> &BTreeSet<u32> {
        &self.operands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_too_few_operands() {
        let config = GameConfig::default();
        let err = Selection::new(Difficulty::Easy, [4], &config).unwrap_err();
        assert_eq!(
            err,
            SelectionError::TooFewOperands {
                required: 2,
                selected: 1
            }
        );

        // duplicates do not count twice
        assert!(Selection::new(Difficulty::Easy, [4, 4], &config).is_err());
    }

    #[test]
    fn test_hard_needs_more_operands() {
        let config = GameConfig::default();
        assert!(Selection::new(Difficulty::Medium, [2, 3], &config).is_ok());
        assert!(matches!(
            Selection::new(Difficulty::Hard, [2, 3], &config),
            Err(SelectionError::TooFewOperands { required: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_and_oversized_operands() {
        let config = GameConfig::default();
        assert_eq!(
            Selection::new(Difficulty::Easy, [0, 3], &config),
            Err(SelectionError::InvalidOperand(0))
        );
        assert_eq!(
            Selection::new(Difficulty::Easy, [3, 100], &config),
            Err(SelectionError::InvalidOperand(100))
        );
    }

    #[test]
    fn test_notice_text() {
        let err = SelectionError::TooFewOperands {
            required: 2,
            selected: 0,
        };
        assert_eq!(err.to_string(), "Pick at least 2 numbers to multiply (0 selected)");
    }
}
