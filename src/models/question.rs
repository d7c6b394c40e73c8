use std::fmt;

use serde::{Deserialize, Serialize};

use super::SelectionError;

/// A single multiplication fact with its multiple-choice options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    multiplicand: u32,
    multiplier: u32,
    correct_answer: u32,
    options: Vec<u32>,
}

impl Question {
    pub(crate) fn new(multiplicand: u32, multiplier: u32, options: Vec<u32>) -> Self {
        Self {
            multiplicand,
            multiplier,
            correct_answer: multiplicand * multiplier,
            options,
        }
    }

    pub fn multiplicand(&self) -> u32 {
        self.multiplicand
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn correct_answer(&self) -> u32 {
        self.correct_answer
    }

    /// Candidate answers in display order. Contains the correct answer once.
    pub fn options(&self) -> &[u32] {
        &self.options
    }

    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.multiplicand, self.multiplier)
    }
}

/// Difficulty tier, 1 (easy) through 3 (hard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Next tier, wrapping from hard back to easy.
    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = SelectionError;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(SelectionError::UnknownDifficulty(other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}
