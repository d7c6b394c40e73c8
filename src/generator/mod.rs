//! Question generation.
//!
//! Every operand is paired with every multiplier in [`MULTIPLIERS`], the
//! pairs are shuffled, and the first `question_count` become questions.
//! When fewer pairs exist than requested, all of them are used.

mod options;

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::TierSettings;
use crate::models::Question;

pub use options::generate_options;

/// Multipliers every operand is paired with.
pub const MULTIPLIERS: RangeInclusive<u32> = 2..=9;

/// Build a shuffled session's worth of questions for the given operands.
pub fn generate_questions<R: Rng + ?Sized>(
    operands: &BTreeSet<u32>,
    settings: &TierSettings,
    rng: &mut R,
) -> Vec<Question> {
    let mut combinations: Vec<(u32, u32)> = operands
        .iter()
        .flat_map(|&multiplicand| MULTIPLIERS.map(move |multiplier| (multiplicand, multiplier)))
        .collect();

    combinations.shuffle(rng);
    combinations.truncate(settings.question_count);

    combinations
        .into_iter()
        .map(|(multiplicand, multiplier)| {
            let options = generate_options(
                multiplicand,
                multiplier,
                settings.option_count,
                settings.decoys,
                rng,
            );
            Question::new(multiplicand, multiplier, options)
        })
        .collect()
}
