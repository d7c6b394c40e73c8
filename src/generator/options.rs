use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::DecoyStyle;

/// Draws allowed before the decoy radius grows by one.
const DRAWS_PER_RADIUS: usize = 32;

/// Build the option list for `multiplicand × multiplier`.
///
/// Returns `option_count` distinct positive values in random order, exactly
/// one of which is the product. Decoys are drawn according to `style` until
/// enough distinct ones exist; if a tight pool runs dry the draw radius
/// widens, so this always terminates.
pub fn generate_options<R: Rng + ?Sized>(
    multiplicand: u32,
    multiplier: u32,
    option_count: usize,
    style: DecoyStyle,
    rng: &mut R,
) -> Vec<u32> {
    let correct = multiplicand * multiplier;
    let wanted = option_count.saturating_sub(1);

    let mut options: Vec<u32> = Vec::with_capacity(wanted + 1);
    let mut widen = 0;
    let mut draws = 0;

    while options.len() < wanted {
        if let Some(decoy) = draw_decoy(multiplicand, multiplier, style, widen, rng) {
            if decoy > 0 && decoy != correct && !options.contains(&decoy) {
                options.push(decoy);
            }
        }

        draws += 1;
        if draws % DRAWS_PER_RADIUS == 0 {
            widen += 1;
        }
    }

    options.push(correct);
    options.shuffle(rng);
    options
}

fn draw_decoy<R: Rng + ?Sized>(
    multiplicand: u32,
    multiplier: u32,
    style: DecoyStyle,
    widen: i64,
    rng: &mut R,
) -> Option<u32> {
    let a = i64::from(multiplicand);
    let b = i64::from(multiplier);
    let correct = a * b;

    let candidate = match style {
        DecoyStyle::Loose => correct + signed_offset(3, 10 + widen, rng),
        DecoyStyle::Moderate => {
            if rng.gen_bool(0.5) {
                a * (b + signed_offset(1, 1 + widen, rng))
            } else {
                correct + signed_offset(1, 4 + widen, rng)
            }
        }
        DecoyStyle::Close => match rng.gen_range(0..3) {
            0 => correct + signed_offset(1, 2 + widen, rng),
            1 => a * (b + signed_offset(1, 1 + widen, rng)),
            _ => (a + signed_offset(1, 1 + widen, rng)) * b,
        },
    };

    u32::try_from(candidate).ok()
}

/// A value in `min..=max` with a random sign.
fn signed_offset<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
    let magnitude = rng.gen_range(min..=max);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn assert_well_formed(options: &[u32], correct: u32, count: usize) {
        assert_eq!(options.len(), count);
        assert_eq!(options.iter().filter(|&&o| o == correct).count(), 1);
        let mut sorted = options.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), count, "duplicate option in {options:?}");
        assert!(options.iter().all(|&o| o > 0));
    }

    #[test]
    fn test_close_decoys_stay_near() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let options = generate_options(7, 8, 4, DecoyStyle::Close, &mut rng);
            assert_well_formed(&options, 56, 4);
            for option in options {
                // ±2, 7×7, 7×9, 6×8, 8×8
                assert!(
                    [49, 48, 54, 55, 56, 57, 58, 63, 64].contains(&option),
                    "unexpected option {option}"
                );
            }
        }
    }

    #[test]
    fn test_loose_decoys_keep_distance() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let options = generate_options(6, 6, 3, DecoyStyle::Loose, &mut rng);
            assert_well_formed(&options, 36, 3);
            for option in options.into_iter().filter(|&o| o != 36) {
                assert!(option.abs_diff(36) >= 3);
            }
        }
    }

    #[test]
    fn test_small_products_still_fill_up() {
        // 2×2 has only four close decoys before the radius has to widen
        let mut rng = StdRng::seed_from_u64(5);
        for count in 2..=8 {
            let options = generate_options(2, 2, count, DecoyStyle::Close, &mut rng);
            assert_well_formed(&options, 4, count);
        }
    }

    #[test]
    fn test_single_option_is_the_answer() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate_options(3, 4, 1, DecoyStyle::Moderate, &mut rng), vec![12]);
    }
}
