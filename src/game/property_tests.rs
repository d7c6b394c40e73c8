//! Property tests for session scoring.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use crate::data::GameConfig;
use crate::game::{Event, Game, State};
use crate::models::{Difficulty, Selection};

/// What the player does with one question.
#[derive(Debug, Clone, Copy)]
enum Move {
    Right,
    Wrong,
    Timeout,
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![Just(Move::Right), Just(Move::Wrong), Just(Move::Timeout)]
}

proptest! {
    /// Score equals the number of answers matching the correct answer,
    /// and every question gets exactly one result.
    #[test]
    fn prop_score_counts_correct_answers(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 15),
    ) {
        let mut game = Game::seeded(GameConfig::default(), seed);
        let mut now = Instant::now();
        let selection = Selection::new(Difficulty::Medium, [3, 4, 7], game.config()).unwrap();
        game.step(Event::Submit(selection), now);

        let mut expected = 0;
        for mv in &moves {
            let question = game.current_question().unwrap().clone();
            let deadline = game.settings().deadline();
            match mv {
                Move::Right => {
                    now += Duration::from_millis(100);
                    game.step(Event::Answer(question.correct_answer()), now);
                    expected += 1;
                }
                Move::Wrong => {
                    now += Duration::from_millis(100);
                    game.step(Event::Answer(question.correct_answer() + 1), now);
                }
                Move::Timeout => {
                    now += deadline;
                    game.step(Event::Deadline { question: game.session().index() }, now);
                }
            }
            prop_assert_eq!(game.score(), expected);
            game.step(Event::Advance { question: game.session().index() }, now);
        }

        prop_assert_eq!(game.state(), State::GameOver);
        prop_assert_eq!(game.session().results().len(), moves.len());
        prop_assert_eq!(
            game.session().results().iter().filter(|&&r| r).count(),
            expected
        );
    }
}
