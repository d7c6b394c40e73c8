//! The question lifecycle state machine.
//!
//! ```text
//! Selecting --Submit--> Playing(Question) --Answer/Deadline--> Playing(Result)
//!                              ^                                     |
//!                              +------ Playing(Next) <---Advance-----+
//!                                           |
//!                                           +--(no more)--> GameOver --Restart--> Selecting
//! ```
//!
//! [`Game::step`] applies one event and returns the side effects the caller
//! must carry out (timers and cues). The machine never touches a clock or a
//! timer itself: the caller passes `now` in and schedules what it is told to.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::data::{GameConfig, TierSettings};
use crate::generator::generate_questions;
use crate::models::{Question, Selection};
use crate::sound::Cue;

use super::session::Session;

/// Sub-states while a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playing {
    /// Waiting for an answer; the deadline clock is running.
    Question,
    /// Showing whether the last answer was right.
    Result,
    /// Transient: resolved within the same step to `Question` or `GameOver`.
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Selecting,
    Playing(Playing),
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submit(Selection),
    Answer(u32),
    /// A scheduled deadline check for the question at `question`.
    Deadline { question: usize },
    /// Leave the result screen for the question at `question`, early or
    /// after the result delay.
    Advance { question: usize },
    Restart,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScheduleDeadline { question: usize, after: Duration },
    CancelDeadline,
    ScheduleAdvance { question: usize, after: Duration },
    CancelAdvance,
    PlayCue(Cue),
}

pub struct Game<R = StdRng> {
    config: GameConfig,
    state: State,
    session: Session,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A game whose question order is reproducible.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            state: State::Selecting,
            session: Session::default(),
            rng,
        }
    }

    /// Apply one event at time `now` and return the effects to carry out.
    ///
    /// Events that do not apply to the current state are ignored.
    pub fn step(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        match (self.state, event) {
            (_, Event::Restart) => self.restart(&mut effects),
            (State::Selecting, Event::Submit(selection)) => {
                self.submit(&selection, now, &mut effects);
            }
            (State::Playing(Playing::Question), Event::Answer(option)) => {
                self.finish_question(Some(option), now, &mut effects);
            }
            (State::Playing(Playing::Question), Event::Deadline { question }) => {
                self.check_deadline(question, now, &mut effects);
            }
            (State::Playing(Playing::Result), Event::Advance { question }) => {
                self.advance(question, now, &mut effects);
            }
            (state, event) => {
                debug!(?state, ?event, "event ignored");
            }
        }

        effects
    }

    fn submit(&mut self, selection: &Selection, now: Instant, effects: &mut Vec<Effect>) {
        let settings = self.config.tier(selection.difficulty());
        let deadline = settings.deadline();
        let questions = generate_questions(selection.operands(), settings, &mut self.rng);

        info!(
            difficulty = %selection.difficulty(),
            operands = ?selection.operands(),
            questions = questions.len(),
            "session started"
        );

        self.session = Session::start(selection, questions, now);
        if self.session.questions().is_empty() {
            self.game_over();
            return;
        }

        self.state = State::Playing(Playing::Question);
        effects.push(self.schedule_deadline(deadline));
    }

    fn check_deadline(&mut self, question: usize, now: Instant, effects: &mut Vec<Effect>) {
        if question != self.session.index() {
            debug!(question, current = self.session.index(), "stale deadline ignored");
            return;
        }

        let deadline = self.settings().deadline();
        let elapsed = self.session.question_elapsed(now);
        if elapsed >= deadline {
            debug!(question, ?elapsed, "question timed out");
            self.finish_question(None, now, effects);
        } else {
            effects.push(Effect::ScheduleDeadline {
                question,
                after: deadline - elapsed,
            });
        }
    }

    fn finish_question(&mut self, answer: Option<u32>, now: Instant, effects: &mut Vec<Effect>) {
        let correct = self.session.finalize(answer, now);
        debug!(
            question = self.session.index(),
            ?answer,
            correct,
            "question finished"
        );

        self.state = State::Playing(Playing::Result);
        effects.push(Effect::CancelDeadline);
        effects.push(Effect::PlayCue(if correct { Cue::Right } else { Cue::Wrong }));
        effects.push(Effect::ScheduleAdvance {
            question: self.session.index(),
            after: self.config.result_delay(),
        });
    }

    fn advance(&mut self, question: usize, now: Instant, effects: &mut Vec<Effect>) {
        // a result delay that fired after an early advance may still be queued
        if question != self.session.index() {
            debug!(question, current = self.session.index(), "stale advance ignored");
            return;
        }

        effects.push(Effect::CancelAdvance);
        self.state = State::Playing(Playing::Next);
        self.resolve_next(now, effects);
    }

    fn resolve_next(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if self.session.has_more() {
            self.session.advance(now);
            self.state = State::Playing(Playing::Question);
            effects.push(self.schedule_deadline(self.settings().deadline()));
        } else {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.state = State::GameOver;
        info!(
            score = self.session.score(),
            total = self.session.questions().len(),
            elapsed_ms = self.session.elapsed().as_millis() as u64,
            "game over"
        );
    }

    fn restart(&mut self, effects: &mut Vec<Effect>) {
        debug!(from = ?self.state, "restart");
        self.state = State::Selecting;
        self.session = Session::default();
        effects.push(Effect::CancelDeadline);
        effects.push(Effect::CancelAdvance);
    }

    fn schedule_deadline(&self, after: Duration) -> Effect {
        Effect::ScheduleDeadline {
            question: self.session.index(),
            after,
        }
    }
}

impl<R> Game<R> {
    pub fn state(&self) -> State {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Settings for the running session's tier.
    pub fn settings(&self) -> &TierSettings {
        self.config.tier(self.session.difficulty())
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            State::Playing(_) => self.session.current_question(),
            _ => None,
        }
    }

    /// One-based question number and total.
    pub fn progress(&self) -> (usize, usize) {
        (self.session.index() + 1, self.session.questions().len())
    }

    pub fn score(&self) -> usize {
        self.session.score()
    }

    pub fn elapsed(&self) -> Duration {
        self.session.elapsed()
    }

    /// Fraction of the deadline still left, for the countdown bar.
    ///
    /// `None` outside the question state.
    pub fn remaining_fraction(&self, now: Instant) -> Option<f64> {
        if self.state != State::Playing(Playing::Question) {
            return None;
        }
        let deadline = self.settings().deadline().as_secs_f64();
        let elapsed = self.session.question_elapsed(now).as_secs_f64();
        Some((1.0 - elapsed / deadline).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn game() -> Game {
        Game::seeded(GameConfig::default(), 9)
    }

    fn submit(
        game: &mut Game,
        difficulty: Difficulty,
        operands: &[u32],
        now: Instant,
    ) -> Vec<Effect> {
        let selection =
            Selection::new(difficulty, operands.iter().copied(), game.config()).unwrap();
        game.step(Event::Submit(selection), now)
    }

    fn advance(game: &mut Game, now: Instant) -> Vec<Effect> {
        let question = game.session().index();
        game.step(Event::Advance { question }, now)
    }

    fn answer_current(game: &mut Game, correct: bool, now: Instant) -> Vec<Effect> {
        let question = game.current_question().unwrap();
        let option = if correct {
            question.correct_answer()
        } else {
            *question
                .options()
                .iter()
                .find(|&&o| o != question.correct_answer())
                .unwrap()
        };
        game.step(Event::Answer(option), now)
    }

    #[test]
    fn test_submit_starts_first_question() {
        let mut game = game();
        let now = Instant::now();
        let effects = submit(&mut game, Difficulty::Easy, &[2, 3], now);

        assert_eq!(game.state(), State::Playing(Playing::Question));
        assert_eq!(game.progress(), (1, 10));
        assert_eq!(game.session().started_at(), Some(now));
        assert_eq!(
            effects,
            vec![Effect::ScheduleDeadline {
                question: 0,
                after: Duration::from_secs(10)
            }]
        );
    }

    #[test]
    fn test_answer_moves_to_result() {
        let mut game = game();
        let start = Instant::now();
        submit(&mut game, Difficulty::Medium, &[4, 5], start);

        let effects = answer_current(&mut game, true, start + Duration::from_millis(800));

        assert_eq!(game.state(), State::Playing(Playing::Result));
        assert_eq!(game.score(), 1);
        assert_eq!(game.elapsed(), Duration::from_millis(800));
        assert_eq!(game.session().started_at(), None);
        assert_eq!(
            effects,
            vec![
                Effect::CancelDeadline,
                Effect::PlayCue(Cue::Right),
                Effect::ScheduleAdvance {
                    question: 0,
                    after: Duration::from_millis(1200)
                },
            ]
        );

        // answers are only taken while a question is open
        assert!(game.step(Event::Answer(1), start).is_empty());
        assert_eq!(game.session().results().len(), 1);
    }

    #[test]
    fn test_all_correct_reaches_game_over() {
        let mut game = game();
        let mut now = Instant::now();
        submit(&mut game, Difficulty::Easy, &[2, 3], now);

        let total = game.session().questions().len();
        for question in game.session().questions() {
            assert!([2, 3].contains(&question.multiplicand()));
        }

        for _ in 0..total {
            now += Duration::from_millis(500);
            answer_current(&mut game, true, now);
            advance(&mut game, now);
        }

        assert_eq!(game.state(), State::GameOver);
        assert_eq!(game.score(), total);
        assert_eq!(game.elapsed(), Duration::from_millis(500) * total as u32);
    }

    #[test]
    fn test_timeout_counts_as_wrong() {
        let mut game = game();
        let start = Instant::now();
        submit(&mut game, Difficulty::Hard, &[6, 7, 8], start);

        let effects = game.step(
            Event::Deadline { question: 0 },
            start + Duration::from_secs(3),
        );

        assert_eq!(game.state(), State::Playing(Playing::Result));
        assert_eq!(game.session().results(), &[false]);
        assert_eq!(game.session().last_answer(), None);
        assert_eq!(game.elapsed(), Duration::from_secs(3));
        assert!(effects.contains(&Effect::PlayCue(Cue::Wrong)));
        assert!(effects.contains(&Effect::ScheduleAdvance {
            question: 0,
            after: Duration::from_millis(1200)
        }));

        advance(&mut game, start + Duration::from_secs(4));
        assert_eq!(game.state(), State::Playing(Playing::Question));
        assert_eq!(game.progress().0, 2);
    }

    #[test]
    fn test_stale_and_early_deadlines() {
        let mut game = game();
        let start = Instant::now();
        submit(&mut game, Difficulty::Medium, &[2, 9], start);

        // early check re-arms for the remainder
        let effects = game.step(
            Event::Deadline { question: 0 },
            start + Duration::from_secs(2),
        );
        assert_eq!(
            effects,
            vec![Effect::ScheduleDeadline {
                question: 0,
                after: Duration::from_secs(3)
            }]
        );
        assert_eq!(game.state(), State::Playing(Playing::Question));

        answer_current(&mut game, false, start + Duration::from_secs(3));
        advance(&mut game, start + Duration::from_secs(4));

        // the first question's timer firing late must not end the second
        let effects = game.step(
            Event::Deadline { question: 0 },
            start + Duration::from_secs(10),
        );
        assert!(effects.is_empty());
        assert_eq!(game.state(), State::Playing(Playing::Question));
        assert_eq!(game.session().results(), &[false]);
    }

    #[test]
    fn test_stale_advance_keeps_next_result() {
        let mut game = game();
        let start = Instant::now();
        submit(&mut game, Difficulty::Easy, &[2, 3], start);

        // the result delay for question 0 fires, but a key press advanced first
        answer_current(&mut game, true, start + Duration::from_millis(500));
        advance(&mut game, start + Duration::from_millis(600));
        answer_current(&mut game, false, start + Duration::from_millis(900));
        assert_eq!(game.state(), State::Playing(Playing::Result));

        let effects = game.step(
            Event::Advance { question: 0 },
            start + Duration::from_millis(1700),
        );
        assert!(effects.is_empty());
        assert_eq!(game.state(), State::Playing(Playing::Result));
        assert_eq!(game.progress(), (2, 10));

        advance(&mut game, start + Duration::from_secs(2));
        assert_eq!(game.state(), State::Playing(Playing::Question));
        assert_eq!(game.progress(), (3, 10));
    }

    #[test]
    fn test_restart_from_every_state() {
        let start = Instant::now();

        let mut selecting = game();
        selecting.step(Event::Restart, start);

        let mut question = game();
        submit(&mut question, Difficulty::Easy, &[2, 3], start);

        let mut result = game();
        submit(&mut result, Difficulty::Easy, &[2, 3], start);
        answer_current(&mut result, true, start);

        let mut over = game();
        submit(&mut over, Difficulty::Easy, &[2, 3], start);
        while over.state() != State::GameOver {
            answer_current(&mut over, true, start);
            advance(&mut over, start);
        }

        for mut game in [selecting, question, result, over] {
            let effects = game.step(Event::Restart, start);
            assert_eq!(game.state(), State::Selecting);
            assert_eq!(effects, vec![Effect::CancelDeadline, Effect::CancelAdvance]);
            assert_eq!(game.session().index(), 0);
            assert_eq!(game.score(), 0);
            assert_eq!(game.elapsed(), Duration::ZERO);
            assert!(game.session().questions().is_empty());
            assert!(game.current_question().is_none());
        }
    }

    #[test]
    fn test_submit_ignored_while_playing() {
        let mut game = game();
        let start = Instant::now();
        submit(&mut game, Difficulty::Easy, &[2, 3], start);
        let first = game.session().questions().to_vec();

        assert!(submit(&mut game, Difficulty::Hard, &[4, 5, 6], start).is_empty());
        assert_eq!(game.session().questions(), first.as_slice());
    }

    #[test]
    fn test_remaining_fraction() {
        let mut game = game();
        let start = Instant::now();
        assert_eq!(game.remaining_fraction(start), None);

        submit(&mut game, Difficulty::Easy, &[2, 3], start);
        assert_eq!(game.remaining_fraction(start), Some(1.0));
        assert_eq!(
            game.remaining_fraction(start + Duration::from_secs(5)),
            Some(0.5)
        );
        assert_eq!(
            game.remaining_fraction(start + Duration::from_secs(60)),
            Some(0.0)
        );
    }
}
