use std::collections::BTreeSet;
use std::time::Instant;

use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::Rng;

use crate::data::GameConfig;
use crate::game::{Effect, Event, Game, Playing, State};
use crate::models::{Difficulty, Selection, SELECTABLE_OPERANDS};
use crate::sound::Cue;

/// Presentation state wrapped around the game machine.
///
/// Key presses become machine events here; the effects the machine emits
/// are queued for the event loop to carry out.
pub struct App<R = StdRng> {
    game: Game<R>,
    difficulty: Difficulty,
    picked: BTreeSet<u32>,
    cursor: usize,
    notice: Option<String>,
    selected_option: usize,
    results_scroll: usize,
    pending: Vec<Effect>,
}

impl App<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_game(Game::new(config))
    }
}

impl<R: Rng> App<R> {
    pub fn with_game(game: Game<R>) -> Self {
        Self {
            game,
            difficulty: Difficulty::default(),
            picked: BTreeSet::new(),
            cursor: 0,
            notice: None,
            selected_option: 0,
            results_scroll: 0,
            pending: Vec::new(),
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Feed an event to the machine and queue its effects.
    pub fn dispatch(&mut self, event: Event, now: Instant) {
        let before = self.game.state();
        let effects = self.game.step(event, now);
        let after = self.game.state();

        // the result flash reads the chosen answer from the session
        if before != after && after != State::Playing(Playing::Result) {
            self.selected_option = 0;
            self.results_scroll = 0;
        }

        self.pending.extend(effects);
    }

    /// Effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    /// Returns true if the app should exit.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match self.game.state() {
            State::Selecting => self.handle_selecting_key(key, now),
            State::Playing(Playing::Question) => self.handle_question_key(key, now),
            State::Playing(Playing::Result) | State::Playing(Playing::Next) => {
                self.handle_result_key(key, now)
            }
            State::GameOver => self.handle_game_over_key(key, now),
        }
    }

    fn handle_selecting_key(&mut self, key: KeyCode, now: Instant) -> bool {
        let operand_count = SELECTABLE_OPERANDS.count();

        match key {
            KeyCode::Tab | KeyCode::Char('d') => {
                self.difficulty = self.difficulty.cycle();
                self.tap();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = (self.cursor + operand_count - 1) % operand_count;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1) % operand_count;
            }
            KeyCode::Char(' ') => {
                let operand = SELECTABLE_OPERANDS.start() + self.cursor as u32;
                self.toggle_operand(operand);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let operand = c.to_digit(10).unwrap_or_default();
                if SELECTABLE_OPERANDS.contains(&operand) {
                    self.cursor = (operand - SELECTABLE_OPERANDS.start()) as usize;
                    self.toggle_operand(operand);
                }
            }
            KeyCode::Enter => self.start(now),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_question_key(&mut self, key: KeyCode, now: Instant) -> bool {
        let option_count = self
            .game
            .current_question()
            .map_or(1, |question| question.options().len().max(1));

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_option = (self.selected_option + option_count - 1) % option_count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_option = (self.selected_option + 1) % option_count;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).unwrap_or_default() as usize - 1;
                if index < option_count {
                    self.selected_option = index;
                    self.answer(now);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.answer(now),
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(now),
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        }
        false
    }

    fn handle_result_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(now),
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {
                let question = self.game.session().index();
                self.dispatch(Event::Advance { question }, now);
            }
        }
        false
    }

    fn handle_game_over_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = self.game.session().questions().len().saturating_sub(1);
                self.results_scroll = (self.results_scroll + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => self.restart(now),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn toggle_operand(&mut self, operand: u32) {
        if !self.picked.remove(&operand) {
            self.picked.insert(operand);
        }
        self.notice = None;
        self.tap();
    }

    fn start(&mut self, now: Instant) {
        match Selection::new(
            self.difficulty,
            self.picked.iter().copied(),
            self.game.config(),
        ) {
            Ok(selection) => {
                self.notice = None;
                self.dispatch(Event::Submit(selection), now);
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn answer(&mut self, now: Instant) {
        let Some(option) = self
            .game
            .current_question()
            .and_then(|question| question.options().get(self.selected_option).copied())
        else {
            return;
        };
        self.dispatch(Event::Answer(option), now);
    }

    fn restart(&mut self, now: Instant) {
        self.picked.clear();
        self.notice = None;
        self.dispatch(Event::Restart, now);
    }

    fn tap(&mut self) {
        self.pending.push(Effect::PlayCue(Cue::Tap));
    }
}

impl<R> App<R> {
    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn picked(&self) -> &BTreeSet<u32> {
        &self.picked
    }

    /// Index into [`SELECTABLE_OPERANDS`] under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Blocking notice shown on the start screen, e.g. too few numbers.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }
}
