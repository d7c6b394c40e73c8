//! # times-tables
//!
//! A terminal multiplication-table drill. The player picks a difficulty and
//! the numbers to practise, then answers timed multiple-choice questions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use times_tables::{GameConfig, Tables, TablesError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TablesError> {
//!     Tables::new(GameConfig::default()).run().await
//! }
//! ```
//!
//! The game logic is usable without a terminal: [`Game`] is a plain state
//! machine driven by [`Event`]s that returns the [`Effect`]s to perform.

mod app;
mod data;
mod error;
mod game;
mod generator;
mod models;
pub mod sound;
pub mod terminal;
mod timer;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub use app::App;
pub use data::{load_config, ConfigError, DecoyStyle, GameConfig, TierSettings, Tiers};
pub use error::{Result, TablesError};
pub use game::{Effect, Event, Game, Playing, Record, Session, State};
pub use generator::{generate_options, generate_questions, MULTIPLIERS};
pub use models::{
    Difficulty, Question, Selection, SelectionError, MAX_OPERAND, SELECTABLE_OPERANDS,
};
pub use timer::Scheduler;

use sound::{play_cue, CuePlayer, TerminalBell};

/// Redraw interval; also drives the countdown bar.
const TICK: Duration = Duration::from_millis(50);

/// A game instance that can be run in the terminal.
pub struct Tables {
    app: App,
    player: Box<dyn CuePlayer>,
}

impl Tables {
    pub fn new(config: GameConfig) -> Self {
        Self::from_game(Game::new(config))
    }

    /// Same questions for the same seed.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::from_game(Game::seeded(config, seed))
    }

    fn from_game(game: Game) -> Self {
        Self {
            app: App::with_game(game),
            player: Box::new(TerminalBell::new()),
        }
    }

    /// Difficulty preselected on the start screen.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.app.set_difficulty(difficulty);
        self
    }

    pub fn with_player(mut self, player: impl CuePlayer + 'static) -> Self {
        self.player = Box::new(player);
        self
    }

    /// Run the game in the terminal.
    ///
    /// Takes over the terminal and returns when the player quits.
    pub async fn run(mut self) -> Result<()> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, self.player.as_mut()).await;
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::GameTerminal,
    app: &mut App,
    player: &mut dyn CuePlayer,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = Scheduler::new(tx);
    let mut keys = EventStream::new();
    let mut tick = tokio::time::interval(TICK);

    info!("event loop started");

    loop {
        terminal.draw(|frame| ui::render(frame, app, Instant::now()))?;

        tokio::select! {
            _ = tick.tick() => {}
            Some(event) = rx.recv() => {
                app.dispatch(event, Instant::now());
            }
            key = keys.next() => match key {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, Instant::now()) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }

        apply_effects(&mut scheduler, player, app.take_effects());
    }

    scheduler.cancel_all();
    info!("event loop finished");
    Ok(())
}

/// Hand timer effects to the scheduler and cues to the player.
fn apply_effects(scheduler: &mut Scheduler, player: &mut dyn CuePlayer, effects: Vec<Effect>) {
    for effect in effects {
        debug!(?effect, "applying effect");
        if !scheduler.apply(&effect) {
            if let Effect::PlayCue(cue) = effect {
                play_cue(player, cue);
            }
        }
    }
}
