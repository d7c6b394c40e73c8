//! Audio cues for taps and answer feedback.
//!
//! Playback is fire-and-forget: a failed cue is logged and never reaches
//! the game state.

use std::io::{self, Stdout, Write};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Toggling a number or difficulty on the start screen.
    Tap,
    Right,
    Wrong,
}

#[derive(Debug, Error)]
#[error("failed to play {cue:?} cue: {source}")]
pub struct CueError {
    pub cue: Cue,
    #[source]
    pub source: io::Error,
}

/// Something that can play a cue.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

/// Rings the terminal bell on wrong answers and timeouts.
pub struct TerminalBell<W = Stdout> {
    out: W,
}

impl TerminalBell<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalBell<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        if cue != Cue::Wrong {
            return Ok(());
        }

        self.out
            .write_all(b"\x07")
            .and_then(|()| self.out.flush())
            .map_err(|source| CueError { cue, source })
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl CuePlayer for Muted {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Play a cue, logging and discarding any failure.
pub fn play_cue(player: &mut dyn CuePlayer, cue: Cue) {
    if let Err(err) = player.play(cue) {
        warn!(%err, "cue playback failed");
    }
}
