//! Session state machine.

mod machine;
#[cfg(test)]
mod property_tests;
mod session;

pub use machine::{Effect, Event, Game, Playing, State};
pub use session::{Record, Session};
