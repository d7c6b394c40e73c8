mod question;
mod selection;

pub use question::{Difficulty, Question};
pub use selection::{Selection, SelectionError, MAX_OPERAND, SELECTABLE_OPERANDS};
