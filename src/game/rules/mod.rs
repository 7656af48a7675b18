//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating board state according to tic-tac-toe
//! rules. Rules are separated from board storage so the evaluator and
//! the search engine share one source of truth for the win lines.

pub mod draw;
pub mod evaluate;
pub mod win;

pub use draw::is_draw;
pub use evaluate::{Evaluation, evaluate};
pub use win::{WIN_LINES, winning_line};
