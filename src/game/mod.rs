//! Tic-tac-toe domain: board types and rules.

mod types;

pub mod rules;

pub use rules::{Evaluation, WIN_LINES, evaluate, is_draw, winning_line};
pub use types::{Board, GameStatus, Player, Square};

/// Alias for clarity where a player symbol occupies a cell.
pub type Mark = Player;
