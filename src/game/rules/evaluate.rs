//! Outcome evaluation: win, draw, or play continues.

use super::super::{Board, GameStatus, Player};
use super::win::winning_line;
use serde::Serialize;
use tracing::instrument;

/// Result of evaluating a board for a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Terminal status of the board.
    pub status: GameStatus,
    /// Winning player, present iff `status` is `Win`.
    pub winner: Option<Player>,
    /// Completed line indices, present iff `status` is `Win`.
    pub winning_line: Option<[usize; 3]>,
}

impl Evaluation {
    /// True if the board is terminal (win or draw).
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Ongoing
    }
}

/// Evaluates a board: first completed line in scan order wins, a full
/// board with no line is a draw, anything else is ongoing.
#[instrument]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some((winner, line)) = winning_line(board) {
        return Evaluation {
            status: GameStatus::Win,
            winner: Some(winner),
            winning_line: Some(line),
        };
    }

    if board.is_full() {
        return Evaluation {
            status: GameStatus::Draw,
            winner: None,
            winning_line: None,
        };
    }

    Evaluation {
        status: GameStatus::Ongoing,
        winner: None,
        winning_line: None,
    }
}
