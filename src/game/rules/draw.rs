//! Draw detection logic for tic-tac-toe.

use super::super::Board;
use super::win::winning_line;
use tracing::instrument;

/// Checks if the board is a draw (full with no completed line).
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winning_line(board).is_none()
}
