//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Square};
use tracing::instrument;

/// The 8 winning lines, scanned rows first, then columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a completed line on the board.
///
/// Returns the owning player and the line indices for the first
/// complete line in scan order. Two simultaneous lines cannot occur
/// in a legal game, so first-match is not an arbitrary tie-break.
#[instrument]
pub fn winning_line(board: &Board) -> Option<(Player, [usize; 3])> {
    for line in WIN_LINES {
        let [a, b, c] = line;
        let sq = board.get(a)?;
        if sq != Square::Empty && board.get(b) == Some(sq) && board.get(c) == Some(sq) {
            if let Square::Occupied(player) = sq {
                return Some((player, line));
            }
        }
    }
    None
}
