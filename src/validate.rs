//! Move validation: every rule a move must pass before it is applied.

use crate::game::{Board, GameStatus, Player, Square};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Reasons a proposed move is rejected.
///
/// Rules are checked in a fixed order and the first failing rule wins;
/// the display text is surfaced verbatim to the player.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RejectedMove {
    /// A move was submitted after the game ended.
    #[display("Game is already over. Please reset to play again.")]
    GameOver,
    /// No position was supplied, or it was not an integer.
    #[display("Invalid position: must be a number.")]
    InvalidPosition,
    /// The position falls outside the 3x3 board.
    #[display("Position {_0} is out of range. Must be 0-8.")]
    OutOfRange(#[error(not(source))] i64),
    /// The target cell already holds a mark.
    #[display("Cell {position} is already occupied by '{occupant}'.")]
    CellOccupied {
        /// The requested cell index.
        position: usize,
        /// The mark already in the cell.
        occupant: Player,
    },
}

/// Validates a proposed move against the current board and status.
///
/// Checks, in order: the game is still ongoing, the position is
/// present, the position lies in 0-8, and the target cell is empty.
/// Returns the normalized position on success. Pure, no side effects.
#[instrument(skip(board))]
pub fn validate(
    board: &Board,
    position: Option<i64>,
    player: Player,
    status: GameStatus,
) -> Result<usize, RejectedMove> {
    debug!(?position, %player, %status, "Validating proposed move");

    if status != GameStatus::Ongoing {
        return Err(RejectedMove::GameOver);
    }

    let raw = position.ok_or(RejectedMove::InvalidPosition)?;

    if !(0..=8).contains(&raw) {
        return Err(RejectedMove::OutOfRange(raw));
    }
    let pos = raw as usize;

    match board.get(pos) {
        Some(Square::Occupied(occupant)) => Err(RejectedMove::CellOccupied {
            position: pos,
            occupant,
        }),
        _ => Ok(pos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_move_returns_normalized_position() {
        let board = Board::new();
        let result = validate(&board, Some(4), Player::X, GameStatus::Ongoing);
        assert_eq!(result, Ok(4));
    }

    #[test]
    fn test_game_over_rejected_first() {
        // An out-of-range position after game over still reports GameOver.
        let board = Board::new();
        let result = validate(&board, Some(42), Player::X, GameStatus::Win);
        assert_eq!(result, Err(RejectedMove::GameOver));
    }

    #[test]
    fn test_missing_position_rejected() {
        let board = Board::new();
        let result = validate(&board, None, Player::X, GameStatus::Ongoing);
        assert_eq!(result, Err(RejectedMove::InvalidPosition));
    }

    #[test]
    fn test_out_of_range_names_the_value() {
        let board = Board::new();
        let result = validate(&board, Some(9), Player::X, GameStatus::Ongoing);
        assert_eq!(result, Err(RejectedMove::OutOfRange(9)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Position 9 is out of range. Must be 0-8."
        );

        let negative = validate(&board, Some(-1), Player::X, GameStatus::Ongoing);
        assert_eq!(negative, Err(RejectedMove::OutOfRange(-1)));
    }

    #[test]
    fn test_occupied_cell_names_the_occupant() {
        let mut board = Board::new();
        board.set(0, Square::Occupied(Player::X));
        let result = validate(&board, Some(0), Player::O, GameStatus::Ongoing);
        assert_eq!(
            result,
            Err(RejectedMove::CellOccupied {
                position: 0,
                occupant: Player::X,
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cell 0 is already occupied by 'X'."
        );
    }
}
