//! Game state holder: the single mutable record of the live game.

use crate::game::{Board, GameStatus, Player, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Deep copy of the live game state, safe for external retention.
///
/// Serializes to the wire shape consumed by clients: the board as a
/// 9-element sequence of literal marks or nulls, the winning line as
/// a 3-element index sequence or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// The board at the time of the snapshot.
    board: Board,
    /// Player whose turn it is.
    current_player: Player,
    /// Ongoing, win, or draw.
    status: GameStatus,
    /// Winning player, present iff `status` is `win`.
    winner: Option<Player>,
    /// Completed line, present iff `status` is `win`.
    #[serde(rename = "winLine")]
    winning_line: Option<[usize; 3]>,
    /// Number of marks placed since the last reset.
    move_count: u32,
}

/// Owns the live game state. Single source of truth for the board,
/// current player, status, and winner.
///
/// No validation happens here; legality checks live in the validator
/// and sequencing lives in the orchestrator. Every operation returns
/// the post-mutation snapshot.
#[derive(Debug, Clone)]
pub struct GameStore {
    board: Board,
    current_player: Player,
    status: GameStatus,
    winner: Option<Player>,
    winning_line: Option<[usize; 3]>,
    move_count: u32,
}

impl GameStore {
    /// Creates a store holding a fresh game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::Ongoing,
            winner: None,
            winning_line: None,
            move_count: 0,
        }
    }

    /// Returns a deep copy of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current_player: self.current_player,
            status: self.status,
            winner: self.winner,
            winning_line: self.winning_line,
            move_count: self.move_count,
        }
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Places `player`'s mark at `pos`, bumps the move count, and
    /// flips the turn to the other player.
    ///
    /// Trusts its caller: the position must already be validated and
    /// the game must not be over.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, pos: usize, player: Player) -> GameSnapshot {
        self.board.set(pos, Square::Occupied(player));
        self.move_count += 1;
        self.current_player = player.opponent();
        debug!(pos, %player, move_count = self.move_count, "Applied move");
        self.snapshot()
    }

    /// Records a terminal outcome without touching the board.
    #[instrument(skip(self))]
    pub fn set_result(
        &mut self,
        status: GameStatus,
        winner: Option<Player>,
        winning_line: Option<[usize; 3]>,
    ) -> GameSnapshot {
        self.status = status;
        self.winner = winner;
        self.winning_line = winning_line;
        debug!(%status, ?winner, "Recorded game result");
        self.snapshot()
    }

    /// Returns the store to the fresh-game state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameSnapshot {
        *self = Self::new();
        debug!("Game state reset");
        self.snapshot()
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_invariants() {
        let store = GameStore::new();
        let snap = store.snapshot();
        assert!((0..9).all(|pos| snap.board().is_empty(pos)));
        assert_eq!(*snap.current_player(), Player::X);
        assert_eq!(*snap.status(), GameStatus::Ongoing);
        assert_eq!(*snap.winner(), None);
        assert_eq!(*snap.winning_line(), None);
        assert_eq!(*snap.move_count(), 0);
    }

    #[test]
    fn test_apply_move_flips_player_and_counts() {
        let mut store = GameStore::new();
        let snap = store.apply_move(4, Player::X);
        assert_eq!(snap.board().get(4), Some(Square::Occupied(Player::X)));
        assert_eq!(*snap.current_player(), Player::O);
        assert_eq!(*snap.move_count(), 1);

        let snap = store.apply_move(0, Player::O);
        assert_eq!(*snap.current_player(), Player::X);
        assert_eq!(*snap.move_count(), 2);
    }

    #[test]
    fn test_set_result_leaves_board_alone() {
        let mut store = GameStore::new();
        store.apply_move(0, Player::X);
        let snap = store.set_result(GameStatus::Win, Some(Player::X), Some([0, 1, 2]));
        assert_eq!(*snap.status(), GameStatus::Win);
        assert_eq!(*snap.winner(), Some(Player::X));
        assert_eq!(*snap.winning_line(), Some([0, 1, 2]));
        assert_eq!(snap.board().get(0), Some(Square::Occupied(Player::X)));
        assert_eq!(*snap.move_count(), 1);
    }

    #[test]
    fn test_reset_restores_initial_invariants() {
        let mut store = GameStore::new();
        store.apply_move(0, Player::X);
        store.apply_move(4, Player::O);
        store.set_result(GameStatus::Win, Some(Player::X), Some([0, 1, 2]));

        let snap = store.reset();
        assert_eq!(snap, GameStore::new().snapshot());
    }

    #[test]
    fn test_snapshot_is_independent_of_live_state() {
        let mut store = GameStore::new();
        let before = store.snapshot();
        store.apply_move(4, Player::X);
        assert!(before.board().is_empty(4));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let mut store = GameStore::new();
        store.apply_move(0, Player::X);
        let value = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(value["board"][0], serde_json::json!("X"));
        assert_eq!(value["board"][1], serde_json::Value::Null);
        assert_eq!(value["currentPlayer"], serde_json::json!("O"));
        assert_eq!(value["status"], serde_json::json!("ongoing"));
        assert_eq!(value["winLine"], serde_json::Value::Null);
        assert_eq!(value["moveCount"], serde_json::json!(1));
    }
}
