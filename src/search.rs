//! Adversarial tree search for the AI player.
//!
//! Exhaustive minimax over the full remaining game tree. The branching
//! factor is at most 9 and the depth at most 9, so the whole tree is
//! always enumerated; no pruning is needed.

use crate::game::{Board, Player, Square, winning_line};
use tracing::{debug, instrument};

/// The mark the AI plays.
pub const AI_MARK: Player = Player::O;

/// Returns the optimal move for the AI (`O`) on the given board.
///
/// Terminal positions score +10 for an AI win and -10 for an opponent
/// win, adjusted by ply depth: faster wins score higher, and an
/// unavoidable loss is delayed as long as possible. Among equal
/// scores the lowest index wins, so the choice is deterministic.
///
/// The returned cell is always empty, and the AI can never be made to
/// lose when every one of its moves comes from this function.
///
/// The board must be non-terminal with at least one empty cell;
/// calling this on a decided or full board is a caller logic error.
#[instrument(skip(board))]
pub fn best_move(board: &Board) -> usize {
    best_move_for(board, AI_MARK)
}

/// Returns the optimal move for `player` on the given board.
///
/// Same contract as [`best_move`], with `player` as the maximizing
/// side. Exposed so self-play can drive both sides of the board.
#[instrument(skip(board))]
pub fn best_move_for(board: &Board, player: Player) -> usize {
    debug_assert!(
        winning_line(board).is_none(),
        "search invoked on a decided board"
    );

    let candidates = board.empty_positions();
    debug_assert!(!candidates.is_empty(), "search invoked on a full board");

    // Scratch board shared across the whole search: place, recurse,
    // undo, on every path.
    let mut scratch = board.clone();
    let mut best = candidates[0];
    let mut best_score = i32::MIN;

    for &pos in &candidates {
        scratch.set(pos, Square::Occupied(player));
        let score = minimax(&mut scratch, player.opponent(), 1, player);
        scratch.set(pos, Square::Empty);

        debug!(pos, score, "Scored candidate move");

        if score > best_score {
            best_score = score;
            best = pos;
        }
    }

    debug!(best, best_score, "Best move selected");
    best
}

/// Scores the board for `maximizer` with `to_move` next to play at the
/// given ply depth.
fn minimax(scratch: &mut Board, to_move: Player, depth: i32, maximizer: Player) -> i32 {
    if let Some((winner, _)) = winning_line(scratch) {
        return if winner == maximizer {
            10 - depth
        } else {
            depth - 10
        };
    }
    if scratch.is_full() {
        return 0;
    }

    if to_move == maximizer {
        let mut best = i32::MIN;
        for pos in 0..9 {
            if scratch.is_empty(pos) {
                scratch.set(pos, Square::Occupied(to_move));
                best = best.max(minimax(scratch, to_move.opponent(), depth + 1, maximizer));
                scratch.set(pos, Square::Empty);
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for pos in 0..9 {
            if scratch.is_empty(pos) {
                scratch.set(pos, Square::Occupied(to_move));
                best = best.min(minimax(scratch, to_move.opponent(), depth + 1, maximizer));
                scratch.set(pos, Square::Empty);
            }
        }
        best
    }
}
