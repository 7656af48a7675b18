//! Turn orchestrator: sequences validation, mutation, evaluation, and
//! the AI response into one atomic turn, reporting every stage to the
//! registered observers.

use crate::events::{AgentEvent, AgentName, Observers, Phase, SubscriberId};
use crate::game::evaluate;
use crate::search::{AI_MARK, best_move};
use crate::state::{GameSnapshot, GameStore};
use crate::validate::validate;
use derive_getters::Getters;
use serde::Serialize;
use serde_json::json;
use std::sync::Mutex;
use tracing::{info, instrument, warn};

/// Outcome of one processed turn.
///
/// On rejection `error` is set and the state is the unmodified
/// snapshot. Otherwise `state` reflects the board after the human move
/// and, when the game was still ongoing, the AI's reply; `ai_move` is
/// absent when the game ended before the AI could move.
#[derive(Debug, Clone, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TurnReport {
    /// Snapshot after the turn.
    state: GameSnapshot,
    /// Completed line, if this turn ended the game with a win.
    #[serde(rename = "winLine")]
    win_line: Option<[usize; 3]>,
    /// Position the AI played, if it moved this turn.
    ai_move: Option<usize>,
    /// Rejection reason, if the move was refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TurnReport {
    /// True if the proposed move was rejected.
    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Sequences a complete turn over an injected [`GameStore`].
///
/// The store sits behind a mutex and each turn runs to completion
/// while holding it, so a half-applied turn can never be observed by
/// another caller. Event emission is best-effort and never affects
/// the pipeline result.
#[derive(Debug)]
pub struct Orchestrator {
    store: Mutex<GameStore>,
    observers: Observers,
}

impl Orchestrator {
    /// Creates an orchestrator over a fresh game.
    pub fn new() -> Self {
        Self::with_store(GameStore::new())
    }

    /// Creates an orchestrator over an existing store.
    pub fn with_store(store: GameStore) -> Self {
        Self {
            store: Mutex::new(store),
            observers: Observers::new(),
        }
    }

    /// Registers an event observer.
    pub fn subscribe(
        &self,
        handler: impl Fn(&AgentEvent) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.observers.subscribe(handler)
    }

    /// Removes a previously registered observer.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the current state without side effects.
    pub fn state(&self) -> GameSnapshot {
        self.store.lock().unwrap().snapshot()
    }

    fn emit(
        &self,
        agent: AgentName,
        phase: Phase,
        message: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) {
        self.observers
            .emit(&AgentEvent::new(agent, phase, message, payload));
    }

    /// Processes one full turn: validate, apply the human move, check
    /// for a terminal outcome, and if the game continues let the AI
    /// reply and check again.
    ///
    /// A rejected move leaves the state untouched and returns the
    /// rejection reason; the AI never moves after a game-ending human
    /// move.
    #[instrument(skip(self))]
    pub fn process_turn(&self, position: Option<i64>) -> TurnReport {
        let mut store = self.store.lock().unwrap();
        let player = store.current_player();
        let requested = position.map_or_else(|| "none".to_string(), |p| p.to_string());

        info!(?position, %player, "Turn started");
        self.emit(
            AgentName::Orchestrator,
            Phase::Started,
            format!("Turn started: player {player} -> position {requested}"),
            Some(json!({ "player": player, "position": position })),
        );

        // Stage 1: validate.
        self.emit(
            AgentName::Validation,
            Phase::Started,
            format!("Validating position {requested} for player {player}..."),
            None,
        );

        let pos = match validate(store.board(), position, player, store.status()) {
            Ok(pos) => pos,
            Err(reason) => {
                warn!(%reason, "Move rejected");
                self.emit(
                    AgentName::Validation,
                    Phase::Failed,
                    format!("Rejected: {reason}"),
                    None,
                );
                self.emit(
                    AgentName::Orchestrator,
                    Phase::Failed,
                    format!("Move rejected: {reason}"),
                    None,
                );
                return TurnReport {
                    state: store.snapshot(),
                    win_line: None,
                    ai_move: None,
                    error: Some(reason.to_string()),
                };
            }
        };
        self.emit(
            AgentName::Validation,
            Phase::Succeeded,
            "Move is valid, proceeding",
            None,
        );

        // Stage 2: apply the human move.
        self.emit(
            AgentName::StateManager,
            Phase::Started,
            format!("Placing '{player}' at position {pos}..."),
            None,
        );
        store.apply_move(pos, player);
        self.emit(
            AgentName::StateManager,
            Phase::Succeeded,
            format!("Board updated: '{player}' placed at position {pos}"),
            Some(json!({ "position": pos, "player": player })),
        );

        // Stage 3: evaluate after the human move.
        self.emit(
            AgentName::GameLogic,
            Phase::Started,
            "Scanning all 8 win lines for a winner...",
            None,
        );
        let eval = evaluate(store.board());

        if eval.is_terminal() {
            store.set_result(eval.status, eval.winner, eval.winning_line);
            let message = match eval.winner {
                Some(winner) => {
                    let line = eval.winning_line.unwrap_or_default();
                    format!("Player '{winner}' wins via {line:?}!")
                }
                None => "Draw: all cells filled, no winner!".to_string(),
            };
            info!(status = %eval.status, "Game over after player move");
            self.emit(
                AgentName::GameLogic,
                Phase::Succeeded,
                message,
                Some(json!({ "status": eval.status, "winner": eval.winner })),
            );
            self.emit(
                AgentName::Orchestrator,
                Phase::Succeeded,
                format!("Game over: {}", eval.status),
                None,
            );
            return TurnReport {
                state: store.snapshot(),
                win_line: eval.winning_line,
                ai_move: None,
                error: None,
            };
        }
        self.emit(
            AgentName::GameLogic,
            Phase::Succeeded,
            "No winner yet, game continues",
            None,
        );

        // Stage 4: the AI picks its move on a private copy of the board.
        self.emit(
            AgentName::Ai,
            Phase::Started,
            "Running minimax to find the optimal move...",
            None,
        );
        let scratch = store.board().clone();
        let ai_pos = best_move(&scratch);
        self.emit(
            AgentName::Ai,
            Phase::Succeeded,
            format!("Optimal move selected: position {ai_pos}"),
            Some(json!({ "position": ai_pos })),
        );

        // Stage 5: apply the AI move.
        self.emit(
            AgentName::StateManager,
            Phase::Started,
            format!("Placing '{AI_MARK}' (AI) at position {ai_pos}..."),
            None,
        );
        store.apply_move(ai_pos, AI_MARK);
        self.emit(
            AgentName::StateManager,
            Phase::Succeeded,
            format!("Board updated: '{AI_MARK}' (AI) placed at position {ai_pos}"),
            Some(json!({ "position": ai_pos, "player": AI_MARK })),
        );

        // Stage 6: evaluate after the AI move.
        self.emit(
            AgentName::GameLogic,
            Phase::Started,
            "Scanning all 8 win lines after the AI move...",
            None,
        );
        let eval = evaluate(store.board());

        if eval.is_terminal() {
            store.set_result(eval.status, eval.winner, eval.winning_line);
            let message = match eval.winner {
                Some(winner) => {
                    let line = eval.winning_line.unwrap_or_default();
                    format!("AI ('{winner}') wins via {line:?}!")
                }
                None => "Draw after AI move!".to_string(),
            };
            info!(status = %eval.status, "Game over after AI move");
            self.emit(
                AgentName::GameLogic,
                Phase::Succeeded,
                message,
                Some(json!({ "status": eval.status, "winner": eval.winner })),
            );
        } else {
            self.emit(
                AgentName::GameLogic,
                Phase::Succeeded,
                "Game ongoing after AI move, your turn!",
                None,
            );
        }

        info!(ai_move = ai_pos, status = %eval.status, "Turn complete");
        self.emit(
            AgentName::Orchestrator,
            Phase::Succeeded,
            "Turn complete, returning updated state",
            None,
        );

        TurnReport {
            state: store.snapshot(),
            win_line: eval.winning_line,
            ai_move: Some(ai_pos),
            error: None,
        }
    }

    /// Resets the game to its initial state, reporting the reset as a
    /// two-stage pipeline with no validation.
    #[instrument(skip(self))]
    pub fn reset_turn(&self) -> GameSnapshot {
        let mut store = self.store.lock().unwrap();

        info!("Game reset requested");
        self.emit(
            AgentName::Orchestrator,
            Phase::Started,
            "Resetting game state...",
            None,
        );
        self.emit(
            AgentName::StateManager,
            Phase::Started,
            "Clearing board and resetting all state...",
            None,
        );
        let snapshot = store.reset();
        self.emit(
            AgentName::StateManager,
            Phase::Succeeded,
            "Board cleared, all state reset to initial",
            None,
        );
        self.emit(
            AgentName::Orchestrator,
            Phase::Succeeded,
            "New game ready: player X goes first",
            None,
        );
        snapshot
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
