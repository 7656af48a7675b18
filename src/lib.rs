//! Tic-tac-toe agents library - an unbeatable opponent behind an
//! observable turn pipeline.
//!
//! # Architecture
//!
//! - **Game**: board types and pure rule functions (win and draw
//!   detection, outcome evaluation)
//! - **Validate**: legality checks for proposed moves
//! - **Search**: exhaustive minimax that can never be made to lose
//! - **State**: the single mutable record of the live game
//! - **Orchestrator**: sequences one full turn and reports every
//!   stage as an [`AgentEvent`] to registered observers
//!
//! # Example
//!
//! ```
//! use tictactoe_agents::Orchestrator;
//!
//! let orchestrator = Orchestrator::new();
//! let id = orchestrator.subscribe(|event| println!("[{}] {}", event.agent, event.message));
//!
//! let report = orchestrator.process_turn(Some(4));
//! assert!(!report.is_rejected());
//! assert!(report.ai_move().is_some());
//!
//! orchestrator.unsubscribe(id);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod events;
mod game;
mod orchestrator;
mod search;
mod state;
mod validate;

// Crate-level exports - domain types and rules
pub use game::{
    Board, Evaluation, GameStatus, Mark, Player, Square, WIN_LINES, evaluate, is_draw,
    winning_line,
};

// Crate-level exports - move validation
pub use validate::{RejectedMove, validate};

// Crate-level exports - search engine
pub use search::{AI_MARK, best_move, best_move_for};

// Crate-level exports - state holder
pub use state::{GameSnapshot, GameStore};

// Crate-level exports - events
pub use events::{AgentEvent, AgentName, Observers, Phase, SubscriberId};

// Crate-level exports - orchestrator
pub use orchestrator::{Orchestrator, TurnReport};
