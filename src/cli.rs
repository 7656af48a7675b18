//! Command-line interface for tictactoe_agents.

use clap::{Parser, Subcommand};

/// Tic-tac-toe against an unbeatable minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_agents")]
#[command(about = "Play tic-tac-toe against an unbeatable AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively against the AI
    Play {
        /// Print the live agent event trace while playing
        #[arg(long)]
        trace: bool,
    },

    /// Watch the AI play itself to a draw
    Demo,
}
