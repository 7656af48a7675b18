//! Terminal client for tictactoe_agents.
//!
//! Plays a human (X) against the minimax AI (O) through the full agent
//! pipeline, optionally printing the live event trace. The `demo`
//! subcommand has the AI play itself to a draw.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use tictactoe_agents::{
    AgentEvent, GameStatus, GameStore, Orchestrator, Phase, Player, best_move_for,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Play { trace }) => run_play(trace),
        Some(Command::Demo) => run_demo(),
        None => run_play(false),
    }
}

/// Prints one agent event as a single trace line.
fn print_event(event: &AgentEvent) {
    let tag = match event.phase {
        Phase::Started => "..",
        Phase::Succeeded => "ok",
        Phase::Failed => "!!",
    };
    println!("  {tag} [{}] {}", event.agent, event.message);
}

/// Interactive game loop: read a position, run the pipeline, render.
fn run_play(trace: bool) -> Result<()> {
    let orchestrator = Orchestrator::new();
    if trace {
        orchestrator.subscribe(print_event);
    }

    println!("You are X; the AI is O. Enter a position (0-8), 'r' to reset, 'q' to quit.");
    render(&orchestrator);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "q" | "quit" => break,
            "r" | "reset" => {
                orchestrator.reset_turn();
                render(&orchestrator);
            }
            _ => {
                let position = input.parse::<i64>().ok();
                let report = orchestrator.process_turn(position);
                if let Some(error) = report.error() {
                    println!("{error}");
                    continue;
                }
                render(&orchestrator);

                let state = report.state();
                match state.status() {
                    GameStatus::Win => match state.winner() {
                        Some(Player::O) => println!("The AI wins. Enter 'r' for a rematch."),
                        _ => println!("You win! Enter 'r' to play again."),
                    },
                    GameStatus::Draw => println!("Draw. Enter 'r' to play again."),
                    GameStatus::Ongoing => {}
                }
            }
        }
    }

    Ok(())
}

/// AI vs AI self-play from the empty board; always ends in a draw.
fn run_demo() -> Result<()> {
    info!("Starting self-play demo");
    let mut store = GameStore::new();

    loop {
        let eval = tictactoe_agents::evaluate(store.board());
        if eval.is_terminal() {
            store.set_result(eval.status, eval.winner, eval.winning_line);
            break;
        }
        let player = store.current_player();
        let pos = best_move_for(store.board(), player);
        println!("{player} plays {pos}");
        store.apply_move(pos, player);
        println!("{}\n", store.board().display());
    }

    println!("Result: {}", store.status());
    Ok(())
}

/// Renders the current board.
fn render(orchestrator: &Orchestrator) {
    println!("{}\n", orchestrator.state().board().display());
}
