//! abchess CLI - play chess against the alpha-beta engine
//!
//! Moves are entered in UCI notation (e2e4, e7e8q, e1g1). The engine answers
//! from its opening book while it can, then by searching.

mod play;
mod render;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use abchess_core::Color;

#[derive(Parser)]
#[command(name = "abchess")]
#[command(about = "Play chess against a minimax alpha-beta engine")]
pub struct Cli {
    /// Your color; the engine plays the other one (prompted if omitted)
    #[arg(long, value_enum)]
    pub color: Option<Side>,

    /// Engine search depth in plies (prompted if omitted)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Draw the board with ASCII letters instead of Unicode glyphs
    #[arg(long)]
    pub ascii: bool,

    /// Polyglot opening book
    #[arg(long, value_name = "FILE", conflicts_with = "no_book")]
    pub book: Option<PathBuf>,

    /// Never consult an opening book
    #[arg(long)]
    pub no_book: bool,

    /// Random seed for opening book choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Engine configuration JSON; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    pub fen: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    play::run(cli)
}
