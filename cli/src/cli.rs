//! Command-line interface for the pathfinder minigame.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use pathfinder_core::Coord;

/// Pathfinder - walk a randomly generated maze from start to end
#[derive(Parser, Debug)]
#[command(name = "pathfinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML file with board, generation limit, and reset delay settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a single board and print it
    Generate {
        #[command(flatten)]
        board: BoardArgs,

        /// Print the board as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Play interactively, reading moves from stdin
    Play {
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct BoardArgs {
    /// Seed for board generation, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Side length of the board, overrides the config file
    #[arg(long)]
    pub size: Option<Coord>,
}

impl BoardArgs {
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
