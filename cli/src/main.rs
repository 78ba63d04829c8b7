use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pathfinder_core::{BoardGenerator, GameSession, RandomBoardGenerator};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter as TracingLevel;
use web_time::Instant;

use crate::cli::{BoardArgs, Cli, Command};
use crate::render::BoardView;
use crate::settings::Settings;

mod cli;
mod play;
mod render;
mod settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose.log_level_filter());

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate { board, json } => {
            generate(&settings, board, json, io::stdout().lock())
        }
        Command::Play { board } => play(&settings, board),
    }
}

/// `RUST_LOG` wins over the `-v`/`-q` flags. `log` records from the core are bridged into the
/// subscriber.
fn init_logging(level: LevelFilter) {
    let level = match level {
        LevelFilter::Off => TracingLevel::OFF,
        LevelFilter::Error => TracingLevel::ERROR,
        LevelFilter::Warn => TracingLevel::WARN,
        LevelFilter::Info => TracingLevel::INFO,
        LevelFilter::Debug => TracingLevel::DEBUG,
        LevelFilter::Trace => TracingLevel::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();
}

fn generate<W: Write>(
    settings: &Settings,
    args: BoardArgs,
    json: bool,
    mut out: W,
) -> Result<()> {
    let config = settings.game_config(args.size)?;
    let seed = args.seed();

    let started = Instant::now();
    let board = RandomBoardGenerator::with_limits(seed, settings.limits)
        .generate(config)
        .with_context(|| format!("Failed to generate a board with seed {seed}"))?;
    log::info!("Generated board with seed {} in {:?}", seed, started.elapsed());

    if json {
        let text = serde_json::to_string_pretty(&board).context("Failed to serialize board")?;
        writeln!(out, "{text}")?;
    } else {
        write!(out, "{}", BoardView::new(&board))?;
        writeln!(out, "seed {seed}")?;
    }
    out.flush()?;
    Ok(())
}

fn play(settings: &Settings, args: BoardArgs) -> Result<()> {
    let config = settings.game_config(args.size)?;
    let seed = args.seed();
    log::info!("Starting a {0}x{0} game with seed {1}", config.size, seed);

    let mut session = GameSession::new(config, settings.limits, seed)
        .with_context(|| format!("Failed to generate a board with seed {seed}"))?;

    play::run(
        &mut session,
        settings.reset_delay(),
        io::stdin().lock(),
        io::stdout().lock(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_core::{Board, GameConfig};

    fn args(seed: u64, size: Option<u8>) -> BoardArgs {
        BoardArgs {
            seed: Some(seed),
            size,
        }
    }

    #[test]
    fn generate_json_matches_the_seeded_generator() {
        let settings = Settings::default();
        let mut out = Vec::new();

        generate(&settings, args(42, Some(9)), true, &mut out).unwrap();

        let board: Board = serde_json::from_slice(&out).unwrap();
        let expected = RandomBoardGenerator::with_limits(42, settings.limits)
            .generate(GameConfig::standard(9).unwrap())
            .unwrap();
        assert_eq!(board, expected);
        assert!(board.has_path());
    }

    #[test]
    fn generate_text_ends_with_the_seed() {
        let mut out = Vec::new();

        generate(&Settings::default(), args(7, None), false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().last(), Some("seed 7"));
    }

    #[test]
    fn generate_rejects_an_invalid_size() {
        let mut out = Vec::new();

        assert!(generate(&Settings::default(), args(1, Some(1)), true, &mut out).is_err());
        assert!(out.is_empty());
    }
}
