use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use pathfinder_core::{Command, GameSession, MoveOutcome, SessionEvent};

use crate::render::{BoardView, status_line};

const HELP: &str = "Reach E without touching #. Moves: up/down/left/right (or arrow key names), \
                    `reset` for a new board, `quit` to leave.";

/// Reads whitespace-separated commands line by line and applies them to `session`.
///
/// A game that ends on a line is shown, then after `reset_delay` a new board replaces it. `quit`
/// still applies the moves typed before it on the same line.
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    reset_delay: Duration,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "{HELP}")?;
    draw(session, &mut out)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let mut quit = false;

        for token in line.split_whitespace() {
            if matches!(token, "quit" | "q") {
                quit = true;
                break;
            }
            if let Err(err) = session.push_token(token) {
                writeln!(out, "{token}: {err}")?;
            }
        }

        let mut events = session.process();
        for event in &events {
            report(event, session, &mut out)?;
        }

        let game_over = events.iter().any(|event| {
            matches!(event, SessionEvent::Moved { outcome, .. } if outcome.is_terminal())
        });
        if game_over && !quit && session.needs_reset() {
            out.flush()?;
            std::thread::sleep(reset_delay);
            session.push(Command::Reset);
            let reset = session.process();
            for event in &reset {
                report(event, session, &mut out)?;
            }
            events.extend(reset);
        }

        if !events.is_empty() {
            draw(session, &mut out)?;
        }
        if quit {
            break;
        }
    }

    Ok(())
}

fn report<W: Write>(event: &SessionEvent, session: &GameSession, out: &mut W) -> Result<()> {
    match *event {
        SessionEvent::Moved { direction, outcome } if !outcome.has_update() => {
            log::debug!("{direction} would leave the board");
        }
        SessionEvent::Moved { outcome, .. } => match outcome {
            MoveOutcome::HitObstacle => writeln!(out, "Hit an obstacle! Resetting...")?,
            MoveOutcome::Won => {
                writeln!(out, "Congratulations! You found the path!")?;
                if session.journey_unlocked() {
                    writeln!(out, "Journey unlocked!")?;
                }
            }
            MoveOutcome::Blocked | MoveOutcome::Moved => {}
        },
        SessionEvent::Ignored { direction } => {
            log::debug!("{direction} ignored, the game is over");
        }
        SessionEvent::NewBoard => writeln!(out, "New board #{}", session.boards_generated())?,
        SessionEvent::ResetFailed { error } => writeln!(
            out,
            "Could not generate a new board: {error}. Type `reset` to try again."
        )?,
    }
    Ok(())
}

fn draw<W: Write>(session: &GameSession, out: &mut W) -> Result<()> {
    write!(out, "{}", BoardView::of_engine(session.engine()))?;
    writeln!(out, "{}", status_line(session.engine()))?;
    out.flush()?;
    Ok(())
}
