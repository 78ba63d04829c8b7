use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::str::FromStr;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Input accepted by a [`GameSession`], queued and applied in order by [`GameSession::process`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    /// Throw the current board away and generate a new one.
    Reset,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self> {
        if token.trim().eq_ignore_ascii_case("reset") {
            Ok(Self::Reset)
        } else {
            token.parse().map(Self::Move)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Moved {
        direction: Direction,
        outcome: MoveOutcome,
    },
    /// The game had already ended when the move was dequeued.
    Ignored { direction: Direction },
    NewBoard,
    /// Generating the next board failed, the current one stays in play.
    ResetFailed { error: GameError },
}

/// Owned read view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub player: Coord2,
    pub facing: Facing,
    pub state: EngineState,
    pub journey_unlocked: bool,
}

/// One player's game: the current board and engine, the RNG that produced it, and the queue of
/// commands waiting to be applied.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    limits: GenerationLimits,
    rng: SmallRng,
    engine: PlayEngine,
    commands: VecDeque<Command>,
    journey_unlocked: bool,
    boards_generated: u32,
}

impl GameSession {
    /// Generates the first board right away, there is no session without a valid board.
    pub fn new(config: GameConfig, limits: GenerationLimits, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = generate_board(config, limits, &mut rng)?;
        Ok(Self::from_parts(config, limits, rng, PlayEngine::new(board)))
    }

    /// Starts from an existing engine; later resets draw boards from `seed`.
    pub fn from_engine(
        config: GameConfig,
        limits: GenerationLimits,
        seed: u64,
        engine: PlayEngine,
    ) -> Self {
        Self::from_parts(config, limits, SmallRng::seed_from_u64(seed), engine)
    }

    fn from_parts(
        config: GameConfig,
        limits: GenerationLimits,
        rng: SmallRng,
        engine: PlayEngine,
    ) -> Self {
        Self {
            config,
            limits,
            rng,
            engine,
            commands: VecDeque::new(),
            journey_unlocked: false,
            boards_generated: 1,
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Queues a textual command, either `reset` or a direction token.
    pub fn push_token(&mut self, token: &str) -> Result<()> {
        let command = token.parse()?;
        self.push(command);
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.commands.len()
    }

    /// Applies queued commands in order and reports what each one did.
    ///
    /// A failed reset ends the drain with [`SessionEvent::ResetFailed`]; the events before it are
    /// kept and the commands after it stay queued.
    pub fn process(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::with_capacity(self.commands.len());

        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::Move(direction) => events.push(self.apply_move(direction)),
                Command::Reset => match self.reset() {
                    Ok(()) => events.push(SessionEvent::NewBoard),
                    Err(error) => {
                        log::warn!("Reset failed, keeping the current board: {}", error);
                        events.push(SessionEvent::ResetFailed { error });
                        break;
                    }
                },
            }
        }

        events
    }

    fn apply_move(&mut self, direction: Direction) -> SessionEvent {
        match self.engine.apply_move(direction) {
            Ok(outcome) => {
                if outcome == MoveOutcome::Won {
                    self.journey_unlocked = true;
                }
                SessionEvent::Moved { direction, outcome }
            }
            Err(err) => {
                log::debug!("ignoring {}: {}", direction, err);
                SessionEvent::Ignored { direction }
            }
        }
    }

    /// Replaces the board with a freshly generated one. The old board stays if generation fails.
    pub fn reset(&mut self) -> Result<()> {
        let board = generate_board(self.config, self.limits, &mut self.rng)?;
        self.engine = PlayEngine::new(board);
        self.journey_unlocked = false;
        self.boards_generated = self.boards_generated.saturating_add(1);
        Ok(())
    }

    /// The game is over and the presentation layer should schedule a [`Command::Reset`].
    pub fn needs_reset(&self) -> bool {
        self.engine.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn player(&self) -> Coord2 {
        self.engine.player()
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn end(&self) -> Coord2 {
        self.engine.end()
    }

    pub fn journey_unlocked(&self) -> bool {
        self.journey_unlocked
    }

    pub fn boards_generated(&self) -> u32 {
        self.boards_generated
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.engine.board().clone(),
            player: self.engine.player(),
            facing: self.engine.facing(),
            state: self.engine.state(),
            journey_unlocked: self.journey_unlocked,
        }
    }
}
