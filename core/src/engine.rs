use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Result of a single transition: where the player ends up and what the game looks like after.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub player: Coord2,
    pub state: EngineState,
    pub outcome: MoveOutcome,
}

/// Pure transition function of the game.
///
/// Leaving the board is a silent no-op, stepping onto an obstacle loses without moving the
/// player, and reaching the end cell wins. Finished games accept no moves.
pub fn apply_move(
    state: EngineState,
    board: &Board,
    player: Coord2,
    direction: Direction,
) -> Result<Step> {
    if !state.is_playing() {
        return Err(GameError::AlreadyEnded);
    }

    let Some(candidate) = direction.step(player, board.bounds()) else {
        return Ok(Step {
            player,
            state,
            outcome: MoveOutcome::Blocked,
        });
    };

    Ok(if board.is_obstacle(candidate) {
        Step {
            player,
            state: EngineState::Lost,
            outcome: MoveOutcome::HitObstacle,
        }
    } else if candidate == board.end() {
        Step {
            player: candidate,
            state: EngineState::Won,
            outcome: MoveOutcome::Won,
        }
    } else {
        Step {
            player: candidate,
            state,
            outcome: MoveOutcome::Moved,
        }
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineRepr")]
pub struct PlayEngine {
    board: Board,
    player: Coord2,
    facing: Facing,
    state: EngineState,
}

#[derive(Deserialize)]
struct EngineRepr {
    board: Board,
    player: Coord2,
    facing: Facing,
    state: EngineState,
}

impl TryFrom<EngineRepr> for PlayEngine {
    type Error = GameError;

    /// The player has to stand on a walkable cell, and only a player on the end cell has won.
    fn try_from(repr: EngineRepr) -> Result<Self> {
        let mut engine = Self::with_player(repr.board, repr.player)?;
        if (repr.state == EngineState::Won) != engine.state.is_finished() {
            return Err(GameError::InvalidCoords);
        }
        engine.facing = repr.facing;
        engine.state = repr.state;
        Ok(engine)
    }
}

impl PlayEngine {
    /// Starts a game with the player on the start cell.
    pub fn new(board: Board) -> Self {
        let player = board.start();
        Self {
            board,
            player,
            facing: Default::default(),
            state: Default::default(),
        }
    }

    /// Starts a game with the player somewhere other than the start cell.
    pub fn with_player(board: Board, player: Coord2) -> Result<Self> {
        let player = board.validate_coords(player)?;
        if board.is_obstacle(player) {
            return Err(GameError::InvalidCoords);
        }
        let mut engine = Self::new(board);
        engine.player = player;
        if player == engine.board.end() {
            engine.state = EngineState::Won;
        }
        Ok(engine)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn start(&self) -> Coord2 {
        self.board.start()
    }

    pub fn end(&self) -> Coord2 {
        self.board.end()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords]
    }

    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let step = apply_move(self.state, &self.board, self.player, direction)?;

        if let Some(facing) = direction.facing() {
            self.facing = facing;
        }
        self.player = step.player;
        self.state = step.state;

        match step.outcome {
            MoveOutcome::Blocked => {
                log::trace!("{} from {:?} leaves the board", direction, self.player)
            }
            MoveOutcome::Moved => log::trace!("moved {} to {:?}", direction, self.player),
            MoveOutcome::HitObstacle => {
                log::debug!("hit an obstacle moving {} from {:?}", direction, self.player)
            }
            MoveOutcome::Won => log::debug!("reached the end at {:?}", self.player),
        }

        Ok(step.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord, start: Coord2, end: Coord2, obstacles: &[Coord2]) -> Board {
        Board::from_coords(size, start, end, obstacles).unwrap()
    }

    #[test]
    fn moves_off_the_board_are_ignored() {
        let mut engine = PlayEngine::new(board(7, (0, 0), (6, 4), &[]));

        assert_eq!(engine.apply_move(Direction::Up).unwrap(), MoveOutcome::Blocked);
        assert_eq!(engine.apply_move(Direction::Left).unwrap(), MoveOutcome::Blocked);

        assert_eq!(engine.player(), (0, 0));
        assert_eq!(engine.state(), EngineState::Playing);
    }

    #[test]
    fn obstacle_loses_without_moving() {
        let mut engine = PlayEngine::new(board(7, (0, 0), (6, 4), &[(1, 0)]));

        let outcome = engine.apply_move(Direction::Down).unwrap();

        assert_eq!(outcome, MoveOutcome::HitObstacle);
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.player(), (0, 0));
    }

    #[test]
    fn reaching_the_end_wins() {
        let board = board(7, (0, 0), (6, 4), &[]);
        let mut engine = PlayEngine::with_player(board, (6, 3)).unwrap();

        let outcome = engine.apply_move(Direction::Right).unwrap();

        assert_eq!(outcome, MoveOutcome::Won);
        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.player(), engine.end());
        assert!(engine.is_finished());
    }

    #[test]
    fn finished_games_reject_moves() {
        let mut engine = PlayEngine::new(board(3, (0, 0), (2, 2), &[(0, 1)]));
        engine.apply_move(Direction::Right).unwrap();

        assert_eq!(engine.apply_move(Direction::Down), Err(GameError::AlreadyEnded));
        assert_eq!(engine.player(), (0, 0));
        assert_eq!(engine.state(), EngineState::Lost);
    }

    #[test]
    fn walking_keeps_playing_and_markers_intact() {
        let mut engine = PlayEngine::new(board(3, (0, 0), (2, 2), &[]));

        assert_eq!(engine.apply_move(Direction::Right).unwrap(), MoveOutcome::Moved);
        assert_eq!(engine.apply_move(Direction::Left).unwrap(), MoveOutcome::Moved);

        assert_eq!(engine.player(), (0, 0));
        assert_eq!(engine.cell_at((0, 0)), Cell::Start);
        assert_eq!(engine.state(), EngineState::Playing);
    }

    #[test]
    fn horizontal_attempts_turn_the_player() {
        let mut engine = PlayEngine::new(board(3, (0, 0), (2, 2), &[]));
        assert_eq!(engine.facing(), Facing::Right);

        engine.apply_move(Direction::Left).unwrap();
        assert_eq!(engine.facing(), Facing::Left);

        engine.apply_move(Direction::Down).unwrap();
        assert_eq!(engine.facing(), Facing::Left);

        engine.apply_move(Direction::Right).unwrap();
        assert_eq!(engine.facing(), Facing::Right);
    }

    #[test]
    fn deserialize_restores_a_game_in_progress() {
        let mut engine = PlayEngine::new(board(3, (0, 0), (2, 2), &[(1, 1)]));
        engine.apply_move(Direction::Down).unwrap();
        engine.apply_move(Direction::Left).unwrap();

        let json = serde_json::to_string(&engine).unwrap();
        let restored: PlayEngine = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, engine);
        assert_eq!(restored.player(), (1, 0));
        assert_eq!(restored.facing(), Facing::Left);
    }

    #[test]
    fn deserialize_rejects_player_off_the_walkable_cells() {
        let engine = PlayEngine::new(board(3, (0, 0), (2, 2), &[(1, 1)]));
        let mut value = serde_json::to_value(&engine).unwrap();

        value["player"] = serde_json::json!([4, 0]);
        assert!(serde_json::from_value::<PlayEngine>(value.clone()).is_err());

        value["player"] = serde_json::json!([1, 1]);
        assert!(serde_json::from_value::<PlayEngine>(value.clone()).is_err());

        value["player"] = serde_json::json!([0, 1]);
        value["state"] = serde_json::json!("Won");
        assert!(serde_json::from_value::<PlayEngine>(value).is_err());
    }

    #[test]
    fn pure_transition_matches_engine() {
        let board = board(7, (0, 0), (6, 4), &[(1, 0)]);

        let step = apply_move(EngineState::Playing, &board, (0, 0), Direction::Down).unwrap();

        assert_eq!(
            step,
            Step {
                player: (0, 0),
                state: EngineState::Lost,
                outcome: MoveOutcome::HitObstacle,
            }
        );
        assert_eq!(
            apply_move(EngineState::Won, &board, (0, 0), Direction::Right),
            Err(GameError::AlreadyEnded)
        );
    }
}
