use std::fmt;

use pathfinder_core::{Board, Cell, Coord2, EngineState, Facing, PlayEngine};

pub const fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Start => 'S',
        Cell::End => 'E',
        Cell::Obstacle => '#',
    }
}

pub const PLAYER: char = '@';

/// Text rendering of a board, one row per line, with the player drawn over its cell.
pub struct BoardView<'a> {
    board: &'a Board,
    player: Option<Coord2>,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            player: None,
        }
    }

    pub fn with_player(mut self, player: Coord2) -> Self {
        self.player = Some(player);
        self
    }

    pub fn of_engine(engine: &'a PlayEngine) -> Self {
        Self::new(engine.board()).with_player(engine.player())
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size();
        for row in 0..size {
            for col in 0..size {
                if col > 0 {
                    f.write_str(" ")?;
                }
                let ch = if self.player == Some((row, col)) {
                    PLAYER
                } else {
                    glyph(self.board[(row, col)])
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn status_line(engine: &PlayEngine) -> String {
    let facing = match engine.facing() {
        Facing::Left => "left",
        Facing::Right => "right",
    };
    let state = match engine.state() {
        EngineState::Playing => "playing",
        EngineState::Won => "won",
        EngineState::Lost => "lost",
    };
    let (row, col) = engine.player();
    format!("{state} | player at row {row}, col {col}, facing {facing}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_core::Direction;

    fn board() -> Board {
        Board::from_coords(3, (0, 0), (2, 2), &[(1, 1)]).unwrap()
    }

    #[test]
    fn renders_markers() {
        let text = BoardView::new(&board()).to_string();

        assert_eq!(text, "S . .\n. # .\n. . E\n");
    }

    #[test]
    fn player_covers_its_cell() {
        let mut engine = PlayEngine::new(board());
        engine.apply_move(Direction::Right).unwrap();

        let text = BoardView::of_engine(&engine).to_string();

        assert_eq!(text, "S @ .\n. # .\n. . E\n");
        assert_eq!(
            status_line(&engine),
            "playing | player at row 0, col 1, facing right"
        );
    }
}
