use alloc::collections::VecDeque;
use ndarray::Array2;

use crate::*;

/// Breadth-first search over orthogonal neighbors. Obstacles and cells outside the grid block
/// the way; `Start`, `End`, and `Empty` are walkable. Never mutates `cells`.
pub fn is_reachable(cells: &Array2<Cell>, from: Coord2, to: Coord2) -> bool {
    let walkable = |coords: Coord2| {
        cells
            .get(coords.to_nd_index())
            .is_some_and(|cell| cell.is_walkable())
    };

    if !walkable(from) {
        return false;
    }

    let mut visited: Array2<bool> = Array2::default(cells.dim());
    let mut to_visit = VecDeque::from([from]);
    visited[from.to_nd_index()] = true;

    while let Some(visit_coords) = to_visit.pop_front() {
        if visit_coords == to {
            return true;
        }

        for pos in cells.iter_neighbors(visit_coords) {
            if visited[pos.to_nd_index()] || !walkable(pos) {
                continue;
            }
            visited[pos.to_nd_index()] = true;
            to_visit.push_back(pos);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_board(obstacles: &[Coord2]) -> Board {
        Board::from_coords(5, (0, 0), (0, 4), obstacles).unwrap()
    }

    #[test]
    fn wall_with_gap_is_passable() {
        let board = wall_board(&[(0, 1), (1, 1), (2, 1), (3, 1)]);

        assert!(is_reachable(board.cells(), (0, 0), (0, 4)));
        assert!(board.has_path());
    }

    #[test]
    fn closing_the_gap_cuts_the_path() {
        let board = wall_board(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]);

        assert!(!is_reachable(board.cells(), (0, 0), (0, 4)));
        assert!(!board.has_path());
    }

    #[test]
    fn repeated_queries_agree() {
        let board = wall_board(&[(0, 1), (1, 1), (2, 1), (3, 1)]);
        let before = board.clone();

        let first = is_reachable(board.cells(), board.start(), board.end());
        let second = is_reachable(board.cells(), board.start(), board.end());

        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn obstacle_or_outside_endpoints_are_unreachable() {
        let board = wall_board(&[(2, 2)]);

        assert!(!is_reachable(board.cells(), (0, 0), (2, 2)));
        assert!(!is_reachable(board.cells(), (2, 2), (0, 0)));
        assert!(!is_reachable(board.cells(), (0, 0), (9, 9)));
        assert!(!is_reachable(board.cells(), (9, 9), (0, 0)));
    }

    #[test]
    fn cell_reaches_itself() {
        let board = wall_board(&[]);

        assert!(is_reachable(board.cells(), (3, 3), (3, 3)));
    }
}
