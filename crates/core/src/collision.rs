//! Collision queries over playfield + piece geometry.
//!
//! Walls and floor are enforced for every row, including rows above the
//! visible field; playfield contents only collide at rows >= 0, which is
//! what lets a freshly spawned piece protrude above the top edge.
//!
//! Two interchangeable strategies sit behind the same predicate: a
//! bounding-box scan through the cell accessor, and a packed check that
//! tests the four absolute mino coordinates directly against the flat
//! byte buffer (the shape an accelerated oracle implements). They are
//! behaviorally identical; the scan is the default.

use arrayvec::ArrayVec;

use tetrion_types::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

use crate::piece::{compute_bounds, Piece};
use crate::playfield::{Playfield, PLAYFIELD_SIZE};

/// Backend used to answer occupancy queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionStrategy {
    /// Walk the piece's bounding box through the playfield accessor.
    #[default]
    Rowwise,
    /// Bulk-test the four absolute coordinates against the flat buffer.
    Packed,
}

/// Pure collision predicate over a playfield and a piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionDetector {
    strategy: CollisionStrategy,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: CollisionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> CollisionStrategy {
        self.strategy
    }

    /// True if the piece overlaps a wall, the floor, or a locked cell.
    pub fn collides(&self, field: &Playfield, piece: &Piece) -> bool {
        match self.strategy {
            CollisionStrategy::Rowwise => Self::collides_rowwise(field, piece),
            CollisionStrategy::Packed => Self::collides_packed(field, piece),
        }
    }

    fn collides_rowwise(field: &Playfield, piece: &Piece) -> bool {
        let blocks = piece.blocks();
        let bounds = compute_bounds(&blocks);

        for local_y in bounds.min_y..=bounds.max_y {
            for local_x in bounds.min_x..=bounds.max_x {
                if blocks.get(local_x, local_y) == 0 {
                    continue;
                }
                let x = piece.x + local_x as i8;
                let y = piece.y + local_y as i8;

                if x < 0 || x >= PLAYFIELD_WIDTH as i8 || y >= PLAYFIELD_HEIGHT as i8 {
                    return true;
                }
                if y >= 0 && field.is_occupied(x, y) {
                    return true;
                }
            }
        }
        false
    }

    fn collides_packed(field: &Playfield, piece: &Piece) -> bool {
        let blocks = piece.blocks();
        let mut coords: ArrayVec<(i8, i8), 4> = ArrayVec::new();
        for (local_x, local_y, _) in blocks.occupied() {
            coords.push((piece.x + local_x as i8, piece.y + local_y as i8));
        }
        check_cells(field.cells(), &coords)
    }

    /// Resting row for the piece: the last y reachable by repeated descent
    /// before the first collision. Non-mutating; the caller's piece keeps
    /// its original position.
    pub fn ghost_y(&self, field: &Playfield, piece: &Piece) -> i8 {
        let mut probe = *piece;
        loop {
            let below = Piece {
                y: probe.y + 1,
                ..probe
            };
            if self.collides(field, &below) {
                return probe.y;
            }
            probe.y = below.y;
        }
    }
}

/// Bulk occupancy check over the flat 10x20 byte buffer.
///
/// A coordinate hits if it is outside the column range, at or below the
/// floor row, or (for rows >= 0) already nonzero. Rows above the field
/// never hit. This is the exact contract an external accelerated oracle
/// must satisfy to substitute for the scan.
pub fn check_cells(cells: &[i8; PLAYFIELD_SIZE], coords: &[(i8, i8)]) -> bool {
    for &(x, y) in coords {
        if x < 0 || x >= PLAYFIELD_WIDTH as i8 || y >= PLAYFIELD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            continue;
        }
        if cells[(y as usize) * (PLAYFIELD_WIDTH as usize) + (x as usize)] != 0 {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrion_types::{PieceKind, ALL_KINDS};

    #[test]
    fn spawned_pieces_do_not_collide_on_an_empty_field() {
        let field = Playfield::new();
        let detector = CollisionDetector::new();
        for kind in ALL_KINDS {
            let piece = Piece::spawn(kind);
            assert!(!detector.collides(&field, &piece), "{kind:?} at spawn");
        }
    }

    #[test]
    fn walls_and_floor_are_enforced_above_the_field() {
        let field = Playfield::new();
        let detector = CollisionDetector::new();

        // I piece pushed past the left wall while still above row 0.
        let piece = Piece {
            x: -1,
            ..Piece::spawn(PieceKind::I)
        };
        assert!(detector.collides(&field, &piece));

        // Same piece inside the columns but above the field: no collision.
        let piece = Piece {
            y: -4,
            ..Piece::spawn(PieceKind::I)
        };
        assert!(!detector.collides(&field, &piece));
    }

    #[test]
    fn locked_cells_collide_only_at_visible_rows() {
        let mut field = Playfield::new();
        field.set_cell(4, 0, 7);
        let detector = CollisionDetector::new();

        // T spawn occupies rows -2/-1; the locked cell at row 0 is below it.
        let piece = Piece::spawn(PieceKind::T);
        assert!(!detector.collides(&field, &piece));

        // One row further down the nub overlaps the locked cell.
        let piece = Piece { y: -1, ..piece };
        assert!(detector.collides(&field, &piece));
    }

    #[test]
    fn ghost_y_rests_on_the_floor_and_restores_nothing() {
        let field = Playfield::new();
        let detector = CollisionDetector::new();
        let piece = Piece::spawn(PieceKind::I);

        // I occupies matrix row 1, so resting top-left row is 18.
        assert_eq!(detector.ghost_y(&field, &piece), 18);
        assert_eq!(piece.y, -2);
    }

    #[test]
    fn ghost_y_lands_on_the_stack() {
        let mut field = Playfield::new();
        for x in 0..PLAYFIELD_WIDTH as i8 {
            field.set_cell(x, 19, 1);
        }
        let detector = CollisionDetector::new();
        let piece = Piece::spawn(PieceKind::O);
        // O occupies matrix rows 1-2; it rests with its lowest row at 18.
        assert_eq!(detector.ghost_y(&field, &piece), 16);
    }

    #[test]
    fn strategies_agree_across_positions() {
        let mut field = Playfield::new();
        field.set_cell(5, 10, 3);
        field.set_cell(0, 19, 1);

        let scan = CollisionDetector::with_strategy(CollisionStrategy::Rowwise);
        let packed = CollisionDetector::with_strategy(CollisionStrategy::Packed);

        for kind in ALL_KINDS {
            for x in -3..(PLAYFIELD_WIDTH as i8 + 2) {
                for y in -3..(PLAYFIELD_HEIGHT as i8 + 2) {
                    let piece = Piece {
                        x,
                        y,
                        ..Piece::spawn(kind)
                    };
                    assert_eq!(
                        scan.collides(&field, &piece),
                        packed.collides(&field, &piece),
                        "{kind:?} at ({x},{y})"
                    );
                }
            }
        }
    }
}
