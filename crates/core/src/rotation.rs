//! Super Rotation System: matrix rotation plus wall kicks.
//!
//! Reference: https://tetris.wiki/SRS
//!
//! Kick offsets are expressed in playfield coordinates (y grows downward)
//! and tried in priority order; the first entry of every list is (0, 0),
//! the bare rotation. A rotation for which every offset collides is
//! discarded in place - callers see an unchanged piece, not an error.

use tetrion_types::{PieceKind, RotationState};

use crate::collision::CollisionDetector;
use crate::piece::{Blocks, Piece};
use crate::playfield::Playfield;

/// Transpose-based 90 degree rotation of an N x N block matrix.
pub fn rotate_matrix(blocks: &Blocks, clockwise: bool) -> Blocks {
    let n = blocks.size();
    let mut rotated = Blocks::empty(n);
    for y in 0..n {
        for x in 0..n {
            let v = if clockwise {
                blocks.get(y, n - 1 - x)
            } else {
                blocks.get(n - 1 - y, x)
            };
            rotated.set(x, y, v);
        }
    }
    rotated
}

/// Kick lists for J/L/S/T/Z, indexed by [`kick_index`].
const JLSTZ_KICKS: [[(i8, i8); 5]; 8] = [
    // 0->1
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// Kick lists for the I piece (its own table in SRS).
const I_KICKS: [[(i8, i8); 5]; 8] = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// O-piece "table": rotation is the identity, nothing to kick.
const O_KICKS: [(i8, i8); 1] = [(0, 0)];

/// Table row for a from->to transition.
fn kick_index(from: RotationState, clockwise: bool) -> usize {
    match (from, clockwise) {
        (RotationState::Spawn, true) => 0,
        (RotationState::Spawn, false) => 1,
        (RotationState::Right, false) => 2,
        (RotationState::Right, true) => 3,
        (RotationState::Flipped, false) => 4,
        (RotationState::Flipped, true) => 5,
        (RotationState::Left, false) => 6,
        (RotationState::Left, true) => 7,
    }
}

/// Kick offsets to try, in priority order, for a from->to transition.
pub fn wall_kicks(kind: PieceKind, from: RotationState, to: RotationState) -> &'static [(i8, i8)] {
    let clockwise = to == from.cw();
    debug_assert!(clockwise || to == from.ccw(), "non-adjacent rotation");
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS[kick_index(from, clockwise)],
        _ => &JLSTZ_KICKS[kick_index(from, clockwise)],
    }
}

/// Rotate the piece with wall kicks.
///
/// Commits the first offset whose rotated placement is collision-free and
/// returns true; returns false with the piece untouched when every offset
/// collides.
pub fn try_rotate(
    field: &Playfield,
    detector: &CollisionDetector,
    piece: &mut Piece,
    clockwise: bool,
) -> bool {
    let from = piece.rotation;
    let to = if clockwise { from.cw() } else { from.ccw() };

    for &(dx, dy) in wall_kicks(piece.kind, from, to) {
        let candidate = Piece {
            rotation: to,
            x: piece.x + dx,
            y: piece.y + dy,
            ..*piece
        };
        if !detector.collides(field, &candidate) {
            *piece = candidate;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::spawn_blocks;
    use tetrion_types::{ALL_KINDS, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

    #[test]
    fn four_clockwise_rotations_are_identity() {
        for kind in ALL_KINDS {
            let original = spawn_blocks(kind);
            let mut blocks = original;
            for _ in 0..4 {
                blocks = rotate_matrix(&blocks, true);
            }
            assert_eq!(blocks, original, "{kind:?}");
        }
    }

    #[test]
    fn clockwise_then_counter_clockwise_is_identity() {
        for kind in ALL_KINDS {
            let original = spawn_blocks(kind);
            let rotated = rotate_matrix(&rotate_matrix(&original, true), false);
            assert_eq!(rotated, original, "{kind:?}");
        }
    }

    #[test]
    fn every_kick_list_starts_with_the_bare_rotation() {
        for kind in ALL_KINDS {
            for from in [
                RotationState::Spawn,
                RotationState::Right,
                RotationState::Flipped,
                RotationState::Left,
            ] {
                for to in [from.cw(), from.ccw()] {
                    let kicks = wall_kicks(kind, from, to);
                    assert_eq!(kicks[0], (0, 0));
                    assert!(!kicks.is_empty());
                }
            }
        }
    }

    #[test]
    fn free_rotation_commits_state_and_position() {
        let field = Playfield::new();
        let detector = CollisionDetector::new();
        let mut piece = Piece {
            y: 5,
            ..Piece::spawn(PieceKind::T)
        };

        assert!(try_rotate(&field, &detector, &mut piece, true));
        assert_eq!(piece.rotation, RotationState::Right);
        // Bare rotation in open space: no kick offset applied.
        assert_eq!((piece.x, piece.y), (3, 5));
    }

    #[test]
    fn blocked_rotation_is_a_silent_no_op() {
        let mut field = Playfield::new();
        // Box the T in completely so no kick can resolve.
        for y in 0..PLAYFIELD_HEIGHT {
            for x in 0..PLAYFIELD_WIDTH {
                field.set_cell(x as i8, y as i8, 1);
            }
        }
        // Carve out exactly the spawn-orientation T cells at (3, 10).
        field.set_cell(4, 10, 0);
        field.set_cell(3, 11, 0);
        field.set_cell(4, 11, 0);
        field.set_cell(5, 11, 0);

        let detector = CollisionDetector::new();
        let mut piece = Piece {
            x: 3,
            y: 10,
            ..Piece::spawn(PieceKind::T)
        };
        let before = piece;

        assert!(!try_rotate(&field, &detector, &mut piece, true));
        assert_eq!(piece, before);
        assert!(!try_rotate(&field, &detector, &mut piece, false));
        assert_eq!(piece, before);
    }

    #[test]
    fn o_piece_rotation_is_identity() {
        let field = Playfield::new();
        let detector = CollisionDetector::new();
        let mut piece = Piece {
            y: 10,
            ..Piece::spawn(PieceKind::O)
        };
        let cells_before = piece.blocks();

        assert!(try_rotate(&field, &detector, &mut piece, true));
        assert_eq!(piece.rotation, RotationState::Right);
        assert_eq!(piece.blocks(), cells_before);
        assert_eq!((piece.x, piece.y), (3, 10));
    }

    #[test]
    fn i_piece_wall_kick_off_the_left_wall() {
        let field = Playfield::new();
        let detector = CollisionDetector::new();
        // Vertical I hugging the left wall: Right-state column is local x=2,
        // so x=-2 puts the minos in column 0.
        let mut piece = Piece {
            x: -2,
            y: 5,
            rotation: RotationState::Right,
            ..Piece::spawn(PieceKind::I)
        };
        assert!(!detector.collides(&field, &piece));

        // Rotating to Flipped needs a kick; the bare rotation pokes out left.
        assert!(try_rotate(&field, &detector, &mut piece, true));
        assert_eq!(piece.rotation, RotationState::Flipped);
        assert!(piece.x > -2);
    }
}
