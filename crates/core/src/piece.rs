//! Piece geometry: oriented block matrices and the falling-piece state.
//!
//! A piece stores only (kind, position, rotation); the oriented N x N
//! matrix is derived on demand so the rotation integer and the matrix can
//! never disagree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tetrion_types::{PieceKind, RotationState, PLAYFIELD_WIDTH, SPAWN_Y};

use crate::rotation::rotate_matrix;

/// Error for cell ids that do not name a piece kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized piece cell id {0}")]
pub struct UnknownPieceId(pub i8);

/// Fail-fast conversion from a locked-cell id to a piece kind.
pub fn kind_from_cell_id(id: i8) -> Result<PieceKind, UnknownPieceId> {
    PieceKind::from_cell_id(id).ok_or(UnknownPieceId(id))
}

/// An N x N block matrix (N = 3 for J/L/S/T/Z, N = 4 for I/O).
///
/// Cell values are 0 (empty) or the owning kind's cell id, matching the
/// playfield encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocks {
    size: u8,
    cells: [[i8; 4]; 4],
}

impl Blocks {
    fn from_rows3(rows: [[i8; 3]; 3]) -> Self {
        let mut cells = [[0i8; 4]; 4];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..3].copy_from_slice(row);
        }
        Self { size: 3, cells }
    }

    fn from_rows4(cells: [[i8; 4]; 4]) -> Self {
        Self { size: 4, cells }
    }

    pub(crate) fn empty(size: u8) -> Self {
        Self {
            size,
            cells: [[0; 4]; 4],
        }
    }

    /// Matrix edge length.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at local (x, y). Callers stay within `0..size`.
    pub fn get(&self, x: u8, y: u8) -> i8 {
        self.cells[y as usize][x as usize]
    }

    pub(crate) fn set(&mut self, x: u8, y: u8, value: i8) {
        self.cells[y as usize][x as usize] = value;
    }

    /// Iterate occupied cells as (local_x, local_y, cell_id).
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8, i8)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |y| {
            (0..size).filter_map(move |x| {
                let v = self.get(x, y);
                (v != 0).then_some((x, y, v))
            })
        })
    }
}

/// Occupied bounding box of a block matrix, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u8,
    pub max_x: u8,
    pub min_y: u8,
    pub max_y: u8,
}

/// Bounding box of the occupied cells. Pure function of the matrix; no
/// per-piece state is cached.
pub fn compute_bounds(blocks: &Blocks) -> Bounds {
    let mut bounds = Bounds {
        min_x: blocks.size(),
        max_x: 0,
        min_y: blocks.size(),
        max_y: 0,
    };
    for (x, y, _) in blocks.occupied() {
        bounds.min_x = bounds.min_x.min(x);
        bounds.max_x = bounds.max_x.max(x);
        bounds.min_y = bounds.min_y.min(y);
        bounds.max_y = bounds.max_y.max(y);
    }
    bounds
}

/// Canonical spawn-orientation matrix for a kind.
pub fn spawn_blocks(kind: PieceKind) -> Blocks {
    match kind {
        PieceKind::I => Blocks::from_rows4([
            [0, 0, 0, 0],
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
        PieceKind::J => Blocks::from_rows3([[2, 0, 0], [2, 2, 2], [0, 0, 0]]),
        PieceKind::L => Blocks::from_rows3([[0, 0, 3], [3, 3, 3], [0, 0, 0]]),
        PieceKind::O => Blocks::from_rows4([
            [0, 0, 0, 0],
            [0, 4, 4, 0],
            [0, 4, 4, 0],
            [0, 0, 0, 0],
        ]),
        PieceKind::S => Blocks::from_rows3([[0, 5, 5], [5, 5, 0], [0, 0, 0]]),
        PieceKind::T => Blocks::from_rows3([[0, 6, 0], [6, 6, 6], [0, 0, 0]]),
        PieceKind::Z => Blocks::from_rows3([[7, 7, 0], [0, 7, 7], [0, 0, 0]]),
    }
}

/// Spawn column for a kind: matrix horizontally centered on the field.
pub fn spawn_x(kind: PieceKind) -> i8 {
    (PLAYFIELD_WIDTH as i8 - spawn_blocks(kind).size() as i8) / 2
}

/// A piece in play. Position is the playfield coordinate of the matrix's
/// top-left corner; `y` may be negative only while the piece is above the
/// visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: RotationState,
}

impl Piece {
    /// A kind's spawn-state piece: rotation 0, centered, two rows above
    /// the visible field.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            x: spawn_x(kind),
            y: SPAWN_Y,
            rotation: RotationState::Spawn,
        }
    }

    /// The oriented matrix for the current rotation, derived on demand.
    pub fn blocks(&self) -> Blocks {
        let mut blocks = spawn_blocks(self.kind);
        for _ in 0..self.rotation.index() {
            blocks = rotate_matrix(&blocks, true);
        }
        blocks
    }
}
