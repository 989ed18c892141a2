use serde::Serialize;

use tetrion_types::{Phase, PieceKind, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

use crate::piece::Piece;
use crate::playfield::Playfield;
use crate::scoring::ScoreState;

/// Projected grid: locked cells (1-7), active piece overlay (1-7), ghost
/// markers as negated ids, 0 empty.
pub type SnapshotGrid = [[i8; PLAYFIELD_WIDTH as usize]; PLAYFIELD_HEIGHT as usize];

/// Read-only state handed to presentation consumers (renderer, audio).
/// The engine owns the live state; a snapshot is a value and never
/// reflects later mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid: SnapshotGrid,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub phase: Phase,
    pub game_over: bool,
}

impl Snapshot {
    pub(crate) fn project(
        field: &Playfield,
        active: &Piece,
        ghost_y: i8,
        next: PieceKind,
        held: Option<PieceKind>,
        scoring: &ScoreState,
        phase: Phase,
    ) -> Self {
        let width = PLAYFIELD_WIDTH as usize;
        let height = PLAYFIELD_HEIGHT as usize;

        let mut grid: SnapshotGrid = [[0; PLAYFIELD_WIDTH as usize]; PLAYFIELD_HEIGHT as usize];
        for (i, &cell) in field.cells().iter().enumerate() {
            grid[i / width][i % width] = cell;
        }

        let game_over = phase == Phase::GameOver;
        if !game_over {
            let blocks = active.blocks();

            // Ghost first, only onto empty cells; the active overlay wins.
            for (local_x, local_y, id) in blocks.occupied() {
                let x = active.x + local_x as i8;
                let y = ghost_y + local_y as i8;
                if (0..width as i8).contains(&x) && (0..height as i8).contains(&y) {
                    let cell = &mut grid[y as usize][x as usize];
                    if *cell == 0 {
                        *cell = -id;
                    }
                }
            }
            for (local_x, local_y, id) in blocks.occupied() {
                let x = active.x + local_x as i8;
                let y = active.y + local_y as i8;
                if (0..width as i8).contains(&x) && (0..height as i8).contains(&y) {
                    grid[y as usize][x as usize] = id;
                }
            }
        }

        Self {
            grid,
            score: scoring.score(),
            level: scoring.level(),
            lines: scoring.lines(),
            next,
            held,
            phase,
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PlayfieldEngine;

    #[test]
    fn ghost_markers_are_negated_ids_on_the_resting_rows() {
        let engine = PlayfieldEngine::new(42);
        let snapshot = engine.snapshot();
        let id = engine.active().kind.cell_id();

        let ghosts: usize = snapshot
            .grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == -id)
            .count();
        assert_eq!(ghosts, 4, "full ghost visible on an empty field");
        assert!(!snapshot.game_over);
    }

    #[test]
    fn active_cells_override_ghost_cells_when_overlapping() {
        let mut engine = PlayfieldEngine::new(42);
        // Drive the piece onto the floor so active and ghost coincide.
        while engine.move_piece_down() {}
        let snapshot = engine.snapshot();
        let id = engine.active().kind.cell_id();

        let active_cells = snapshot
            .grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == id)
            .count();
        let ghost_cells = snapshot
            .grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == -id)
            .count();
        assert_eq!(active_cells, 4);
        assert_eq!(ghost_cells, 0, "grounded piece leaves no ghost");
    }

    #[test]
    fn game_over_snapshot_shows_only_locked_cells() {
        let mut engine = PlayfieldEngine::new(42);
        for y in 0..2 {
            for x in 0..PLAYFIELD_WIDTH as i8 {
                engine.field_mut().set_cell(x, y, 1);
            }
        }
        engine.move_piece_down();
        engine.tick(tetrion_types::LOCK_DELAY_MS + 1.0);
        assert!(engine.game_over());

        let snapshot = engine.snapshot();
        assert!(snapshot.game_over);
        assert!(snapshot.grid.iter().flatten().all(|&cell| cell >= 0));
    }

    #[test]
    fn scalar_fields_mirror_the_engine() {
        let engine = PlayfieldEngine::new(7);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.score, engine.score());
        assert_eq!(snapshot.level, engine.level());
        assert_eq!(snapshot.lines, engine.lines());
        assert_eq!(snapshot.next, engine.next_kind());
        assert_eq!(snapshot.held, engine.held_kind());
    }
}
