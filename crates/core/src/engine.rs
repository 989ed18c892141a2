//! Playfield engine: piece lifecycle orchestration.
//!
//! Composes the generator, collision detector, rotation system, and
//! scoring into the Falling -> Locking -> lock -> clear -> spawn cycle.
//! Illegal moves and rotations revert in place and are never surfaced as
//! errors; the only terminal condition is a lock above the visible field
//! or a blocked spawn, both of which end the game until an explicit
//! reset.
//!
//! The engine never reads a clock. Gravity and auto-repeat are driven by
//! the input-timing controller as discrete `move_piece_down` calls; the
//! engine's own [`tick`](PlayfieldEngine::tick) only resolves lock-delay
//! expiry from the frame time it is handed.

use std::mem;

use tracing::{debug, info};

use tetrion_types::{ClearEvent, GameAction, Phase, PieceKind, TSpin, LOCK_DELAY_MS};

use crate::collision::CollisionDetector;
use crate::generator::PieceGenerator;
use crate::piece::Piece;
use crate::playfield::Playfield;
use crate::rotation;
use crate::scoring::ScoreState;
use crate::snapshot::Snapshot;

/// The deterministic rules engine behind one game session.
#[derive(Debug, Clone)]
pub struct PlayfieldEngine {
    field: Playfield,
    detector: CollisionDetector,
    generator: PieceGenerator,
    scoring: ScoreState,
    phase: Phase,
    active: Piece,
    next: Piece,
    held: Option<Piece>,
    hold_used: bool,
    /// Remaining lock-delay grace, counted down only in `Locking`.
    lock_timer_ms: f64,
    last_action_was_rotate: bool,
    paused: bool,
    last_event: Option<ClearEvent>,
}

impl PlayfieldEngine {
    pub fn new(seed: u32) -> Self {
        Self::with_detector(seed, CollisionDetector::new())
    }

    /// Build with a specific collision strategy (the accelerated-oracle
    /// seam); behavior is identical either way.
    pub fn with_detector(seed: u32, detector: CollisionDetector) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let active = generator.next_piece();
        let next = generator.next_piece();
        Self {
            field: Playfield::new(),
            detector,
            generator,
            scoring: ScoreState::new(),
            phase: Phase::Falling,
            active,
            next,
            held: None,
            hold_used: false,
            lock_timer_ms: 0.0,
            last_action_was_rotate: false,
            paused: false,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next.kind
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held.map(|piece| piece.kind)
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    #[cfg(test)]
    pub fn field_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    fn playable(&self) -> bool {
        !self.paused && self.phase != Phase::GameOver
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let candidate = Piece {
            x: self.active.x + dx,
            y: self.active.y + dy,
            ..self.active
        };
        if self.detector.collides(&self.field, &candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// The piece cannot descend from its current position.
    fn grounded(&self) -> bool {
        let below = Piece {
            y: self.active.y + 1,
            ..self.active
        };
        self.detector.collides(&self.field, &below)
    }

    /// After a successful slide or rotation: restart the lock-delay grace
    /// if still grounded, or resume falling if the piece slid off a ledge.
    fn refresh_lock_state(&mut self) {
        if self.phase != Phase::Locking {
            return;
        }
        if self.grounded() {
            self.lock_timer_ms = LOCK_DELAY_MS;
        } else {
            self.phase = Phase::Falling;
            self.lock_timer_ms = 0.0;
        }
    }

    pub fn move_piece_left(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let moved = self.try_shift(-1, 0);
        if moved {
            self.last_action_was_rotate = false;
            self.refresh_lock_state();
        }
        moved
    }

    pub fn move_piece_right(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let moved = self.try_shift(1, 0);
        if moved {
            self.last_action_was_rotate = false;
            self.refresh_lock_state();
        }
        moved
    }

    /// Descend one row. Both gravity and soft drop arrive here; a rejected
    /// descent is what arms the lock-delay state, not a separate call.
    pub fn move_piece_down(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        if self.try_shift(0, 1) {
            self.last_action_was_rotate = false;
            self.phase = Phase::Falling;
            self.lock_timer_ms = 0.0;
            true
        } else {
            if self.phase == Phase::Falling {
                self.phase = Phase::Locking;
                self.lock_timer_ms = LOCK_DELAY_MS;
            }
            false
        }
    }

    /// Rotate with SRS wall kicks; a rotation no kick can place is
    /// discarded silently.
    pub fn rotate_piece(&mut self, clockwise: bool) -> bool {
        if !self.playable() {
            return false;
        }
        let rotated = rotation::try_rotate(&self.field, &self.detector, &mut self.active, clockwise);
        if rotated {
            self.last_action_was_rotate = true;
            self.refresh_lock_state();
        }
        rotated
    }

    /// Snap to the resting row and lock immediately, bypassing the
    /// remaining lock delay.
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let rest = self.detector.ghost_y(&self.field, &self.active);
        if rest != self.active.y {
            self.last_action_was_rotate = false;
            self.active.y = rest;
        }
        self.lock_active();
        true
    }

    /// Swap the active piece with the held one (or stash it and pull from
    /// the queue). Available once per piece; re-enabled by the next lock.
    pub fn hold(&mut self) -> bool {
        if !self.playable() || self.hold_used {
            return false;
        }
        let released = match self.held.take() {
            Some(mut piece) => {
                self.generator.reset_spawn(&mut piece);
                piece
            }
            None => mem::replace(&mut self.next, self.generator.next_piece()),
        };
        self.held = Some(self.active);
        self.active = released;
        self.hold_used = true;
        self.last_action_was_rotate = false;
        self.lock_timer_ms = 0.0;

        if self.detector.collides(&self.field, &self.active) {
            self.phase = Phase::GameOver;
            info!("game over: held piece cannot re-enter the field");
        } else {
            self.phase = Phase::Falling;
        }
        true
    }

    /// Advance frame time. Only the lock-delay countdown lives here; the
    /// caller re-anchors its clock across pauses so `dt_ms` never includes
    /// paused time.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.playable() {
            return;
        }
        if self.phase == Phase::Locking {
            self.lock_timer_ms -= dt_ms;
            if self.lock_timer_ms <= 0.0 {
                self.lock_active();
            }
        }
    }

    /// Merge the active piece, clear lines, score, and spawn the follower.
    fn lock_active(&mut self) {
        // Classify before merging; the piece's own cells are never its
        // corners, so occupancy around it is unchanged by the merge.
        let tspin = self.detect_t_spin();
        let blocks = self.active.blocks();

        for (_, local_y, _) in blocks.occupied() {
            if self.active.y + (local_y as i8) < 0 {
                self.phase = Phase::GameOver;
                info!(
                    score = self.scoring.score(),
                    lines = self.scoring.lines(),
                    "game over: piece locked above the field"
                );
                return;
            }
        }
        for (local_x, local_y, id) in blocks.occupied() {
            self.field
                .set_cell(self.active.x + local_x as i8, self.active.y + local_y as i8, id);
        }

        let cleared = self.field.clear_full_rows();
        let lines = cleared.len() as u32;
        let all_clear = lines > 0 && self.field.is_empty();

        let level_before = self.scoring.level();
        let event = self.scoring.update(lines, tspin, false, all_clear);
        if let Some(event) = &event {
            debug!(
                points = event.points,
                label = event.label,
                combo = event.combo,
                back_to_back = event.back_to_back,
                all_clear = event.all_clear,
                "scored placement"
            );
        }
        if self.scoring.level() > level_before {
            info!(level = self.scoring.level(), "level up");
        }
        self.last_event = event;

        self.active = mem::replace(&mut self.next, self.generator.next_piece());
        self.hold_used = false;
        self.last_action_was_rotate = false;
        self.lock_timer_ms = 0.0;

        if self.detector.collides(&self.field, &self.active) {
            self.phase = Phase::GameOver;
            info!(
                score = self.scoring.score(),
                lines = self.scoring.lines(),
                "game over: spawn blocked"
            );
        } else {
            self.phase = Phase::Falling;
        }
    }

    /// 3-corner T-spin test: at least three of the cells diagonally around
    /// the T's center must be blocked, and the last successful action must
    /// have been a rotation. Both corners on the side the nub points
    /// toward make it a full T-spin; otherwise it is a mini.
    fn detect_t_spin(&self) -> TSpin {
        use tetrion_types::RotationState;

        if self.active.kind != PieceKind::T || !self.last_action_was_rotate {
            return TSpin::None;
        }

        let blocked = |dx: i8, dy: i8| {
            let x = self.active.x + dx;
            let y = self.active.y + dy;
            if x < 0 || x >= self.field.width() as i8 || y >= self.field.height() as i8 {
                return true;
            }
            y >= 0 && self.field.is_occupied(x, y)
        };

        let corners = [(0, 0), (2, 0), (0, 2), (2, 2)];
        let filled = corners.iter().filter(|&&(dx, dy)| blocked(dx, dy)).count();
        if filled < 3 {
            return TSpin::None;
        }

        let front: [(i8, i8); 2] = match self.active.rotation {
            RotationState::Spawn => [(0, 0), (2, 0)],
            RotationState::Right => [(2, 0), (2, 2)],
            RotationState::Flipped => [(0, 2), (2, 2)],
            RotationState::Left => [(0, 0), (0, 2)],
        };
        if front.iter().all(|&(dx, dy)| blocked(dx, dy)) {
            TSpin::Full
        } else {
            TSpin::Mini
        }
    }

    /// Scoring event from the most recent lock, consumed by observers.
    pub fn take_last_event(&mut self) -> Option<ClearEvent> {
        self.last_event.take()
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Explicit full reset - the only way out of `GameOver`. Reuses the
    /// generator's current RNG state as the new seed.
    pub fn reset(&mut self) {
        let seed = self.generator.rng_state();
        let detector = self.detector;
        *self = Self::with_detector(seed, detector);
        info!(seed, "engine reset");
    }

    /// Apply a discrete action (controller edges and repeats land here).
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece_left(),
            GameAction::MoveRight => self.move_piece_right(),
            GameAction::SoftDrop => self.move_piece_down(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_piece(true),
            GameAction::RotateCcw => self.rotate_piece(false),
            GameAction::Hold => self.hold(),
            GameAction::Pause => {
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Immutable projection for presentation consumers.
    pub fn snapshot(&self) -> Snapshot {
        let ghost_y = self.detector.ghost_y(&self.field, &self.active);
        Snapshot::project(
            &self.field,
            &self.active,
            ghost_y,
            self.next.kind,
            self.held_kind(),
            &self.scoring,
            self.phase,
        )
    }
}
