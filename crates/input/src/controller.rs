//! Frame-driven input-timing controller: DAS/ARR, soft drop, gravity.
//!
//! Not a passive dispatcher. Each frame the controller accumulates
//! elapsed time against the held-key state and converts it into discrete
//! engine calls:
//!
//! - Horizontal: below the DAS threshold only the key-down edge moves the
//!   piece; past it, `steps = floor((held - DAS) / ARR)` repeats are
//!   drained per frame and the accumulator keeps only the remainder, so a
//!   single long frame emits exactly the right number of moves instead of
//!   tunneling.
//! - Soft drop: same accumulator against a fixed interval, capped per
//!   frame as a runaway-loop safeguard.
//! - Gravity: separate accumulator against the level's exponential curve;
//!   independent of input.
//! - Rotation, hold, and hard drop are edge-triggered exactly once per
//!   physical key-down (callers filter OS key-repeat events).
//!
//! The controller only ever sees a frame delta. Across a pause the caller
//! re-anchors its clock so the first resumed delta does not contain the
//! paused wall time.

use arrayvec::ArrayVec;
use tracing::trace;

use tetrion_core::{gravity_interval_ms, PlayfieldEngine};
use tetrion_types::{
    GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_INTERVAL_MS, SOFT_DROP_MAX_STEPS,
};

/// Actions applied during one frame, for observers and tests. Engine
/// calls are never dropped; only this report is bounded.
pub type FrameActions = ArrayVec<GameAction, 64>;

/// DAS/ARR/soft-drop thresholds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    pub das_ms: f64,
    pub arr_ms: f64,
    pub soft_drop_interval_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
        }
    }
}

/// Hold state of one directional key.
#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    held: bool,
    held_ms: f64,
    repeat_acc: f64,
}

impl HeldKey {
    /// Returns true on a fresh press edge (key was up).
    fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        *self = Self {
            held: true,
            ..Self::default()
        };
        true
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    /// Accumulate `dt_ms` and return the repeat steps owed this frame.
    fn advance(&mut self, dt_ms: f64, threshold_ms: f64, interval_ms: f64) -> u32 {
        if !self.held {
            return 0;
        }
        let before = self.held_ms;
        self.held_ms += dt_ms;
        if self.held_ms <= threshold_ms {
            return 0;
        }
        // Only time past the threshold feeds the repeat accumulator; the
        // frame that crosses it contributes just the excess.
        let excess = if before < threshold_ms {
            self.held_ms - threshold_ms
        } else {
            dt_ms
        };
        self.repeat_acc += excess;
        let steps = (self.repeat_acc / interval_ms).floor() as u32;
        self.repeat_acc -= f64::from(steps) * interval_ms;
        steps
    }
}

/// Translates held-key state into discrete engine calls, one frame at a
/// time.
#[derive(Debug, Clone, Default)]
pub struct InputTimingController {
    config: TimingConfig,
    left: HeldKey,
    right: HeldKey,
    down: HeldKey,
    gravity_acc: f64,
}

impl InputTimingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TimingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> TimingConfig {
        self.config
    }

    /// Handle a physical key-down transition. Directional keys move once
    /// on the edge and start their hold timers; everything else fires the
    /// engine action directly.
    pub fn key_down(&mut self, engine: &mut PlayfieldEngine, action: GameAction) {
        match action {
            GameAction::MoveLeft => {
                if self.left.press() {
                    engine.move_piece_left();
                }
            }
            GameAction::MoveRight => {
                if self.right.press() {
                    engine.move_piece_right();
                }
            }
            GameAction::SoftDrop => {
                if self.down.press() {
                    engine.move_piece_down();
                }
            }
            _ => {
                engine.apply_action(action);
            }
        }
    }

    pub fn key_up(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.left.release(),
            GameAction::MoveRight => self.right.release(),
            GameAction::SoftDrop => self.down.release(),
            _ => {}
        }
    }

    /// Run one frame: drain DAS/ARR repeats, soft-drop steps, gravity
    /// steps, then resolve lock-delay expiry. Returns the actions applied.
    pub fn frame(&mut self, engine: &mut PlayfieldEngine, dt_ms: f64) -> FrameActions {
        let mut applied = FrameActions::new();
        if engine.paused() || engine.game_over() {
            // Held timers freeze too; resuming must not replay the gap.
            return applied;
        }

        let steps = self
            .left
            .advance(dt_ms, self.config.das_ms, self.config.arr_ms);
        for _ in 0..steps {
            engine.move_piece_left();
            let _ = applied.try_push(GameAction::MoveLeft);
        }

        let steps = self
            .right
            .advance(dt_ms, self.config.das_ms, self.config.arr_ms);
        for _ in 0..steps {
            engine.move_piece_right();
            let _ = applied.try_push(GameAction::MoveRight);
        }

        let mut steps = self
            .down
            .advance(dt_ms, 0.0, self.config.soft_drop_interval_ms);
        if steps > SOFT_DROP_MAX_STEPS {
            steps = SOFT_DROP_MAX_STEPS;
            self.down.repeat_acc = 0.0;
        }
        for _ in 0..steps {
            engine.move_piece_down();
            let _ = applied.try_push(GameAction::SoftDrop);
        }

        self.gravity_acc += dt_ms;
        let interval = gravity_interval_ms(engine.level());
        let gravity_steps = (self.gravity_acc / interval).floor() as u32;
        self.gravity_acc -= f64::from(gravity_steps) * interval;
        for _ in 0..gravity_steps {
            engine.move_piece_down();
        }
        if gravity_steps > 1 {
            trace!(gravity_steps, dt_ms, "frame spike drained");
        }

        engine.tick(dt_ms);
        applied
    }

    /// Forget all held keys and accumulated time (focus loss, restart).
    pub fn reset(&mut self) {
        *self = Self {
            config: self.config,
            ..Self::default()
        };
    }
}
