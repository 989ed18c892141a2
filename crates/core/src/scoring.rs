//! Scoring: line clears, combos, back-to-back, T-spins, all-clears.
//!
//! Behavior notes:
//! - `combo` uses a -1 sentinel: the first clear of a streak lands on 0
//!   and earns no bonus; bonuses start from the second consecutive clear.
//! - A placement that clears nothing and is not a T-spin resets the combo
//!   and returns no event; it does not touch `back_to_back`. Only a
//!   non-difficult clear breaks a back-to-back streak.
//! - The B2B multiplier (3/2, floored) applies to the base clear points
//!   only, never to combo or all-clear bonuses.
//! - `lines` is added before the base table is consulted, so points use
//!   the post-clear level.

use tetrion_types::{
    ClearEvent, TSpin, ALL_CLEAR_BASE, B2B_DENOMINATOR, B2B_NUMERATOR, BASE_GRAVITY_MS,
    COMBO_BASE, GRAVITY_DECAY, MIN_GRAVITY_MS,
};

/// Score/line/combo state. Mutated exclusively through [`update`]
/// (and [`reset`]); `score` and `lines` never decrease.
///
/// [`update`]: Self::update
/// [`reset`]: Self::reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    lines: u32,
    combo: i32,
    back_to_back: bool,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            combo: -1,
            back_to_back: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current level: one step per 10 cleared lines, starting at 1.
    pub fn level(&self) -> u32 {
        self.lines / 10 + 1
    }

    /// Combo index; -1 means no active streak.
    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    /// Score a locked placement.
    ///
    /// Returns `None` for an ordinary placement that cleared nothing -
    /// such placements are not evaluated for back-to-back at all. A
    /// zero-line T-spin is still a scored event and extends the combo.
    pub fn update(
        &mut self,
        lines_cleared: u32,
        tspin: TSpin,
        is_mini: bool,
        all_clear: bool,
    ) -> Option<ClearEvent> {
        let tspin = if is_mini && tspin == TSpin::Full {
            TSpin::Mini
        } else {
            tspin
        };

        if lines_cleared == 0 && tspin == TSpin::None {
            self.combo = -1;
            return None;
        }

        self.lines += lines_cleared;
        self.combo += 1;
        let level = self.level();

        let difficult = tspin != TSpin::None || lines_cleared == 4;
        let base = base_points(tspin, lines_cleared, level);
        let b2b_applied = difficult && self.back_to_back;
        let base = if b2b_applied {
            base.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
        } else {
            base
        };
        self.back_to_back = difficult;

        let combo_bonus = if self.combo > 0 {
            COMBO_BASE * self.combo as u32 * level
        } else {
            0
        };
        let all_clear_bonus = if all_clear { ALL_CLEAR_BASE * level } else { 0 };

        let points = base
            .saturating_add(combo_bonus)
            .saturating_add(all_clear_bonus);
        self.score = self.score.saturating_add(points);

        Some(ClearEvent {
            points,
            label: clear_label(tspin, lines_cleared),
            lines: lines_cleared,
            combo: self.combo,
            back_to_back: b2b_applied,
            all_clear,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

fn base_points(tspin: TSpin, lines: u32, level: u32) -> u32 {
    let base = match (tspin, lines) {
        (TSpin::Full, 0) => 400,
        (TSpin::Full, 1) => 800,
        (TSpin::Full, 2) => 1200,
        (TSpin::Full, 3) => 1600,
        (TSpin::Mini, 0) => 100,
        (TSpin::Mini, 1) => 200,
        (TSpin::Mini, 2) => 400,
        (TSpin::None, 1) => 100,
        (TSpin::None, 2) => 300,
        (TSpin::None, 3) => 500,
        (TSpin::None, 4) => 800,
        _ => 0,
    };
    base * level
}

fn clear_label(tspin: TSpin, lines: u32) -> &'static str {
    match (tspin, lines) {
        (TSpin::Full, 0) => "T-Spin",
        (TSpin::Full, 1) => "T-Spin Single",
        (TSpin::Full, 2) => "T-Spin Double",
        (TSpin::Full, 3) => "T-Spin Triple",
        (TSpin::Mini, 0) => "T-Spin Mini",
        (TSpin::Mini, 1) => "T-Spin Mini Single",
        (TSpin::Mini, 2) => "T-Spin Mini Double",
        (TSpin::None, 1) => "Single",
        (TSpin::None, 2) => "Double",
        (TSpin::None, 3) => "Triple",
        (TSpin::None, 4) => "Tetris",
        _ => "Clear",
    }
}

/// Gravity period for a level: `max(16, 1000 * 0.88^(level-1))` ms.
///
/// Exponential curve floored at ~one row per 60 Hz frame so gravity can
/// never outrun the frame rate.
pub fn gravity_interval_ms(level: u32) -> f64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (BASE_GRAVITY_MS * GRAVITY_DECAY.powi(exponent)).max(MIN_GRAVITY_MS)
}
