//! Shared types and constants for the tetrion engine.
//!
//! Pure data definitions with no game logic, usable from the rules engine,
//! the input-timing controller, and any external presentation layer.
//!
//! # Playfield dimensions
//!
//! Standard guideline playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19)
//! - Pieces spawn at `y = -2`, two rows above the visible field
//!
//! # Timing constants
//!
//! All timing values are in milliseconds of wall-clock frame time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DAS_MS` | 160 | Delayed auto shift threshold |
//! | `DEFAULT_ARR_MS` | 15 | Auto repeat rate once DAS has elapsed |
//! | `SOFT_DROP_INTERVAL_MS` | 30 | Interval between held soft-drop steps |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity period at level 1 |
//! | `MIN_GRAVITY_MS` | 16 | Gravity floor (~one step per 60 Hz frame) |

use serde::{Deserialize, Serialize};

/// Playfield width in columns.
pub const PLAYFIELD_WIDTH: u8 = 10;

/// Playfield height in visible rows.
pub const PLAYFIELD_HEIGHT: u8 = 20;

/// Spawn row for new pieces (two rows above the visible field).
pub const SPAWN_Y: i8 = -2;

/// Delayed auto shift: hold time before auto-repeat starts.
pub const DEFAULT_DAS_MS: f64 = 160.0;

/// Auto repeat rate: interval between repeated moves after DAS.
pub const DEFAULT_ARR_MS: f64 = 15.0;

/// Interval between soft-drop steps while the down key is held.
pub const SOFT_DROP_INTERVAL_MS: f64 = 30.0;

/// Upper bound on soft-drop steps emitted in a single frame.
pub const SOFT_DROP_MAX_STEPS: u32 = 20;

/// Lock delay once a piece is grounded.
pub const LOCK_DELAY_MS: f64 = 500.0;

/// Gravity period at level 1.
pub const BASE_GRAVITY_MS: f64 = 1000.0;

/// Per-level gravity decay factor (`period = 1000 * 0.88^(level-1)`).
pub const GRAVITY_DECAY: f64 = 0.88;

/// Gravity period floor.
pub const MIN_GRAVITY_MS: f64 = 16.0;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier on the base clear).
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator.
pub const B2B_DENOMINATOR: u32 = 2;

/// Combo bonus per combo step per level.
pub const COMBO_BASE: u32 = 50;

/// All-clear bonus per level.
pub const ALL_CLEAR_BASE: u32 = 2000;

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

/// All kinds in canonical bag order.
pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::J,
    PieceKind::L,
    PieceKind::O,
    PieceKind::S,
    PieceKind::T,
    PieceKind::Z,
];

impl PieceKind {
    /// The locked-cell id written into the playfield (1-7).
    pub fn cell_id(self) -> i8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`cell_id`](Self::cell_id). `None` for ids outside 1-7.
    pub fn from_cell_id(id: i8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// Orientation of a piece, stored as the single source of truth.
///
/// The oriented blocks matrix is always derived from (kind, rotation);
/// the two can never drift apart. Cycle: Spawn → Right → Flipped → Left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationState {
    Spawn = 0,
    Right = 1,
    Flipped = 2,
    Left = 3,
}

impl RotationState {
    /// Numeric state in {0,1,2,3}.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn cw(self) -> Self {
        match self {
            RotationState::Spawn => RotationState::Right,
            RotationState::Right => RotationState::Flipped,
            RotationState::Flipped => RotationState::Left,
            RotationState::Left => RotationState::Spawn,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            RotationState::Spawn => RotationState::Left,
            RotationState::Left => RotationState::Flipped,
            RotationState::Flipped => RotationState::Right,
            RotationState::Right => RotationState::Spawn,
        }
    }
}

/// Discrete actions the engine accepts.
///
/// Directional actions are also emitted repeatedly by the timing controller
/// while the mapped key is held; the rest are edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Restart,
}

/// T-spin classification of a lock, per the 3-corner rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TSpin {
    None,
    Mini,
    Full,
}

/// Piece lifecycle phase.
///
/// `Locking` is entered when a downward move is rejected; the piece may
/// still slide and rotate until the lock delay expires. `GameOver` is
/// terminal until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Falling,
    Locking,
    GameOver,
}

/// Event record returned by the scoring system for a scored placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearEvent {
    /// Points awarded for this placement (base x B2B + combo + all-clear).
    pub points: u32,
    /// Human-readable label ("Tetris", "T-Spin Double", ...).
    pub label: &'static str,
    /// Rows cleared by this placement.
    pub lines: u32,
    /// Combo index after this clear (0 = first clear of a streak).
    pub combo: i32,
    /// True only if this clear itself completed a back-to-back streak.
    pub back_to_back: bool,
    pub all_clear: bool,
}
