//! Core rules engine - pure, deterministic, and presentation-free.
//!
//! Everything in this crate is synchronous computation over in-memory
//! state; there is no I/O, no clock, and no concurrency. The engine is
//! driven from outside, one frame at a time, and answers with an
//! immutable [`Snapshot`] for whatever renders or sonifies it.
//!
//! # Module structure
//!
//! - [`playfield`]: 10x20 flat-buffer grid with line clearing
//! - [`piece`]: block matrices, bounds, and the falling-piece state
//! - [`rng`] / [`generator`]: seeded randomness and the 7-bag queue
//! - [`collision`]: pure collision predicate with swappable strategies
//! - [`rotation`]: SRS matrix rotation and wall kicks
//! - [`scoring`]: clears, combos, back-to-back, T-spins, all-clears
//! - [`engine`]: the piece-lifecycle state machine composing the above
//! - [`snapshot`]: read-only projection with ghost overlay
//!
//! # Determinism
//!
//! A [`PlayfieldEngine`] seeded with the same value replays the same
//! piece sequence; combined with a recorded input trace this reproduces
//! a whole game, which is what the property tests lean on.

pub mod collision;
pub mod engine;
pub mod generator;
pub mod piece;
pub mod playfield;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use tetrion_types as types;

pub use collision::{CollisionDetector, CollisionStrategy};
pub use engine::PlayfieldEngine;
pub use generator::PieceGenerator;
pub use piece::{compute_bounds, kind_from_cell_id, Blocks, Bounds, Piece, UnknownPieceId};
pub use playfield::Playfield;
pub use rng::SeededRng;
pub use rotation::{rotate_matrix, try_rotate, wall_kicks};
pub use scoring::{gravity_interval_ms, ScoreState};
pub use snapshot::{Snapshot, SnapshotGrid};
