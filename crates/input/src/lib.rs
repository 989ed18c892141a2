//! Input layer: real-time timing controller plus terminal key mapping.
//!
//! The controller is the per-frame driver of the rules engine - it owns
//! DAS/ARR, soft-drop, and gravity accumulation and issues the resulting
//! discrete engine calls. The map module is the thin crossterm seam that
//! turns key events into controller edges; it carries no timing logic.

pub mod controller;
pub mod map;

pub use tetrion_types as types;

pub use controller::{FrameActions, InputTimingController, TimingConfig};
pub use map::{action_for, is_quit};
