//! Facade over the tetrion workspace crates.
//!
//! The rules engine lives in [`core`], the frame-driven timing controller
//! in [`input`], and shared plain data in [`types`]. Presentation layers
//! (renderer, audio) consume [`core::Snapshot`] values and never touch
//! engine internals.

pub use tetrion_core as core;
pub use tetrion_input as input;
pub use tetrion_types as types;
