//! Per-tick systems run by the arena and the engine.

pub mod camera;
pub mod markers;
pub mod movement;
