//! Reference host world for target lock.
//!
//! A hecs-backed arena of actors, cameras, occluders, and markers that
//! implements every collaborator trait the lock core needs, plus a headless
//! engine that drives either lock front end from a JSON scenario.

pub mod arena;
pub mod components;
pub mod controller;
pub mod engine;
pub mod raycast;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use arena::Arena;
pub use controller::PlayerController;
pub use engine::LockEngine;
pub use scenario::Scenario;
