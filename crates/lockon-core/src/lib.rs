//! Core types and definitions for target lock.
//!
//! This crate defines the vocabulary shared across all other crates:
//! math types, configuration, session enums, tick signals, errors, and the
//! collaborator traits a host implements. It has no dependency on any
//! runtime, ECS, or physics framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod host;
pub mod types;

pub use config::LockConfig;
pub use error::LockError;

#[cfg(test)]
mod tests;
