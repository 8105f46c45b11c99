//! Target lock core.
//!
//! Selects the best nearby target for a camera and converges the controller
//! orientation toward it once per tick. Everything here is driven by an
//! externally pumped tick; the host supplies poses, queries, and the
//! controller through the traits in `lockon_core::host`.

pub mod ability;
pub mod convergence;
pub mod geometry;
pub mod latent;
pub mod los;
pub mod selector;
pub mod session;

pub use lockon_core as core;
pub use ability::{Activation, TargetLockAbility};
pub use latent::{LatentKey, LatentLockManager, LatentRequest};
pub use session::LockSession;
