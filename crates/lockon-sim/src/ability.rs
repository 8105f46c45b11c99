//! Toggle front end: one activation starts a lock, the next releases it.

use tracing::{debug, warn};

use lockon_core::config::LockConfig;
use lockon_core::enums::EndReason;
use lockon_core::error::LockError;
use lockon_core::events::TickOutcome;
use lockon_core::host::{LockHost, OrientationSink};
use lockon_core::types::ActorId;

use crate::session::LockSession;

/// What an activation did.
#[derive(Debug)]
pub enum Activation {
    /// A session started and holds this target.
    Locked(ActorId),
    /// A running lock was released.
    Released,
    /// Selection ran but found nothing.
    NoTarget,
    /// The session could not start.
    Failed(LockError),
}

/// Gameplay capability owning at most one lock session for an owner actor.
#[derive(Debug)]
pub struct TargetLockAbility {
    config: LockConfig,
    owner: ActorId,
    camera: Option<ActorId>,
    session: Option<LockSession>,
}

impl TargetLockAbility {
    /// The camera is looked up from the owner on each activation.
    pub fn new(config: LockConfig, owner: ActorId) -> Self {
        Self {
            config,
            owner,
            camera: None,
            session: None,
        }
    }

    /// Use a fixed camera instead of the owner's attached one.
    pub fn with_camera(mut self, camera: ActorId) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn activate<H: LockHost + ?Sized>(&mut self, host: &mut H) -> Activation {
        if let Some(mut session) = self.session.take() {
            if session.is_active() {
                session.end(host, EndReason::Stopped);
                return Activation::Released;
            }
        }

        let Some(camera) = self.camera.or_else(|| host.camera_of(self.owner)) else {
            warn!(owner = self.owner.0, "no camera attached to owner");
            return Activation::Failed(LockError::MissingCollaborator("camera"));
        };

        match LockSession::begin(self.config.clone(), camera, self.owner, host) {
            Ok(session) => match session.target() {
                Some(target) => {
                    self.session = Some(session);
                    Activation::Locked(target)
                }
                None => {
                    debug!(owner = self.owner.0, "activation found no target");
                    Activation::NoTarget
                }
            },
            Err(err) => Activation::Failed(err),
        }
    }

    /// Forward one tick to the running session. `None` when nothing is locked.
    pub fn tick<H, C>(
        &mut self,
        host: &mut H,
        controller: &mut C,
        delta_secs: f64,
    ) -> Option<TickOutcome>
    where
        H: LockHost + ?Sized,
        C: OrientationSink + ?Sized,
    {
        let session = self.session.as_mut()?;
        let outcome = session.tick(host, controller, delta_secs);
        if outcome.is_terminal() {
            self.session = None;
        }
        Some(outcome)
    }

    pub fn is_locking_on_target(&self) -> bool {
        self.session.as_ref().is_some_and(LockSession::is_active)
    }

    pub fn session(&self) -> Option<&LockSession> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }
}
