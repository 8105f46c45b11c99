//! Lock session state machine.
//!
//! `Idle -> Selecting -> {Active | Ended}`, then `Active -> Ended`. Selection
//! runs synchronously inside [`LockSession::begin`]; the caller then pumps
//! [`LockSession::tick`] once per frame until it reports `Terminated`.
//! `Ended` is terminal: the caller drops the session and builds a new one
//! to lock again.

use tracing::{info, warn};

use lockon_core::config::LockConfig;
use lockon_core::enums::{EndReason, SessionState};
use lockon_core::error::LockError;
use lockon_core::events::TickOutcome;
use lockon_core::host::{LockHost, MarkerSpawner, OrientationSink};
use lockon_core::types::{ActorId, MarkerHandle, Pose};

use crate::convergence::{self, ConvergenceContext};
use crate::los;
use crate::selector::{self, SelectionContext};

/// One run of the lock, from selection to termination.
#[derive(Debug)]
pub struct LockSession {
    config: LockConfig,
    camera: ActorId,
    owner: ActorId,
    state: SessionState,
    target: Option<ActorId>,
    marker: Option<MarkerHandle>,
    end_reason: Option<EndReason>,
    stop_requested: bool,
    ticks_active: u64,
}

impl LockSession {
    /// Validate, select a target, and enter `Active` or `Ended`.
    ///
    /// Fails without producing a session when the configuration is invalid or
    /// the camera/owner cannot be resolved. Finding no target is not an error:
    /// the returned session is already `Ended` with `NoEligibleTarget`.
    pub fn begin<H: LockHost + ?Sized>(
        config: LockConfig,
        camera: ActorId,
        owner: ActorId,
        host: &mut H,
    ) -> Result<Self, LockError> {
        let mut session = Self::new(config, camera, owner)?;
        let (camera_pose, owner_pose) = session.resolve_viewpoint(&*host)?;

        session.state = SessionState::Selecting;
        let ctx = SelectionContext {
            owner,
            owner_pose,
            camera_pose,
        };
        match selector::select_target(&*host, &ctx, &session.config) {
            Some(selection) => {
                info!(
                    target = selection.target.0,
                    distance = selection.distance,
                    angle = selection.angle,
                    "target lock acquired"
                );
                session.activate(host, selection.target);
            }
            None => session.end(host, EndReason::NoEligibleTarget),
        }
        Ok(session)
    }

    /// Like [`begin`](Self::begin) but with a caller-chosen target; selection is skipped.
    pub fn begin_with_target<H: LockHost + ?Sized>(
        config: LockConfig,
        camera: ActorId,
        owner: ActorId,
        target: ActorId,
        host: &mut H,
    ) -> Result<Self, LockError> {
        let mut session = Self::new(config, camera, owner)?;
        session.resolve_viewpoint(&*host)?;

        if host.is_valid(target) {
            info!(target = target.0, "target lock set explicitly");
            session.activate(host, target);
        } else {
            session.end(host, EndReason::LostTarget);
        }
        Ok(session)
    }

    fn new(config: LockConfig, camera: ActorId, owner: ActorId) -> Result<Self, LockError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejecting target lock configuration");
            return Err(err);
        }
        Ok(Self {
            config,
            camera,
            owner,
            state: SessionState::Idle,
            target: None,
            marker: None,
            end_reason: None,
            stop_requested: false,
            ticks_active: 0,
        })
    }

    fn resolve_viewpoint<H: LockHost + ?Sized>(&self, host: &H) -> Result<(Pose, Pose), LockError> {
        let Some(camera_pose) = host.pose(self.camera) else {
            warn!(camera = self.camera.0, "camera does not resolve");
            return Err(LockError::MissingCollaborator("camera"));
        };
        let Some(owner_pose) = host.pose(self.owner) else {
            warn!(owner = self.owner.0, "owner does not resolve");
            return Err(LockError::MissingCollaborator("owner"));
        };
        let finite = camera_pose.position.is_finite()
            && camera_pose.rotation.pitch.is_finite()
            && camera_pose.rotation.yaw.is_finite()
            && camera_pose.rotation.roll.is_finite();
        if !finite {
            return Err(LockError::invalid("camera", "pose is not finite"));
        }
        Ok((camera_pose, owner_pose))
    }

    fn activate<H: MarkerSpawner + ?Sized>(&mut self, host: &mut H, target: ActorId) {
        self.state = SessionState::Active;
        self.target = Some(target);
        if let Some(kind) = &self.config.visualize_marker {
            self.marker = host.spawn_marker(kind, target);
        }
    }

    /// Advance one tick: validate the target, run the convergence law, and
    /// apply the new orientation or end the session.
    ///
    /// Once ended, every call returns `Terminated` with the original reason.
    pub fn tick<H, C>(&mut self, host: &mut H, controller: &mut C, delta_secs: f64) -> TickOutcome
    where
        H: LockHost + ?Sized,
        C: OrientationSink + ?Sized,
    {
        if self.state != SessionState::Active {
            return TickOutcome::Terminated(self.end_reason.unwrap_or(EndReason::Stopped));
        }

        let Some(target) = self.target else {
            let reason = if self.stop_requested {
                EndReason::Stopped
            } else {
                EndReason::LostTarget
            };
            return self.terminate(host, reason);
        };
        let Some(target_pose) = host.pose(target) else {
            return self.terminate(host, EndReason::LostTarget);
        };
        let Some(camera_pose) = host.pose(self.camera) else {
            return self.terminate(host, EndReason::LostCamera);
        };

        let line_of_sight = if self.config.continuous_line_of_sight_check {
            let owner_pose = host.pose(self.owner);
            Some(los::visible_from_either(
                &*host,
                &camera_pose,
                owner_pose.as_ref(),
                target_pose.position,
                &[self.owner, target],
                self.config.line_of_sight_probe_distance,
            ))
        } else {
            None
        };

        let ctx = ConvergenceContext {
            camera_position: camera_pose.position,
            camera_forward: camera_pose.forward(),
            target_position: target_pose.position,
            control_rotation: controller.control_rotation(),
            delta_secs,
            line_of_sight,
        };

        let outcome = convergence::evaluate(&ctx, &self.config);
        match outcome {
            TickOutcome::Terminated(reason) => return self.terminate(host, reason),
            TickOutcome::Updated(update) => controller.set_control_rotation(update.rotation),
            TickOutcome::NoOp => {}
        }
        self.ticks_active += 1;
        outcome
    }

    fn terminate<H>(&mut self, host: &mut H, reason: EndReason) -> TickOutcome
    where
        H: MarkerSpawner + ?Sized,
    {
        self.end(host, reason);
        TickOutcome::Terminated(reason)
    }

    /// Cooperative stop: drop the target now; the next tick ends the session
    /// with `Stopped`.
    pub fn request_stop(&mut self) {
        if self.state == SessionState::Active {
            self.stop_requested = true;
            self.target = None;
        }
    }

    /// End immediately: destroy the marker, clear the target, record the reason.
    /// No-op if already ended.
    pub fn end<H: MarkerSpawner + ?Sized>(&mut self, host: &mut H, reason: EndReason) {
        if self.state == SessionState::Ended {
            return;
        }
        if let Some(marker) = self.marker.take() {
            host.destroy_marker(marker);
        }
        self.target = None;
        self.state = SessionState::Ended;
        self.end_reason = Some(reason);
        info!(?reason, ticks = self.ticks_active, "target lock ended");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    pub fn camera(&self) -> ActorId {
        self.camera
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// Ticks run while `Active`, excluding the tick that ended the session.
    pub fn ticks_active(&self) -> u64 {
        self.ticks_active
    }
}
