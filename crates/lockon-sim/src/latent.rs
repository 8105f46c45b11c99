//! Four-pin front end: `Start`/`Cancel` in, `OnStarted`/`OnUpdated`/`OnCancelled` out.
//!
//! Each running action is keyed by the caller and a per-call-site id, so one
//! caller can drive several independent locks. The host pumps
//! [`LatentLockManager::update`] once per tick and dispatches the pins it returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lockon_core::config::LockConfig;
use lockon_core::enums::{InputPin, OutputPin};
use lockon_core::events::TickOutcome;
use lockon_core::error::LockError;
use lockon_core::host::{LockHost, OrientationSink};
use lockon_core::types::ActorId;

use crate::session::LockSession;

/// Identifies one pending action: the calling object and the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LatentKey {
    pub caller: u64,
    pub uuid: i32,
}

/// Parameters carried by the `Start` pin.
#[derive(Debug, Clone)]
pub struct LatentRequest {
    pub camera: ActorId,
    pub config: LockConfig,
    /// Lock onto this actor instead of running selection.
    pub explicit_target: Option<ActorId>,
}

#[derive(Debug)]
struct LatentAction {
    session: LockSession,
    started: bool,
}

#[derive(Debug, Default)]
pub struct LatentLockManager {
    actions: BTreeMap<LatentKey, LatentAction>,
    /// Tick outcomes from the most recent update, including removed actions.
    last_outcomes: BTreeMap<LatentKey, TickOutcome>,
}

impl LatentLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an input pin.
    ///
    /// `Start` on a key that is already running, and `Cancel` on an unknown key,
    /// are ignored. A failed `Start` registers nothing.
    pub fn execute<H: LockHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: LatentKey,
        pin: InputPin,
        request: &LatentRequest,
    ) -> Result<(), LockError> {
        match pin {
            InputPin::Start => self.start(host, key, request),
            InputPin::Cancel => {
                self.cancel(key);
                Ok(())
            }
        }
    }

    pub fn start<H: LockHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: LatentKey,
        request: &LatentRequest,
    ) -> Result<(), LockError> {
        if self.actions.contains_key(&key) {
            debug!(?key, "start ignored, action already running");
            return Ok(());
        }

        let Some(owner) = host.owner_of(request.camera) else {
            warn!(camera = request.camera.0, "camera has no owner");
            return Err(LockError::MissingCollaborator("owner"));
        };

        let config = request.config.clone();
        let session = match request.explicit_target {
            Some(target) => {
                LockSession::begin_with_target(config, request.camera, owner, target, host)?
            }
            None => LockSession::begin(config, request.camera, owner, host)?,
        };

        self.actions.insert(
            key,
            LatentAction {
                session,
                started: false,
            },
        );
        Ok(())
    }

    /// Clear the action's target; the next update fires `OnCancelled`.
    pub fn cancel(&mut self, key: LatentKey) {
        if let Some(action) = self.actions.get_mut(&key) {
            action.session.request_stop();
        }
    }

    /// Tick every action and return the pins that fired, in key order.
    /// Actions that fire `OnCancelled` are removed.
    pub fn update<H, C>(
        &mut self,
        host: &mut H,
        controller: &mut C,
        delta_secs: f64,
    ) -> Vec<(LatentKey, OutputPin)>
    where
        H: LockHost + ?Sized,
        C: OrientationSink + ?Sized,
    {
        let mut fired = Vec::with_capacity(self.actions.len());
        let outcomes = &mut self.last_outcomes;
        outcomes.clear();
        self.actions.retain(|key, action| {
            let outcome = action.session.tick(host, controller, delta_secs);
            outcomes.insert(*key, outcome);
            if outcome.is_terminal() {
                fired.push((*key, OutputPin::OnCancelled));
                return false;
            }
            let pin = if action.started {
                OutputPin::OnUpdated
            } else {
                action.started = true;
                OutputPin::OnStarted
            };
            fired.push((*key, pin));
            true
        });
        fired
    }

    /// What the action's session produced on the last update.
    pub fn last_outcome(&self, key: LatentKey) -> Option<TickOutcome> {
        self.last_outcomes.get(&key).copied()
    }

    pub fn is_running(&self, key: LatentKey) -> bool {
        self.actions.contains_key(&key)
    }

    pub fn session(&self, key: LatentKey) -> Option<&LockSession> {
        self.actions.get(&key).map(|action| &action.session)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
