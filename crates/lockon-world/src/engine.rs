//! Lock engine: the arena, the player's controller, and one lock front end,
//! advanced together one tick at a time.
//!
//! Completely headless; each tick produces a `LockSnapshot`, which makes
//! whole runs comparable for determinism tests.

use std::collections::BTreeSet;

use tracing::{info, warn};

use lockon_core::enums::{InputPin, OutputPin, SessionState};
use lockon_core::error::LockError;
use lockon_core::events::{LockSnapshot, TickOutcome};
use lockon_core::host::ActorLookup;
use lockon_core::types::ActorId;
use lockon_sim::ability::{Activation, TargetLockAbility};
use lockon_sim::latent::{LatentKey, LatentLockManager, LatentRequest};
use lockon_sim::session::LockSession;

use crate::arena::{actor_id, Arena};
use crate::controller::PlayerController;
use crate::scenario::{FrontEnd, Scenario};
use crate::systems;
use crate::world_setup;

pub struct LockEngine {
    arena: Arena,
    controller: PlayerController,
    front_end: FrontEnd,
    ability: TargetLockAbility,
    latent: LatentLockManager,
    player: ActorId,
    camera: ActorId,
    tick: u64,
    tick_delta: f64,
    presses: BTreeSet<u64>,
}

impl LockEngine {
    /// Build the arena described by `scenario`.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, LockError> {
        scenario.validate()?;

        let mut arena = Arena::new();
        let world = arena.world_mut();
        let rotation = scenario.player.rotation();
        let (pawn, camera) = world_setup::spawn_player(
            world,
            scenario.player.position,
            rotation,
            scenario.player.camera_offset,
        );
        for actor in &scenario.actors {
            world_setup::spawn_actor(
                world,
                &actor.class,
                actor.position,
                actor.radius,
                actor.velocity,
            );
        }
        for occluder in &scenario.occluders {
            world_setup::spawn_occluder(world, occluder.position, occluder.shape);
        }
        if let Some(scatter) = &scenario.scatter {
            let mut rng = scatter.rng();
            world_setup::scatter_actors(
                world,
                &mut rng,
                &scatter.class,
                scatter.count,
                scenario.player.position,
                scatter.min_distance,
                scatter.max_distance,
            );
        }

        let player = actor_id(pawn);
        let ability = TargetLockAbility::new(scenario.lock.clone(), player);

        Ok(Self {
            arena,
            controller: PlayerController::new(rotation),
            front_end: scenario.front_end,
            ability,
            latent: LatentLockManager::new(),
            player,
            camera: actor_id(camera),
            tick: 0,
            tick_delta: scenario.tick_delta,
            presses: scenario.toggles.iter().copied().collect(),
        })
    }

    /// Press the lock toggle.
    pub fn toggle(&mut self) -> Activation {
        let activation = self.ability.activate(&mut self.arena);
        info!(tick = self.tick, ?activation, "lock toggled");
        activation
    }

    /// Fire the four-pin input: `Start`, or `Cancel` while the action runs.
    pub fn press_latent(&mut self) -> Result<InputPin, LockError> {
        let key = self.latent_key();
        let pin = if self.latent.is_running(key) {
            InputPin::Cancel
        } else {
            InputPin::Start
        };
        let request = LatentRequest {
            camera: self.camera,
            config: self.ability.config().clone(),
            explicit_target: None,
        };
        self.latent.execute(&mut self.arena, key, pin, &request)?;
        info!(tick = self.tick, ?pin, "latent input");
        Ok(pin)
    }

    /// Advance one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> LockSnapshot {
        if self.presses.contains(&self.tick) {
            match self.front_end {
                FrontEnd::Toggle => {
                    self.toggle();
                }
                FrontEnd::Latent => {
                    if let Err(err) = self.press_latent() {
                        warn!(tick = self.tick, %err, "latent start failed");
                    }
                }
            }
        }

        self.arena.step(self.tick_delta);
        systems::camera::sync_from_controller(self.arena.world_mut(), &self.controller);

        let snapshot = match self.front_end {
            FrontEnd::Toggle => {
                let outcome = self
                    .ability
                    .tick(&mut self.arena, &mut self.controller, self.tick_delta);
                self.snapshot(self.ability.session(), outcome, Vec::new())
            }
            FrontEnd::Latent => {
                let key = self.latent_key();
                let pins = self
                    .latent
                    .update(&mut self.arena, &mut self.controller, self.tick_delta)
                    .into_iter()
                    .filter_map(|(fired, pin)| (fired == key).then_some(pin))
                    .collect();
                self.snapshot(self.latent.session(key), self.latent.last_outcome(key), pins)
            }
        };
        self.tick += 1;
        snapshot
    }

    /// Run `ticks` ticks, collecting every snapshot.
    pub fn run(&mut self, ticks: u64) -> Vec<LockSnapshot> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    fn latent_key(&self) -> LatentKey {
        LatentKey {
            caller: self.player.0,
            uuid: 0,
        }
    }

    fn snapshot(
        &self,
        session: Option<&LockSession>,
        outcome: Option<TickOutcome>,
        pins: Vec<OutputPin>,
    ) -> LockSnapshot {
        let target = session.and_then(|s| s.target());
        let distance = target.and_then(|t| {
            let camera = self.arena.pose(self.camera)?;
            Some(camera.distance_to(self.arena.pose(t)?.position))
        });
        let (state, end_reason) = match (session, outcome) {
            (Some(s), _) => (s.state(), s.end_reason()),
            (None, Some(TickOutcome::Terminated(reason))) => (SessionState::Ended, Some(reason)),
            (None, _) => (SessionState::Idle, None),
        };

        LockSnapshot {
            tick: self.tick,
            state,
            target,
            distance,
            control_rotation: self.controller.rotation,
            outcome,
            end_reason,
            pins,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn ability(&self) -> &TargetLockAbility {
        &self.ability
    }

    pub fn latent(&self) -> &LatentLockManager {
        &self.latent
    }

    pub fn front_end(&self) -> FrontEnd {
        self.front_end
    }

    pub fn player(&self) -> ActorId {
        self.player
    }

    pub fn camera(&self) -> ActorId {
        self.camera
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }
}
