//! Reference host world for the lock core.
//!
//! `Arena` owns a hecs `World` and answers every collaborator query the lock
//! session makes. Actor ids are the entity's bit representation, so an id
//! for a despawned entity simply stops resolving.

use glam::DVec3;
use hecs::{Entity, World};
use tracing::trace;

use lockon_core::host::{ActorLookup, MarkerSpawner, RayQuery, SpatialQuery};
use lockon_core::types::{ActorId, ClassTag, MarkerHandle, Pose};

use crate::components::{ActorClass, CameraRig, Collider, Marker, Occluder};
use crate::systems;

pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

pub fn entity_of(id: ActorId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// The ECS world plus scratch buffers for systems.
#[derive(Default)]
pub struct Arena {
    world: World,
    despawn_buffer: Vec<Entity>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Integrate velocities and snap markers onto their actors.
    pub fn step(&mut self, delta_secs: f64) {
        systems::movement::run(&mut self.world, delta_secs);
        systems::markers::follow_attachments(&mut self.world, &mut self.despawn_buffer);
    }

    /// Remove an actor. Returns false if it was already gone.
    pub fn despawn(&mut self, actor: ActorId) -> bool {
        entity_of(actor).is_some_and(|entity| self.world.despawn(entity).is_ok())
    }

    pub fn set_position(&mut self, actor: ActorId, position: DVec3) -> bool {
        let Some(entity) = entity_of(actor) else {
            return false;
        };
        match self.world.get::<&mut Pose>(entity) {
            Ok(mut pose) => {
                pose.position = position;
                true
            }
            Err(_) => false,
        }
    }

    /// Live marker entities, as `(marker, attached_to)`.
    pub fn markers(&self) -> Vec<(ActorId, ActorId)> {
        self.world
            .query::<&Marker>()
            .iter()
            .map(|(entity, marker)| (actor_id(entity), marker.attached_to))
            .collect()
    }
}

impl ActorLookup for Arena {
    fn pose(&self, actor: ActorId) -> Option<Pose> {
        let entity = entity_of(actor)?;
        self.world.get::<&Pose>(entity).ok().map(|pose| *pose)
    }

    fn camera_of(&self, owner: ActorId) -> Option<ActorId> {
        self.world
            .query::<&CameraRig>()
            .iter()
            .find(|(_, rig)| rig.owner == owner)
            .map(|(entity, _)| actor_id(entity))
    }

    fn owner_of(&self, camera: ActorId) -> Option<ActorId> {
        let entity = entity_of(camera)?;
        let owner = self.world.get::<&CameraRig>(entity).ok()?.owner;
        self.is_valid(owner).then_some(owner)
    }
}

impl SpatialQuery for Arena {
    fn sphere_overlap(&self, center: DVec3, radius: f64, class: &ClassTag) -> Vec<ActorId> {
        let mut query = self.world.query::<(&Pose, &ActorClass, Option<&Collider>)>();
        query
            .iter()
            .filter(|(_, (pose, actor_class, collider))| {
                let extent = collider.map_or(0.0, |c| c.radius);
                actor_class.0 == *class && pose.position.distance(center) <= radius + extent
            })
            .map(|(entity, _)| actor_id(entity))
            .collect()
    }
}

impl RayQuery for Arena {
    fn trace(&self, from: DVec3, to: DVec3, ignore: &[ActorId]) -> bool {
        let mut query = self.world.query::<(&Pose, &Occluder)>();
        let blocked = query.iter().any(|(entity, (pose, occluder))| {
            !ignore.contains(&actor_id(entity)) && occluder.blocks(pose.position, from, to)
        });
        trace!(?from, ?to, blocked, "visibility trace");
        blocked
    }
}

impl MarkerSpawner for Arena {
    fn spawn_marker(&mut self, kind: &ClassTag, attach_to: ActorId) -> Option<MarkerHandle> {
        let pose = self.pose(attach_to)?;
        let entity = self.world.spawn((
            pose,
            Marker {
                kind: kind.clone(),
                attached_to: attach_to,
            },
        ));
        Some(MarkerHandle(actor_id(entity).0))
    }

    fn destroy_marker(&mut self, marker: MarkerHandle) {
        let Some(entity) = entity_of(ActorId(marker.0)) else {
            return;
        };
        if self.world.get::<&Marker>(entity).is_ok() {
            let _ = self.world.despawn(entity);
        }
    }
}
