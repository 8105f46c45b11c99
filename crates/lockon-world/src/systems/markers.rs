//! Keeps lock markers snapped to the actor they mark.

use hecs::{Entity, World};

use lockon_core::types::Pose;

use crate::arena::entity_of;
use crate::components::Marker;

/// Move every marker onto its actor. Markers whose actor is gone are despawned.
pub fn follow_attachments(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let mut moves = Vec::new();
    for (entity, marker) in world.query::<&Marker>().iter() {
        let attached = entity_of(marker.attached_to)
            .and_then(|target| world.get::<&Pose>(target).ok().map(|pose| pose.position));
        match attached {
            Some(position) => moves.push((entity, position)),
            None => despawn_buffer.push(entity),
        }
    }

    for (entity, position) in moves {
        if let Ok(mut pose) = world.get::<&mut Pose>(entity) {
            pose.position = position;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
