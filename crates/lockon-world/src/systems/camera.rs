//! Camera rig system: rigs ride on their owner and look where the controller looks.

use hecs::World;

use lockon_core::host::OrientationSink;
use lockon_core::types::Pose;

use crate::arena::entity_of;
use crate::components::CameraRig;

/// Place every camera rig at its owner's position plus offset, rotated to the
/// controller's orientation. Rigs whose owner is gone keep their last pose.
pub fn sync_from_controller<C: OrientationSink + ?Sized>(world: &mut World, controller: &C) {
    let rotation = controller.control_rotation();

    let mut placements = Vec::new();
    for (entity, rig) in world.query::<&CameraRig>().iter() {
        let owner_position = entity_of(rig.owner)
            .and_then(|owner| world.get::<&Pose>(owner).ok().map(|pose| pose.position));
        if let Some(position) = owner_position {
            placements.push((entity, position + rig.offset));
        }
    }

    for (entity, position) in placements {
        if let Ok(mut pose) = world.get::<&mut Pose>(entity) {
            *pose = Pose::new(position, rotation);
        }
    }
}
