use serde::{Deserialize, Serialize};

use lockon_core::host::OrientationSink;
use lockon_core::types::Rotator;

/// The player's look input. The only writer during a lock is the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerController {
    pub rotation: Rotator,
}

impl PlayerController {
    pub fn new(rotation: Rotator) -> Self {
        Self { rotation }
    }
}

impl OrientationSink for PlayerController {
    fn control_rotation(&self) -> Rotator {
        self.rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        self.rotation = rotation;
    }
}
