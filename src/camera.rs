//! Camera follow target handed to the rendering host

use bevy::prelude::*;

use crate::constants::{CAMERA_DISTANCE, CAMERA_HEIGHT};
use crate::player::ControlledPlayer;
use crate::tuning::PhysicsTweaks;

/// Where the camera should look and where its eye currently sits.
/// The eye eases toward `target + offset` a fraction per tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    pub target: Vec3,
    pub eye: Vec3,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            eye: Vec3::new(0.0, CAMERA_HEIGHT, CAMERA_DISTANCE),
        }
    }
}

impl CameraFollow {
    /// Track the player; the look-at point sits on the grass below it
    pub fn follow(&mut self, player_pos: Vec3, offset: Vec3, lerp: f32) {
        self.target = Vec3::new(player_pos.x, 0.0, player_pos.z);
        let desired = self.target + offset;
        self.eye = self.eye.lerp(desired, lerp);
    }
}

/// Eye offset from the look-at point
pub fn camera_offset(tweaks: &PhysicsTweaks) -> Vec3 {
    Vec3::new(0.0, tweaks.camera_height, tweaks.camera_distance)
}

/// Tick step 8
pub fn update_camera_target(
    tweaks: Res<PhysicsTweaks>,
    mut camera: ResMut<CameraFollow>,
    player_query: Query<&Transform, With<ControlledPlayer>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    camera.follow(
        player_transform.translation,
        camera_offset(&tweaks),
        tweaks.camera_lerp,
    );
}
