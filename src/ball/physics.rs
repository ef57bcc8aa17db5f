//! Ball physics systems

use bevy::prelude::*;

use crate::ball::components::Ball;
use crate::constants::BALL_SPAWN;
use crate::player::Velocity;
use crate::tuning::PhysicsTweaks;

/// Advance the ball by one tick: move, decay, fall, clamp to the grass.
///
/// Gravity only acts while the ball is above its rest height, and the rest
/// height is a hard floor for the position (velocity is left alone).
pub fn step_ball(position: &mut Vec3, velocity: &mut Vec3, tweaks: &PhysicsTweaks) {
    *position += *velocity;
    *velocity *= tweaks.ball_friction;
    if position.y > tweaks.ball_rest_height {
        velocity.y -= tweaks.ball_gravity_step;
    }
    if position.y < tweaks.ball_rest_height {
        position.y = tweaks.ball_rest_height;
    }
}

/// Put the ball back on the center spot, at rest
pub fn reset_ball(position: &mut Vec3, velocity: &mut Vec3) {
    *position = BALL_SPAWN;
    *velocity = Vec3::ZERO;
}

/// Tick step 6: integrate the ball with whatever kicks and touches left behind
pub fn advance_ball(
    tweaks: Res<PhysicsTweaks>,
    mut ball_query: Query<(&mut Transform, &mut Velocity), With<Ball>>,
) {
    let Ok((mut transform, mut velocity)) = ball_query.single_mut() else {
        return;
    };
    step_ball(&mut transform.translation, &mut velocity.0, &tweaks);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_then_decays() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(0.0, 0.5, 0.0);
        let mut velocity = Vec3::new(1.0, 0.0, -2.0);

        step_ball(&mut position, &mut velocity, &tweaks);

        assert_eq!(position, Vec3::new(1.0, 0.5, -2.0));
        assert!((velocity.x - 0.97).abs() < 1e-6);
        assert!((velocity.z + 1.94).abs() < 1e-6);
        // Resting on the grass: no gravity applied
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_gravity_only_when_airborne() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(0.0, 2.0, 0.0);
        let mut velocity = Vec3::ZERO;

        step_ball(&mut position, &mut velocity, &tweaks);

        assert!((velocity.y + 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_never_sinks_below_rest_height() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(0.0, 3.0, 0.0);
        let mut velocity = Vec3::new(0.0, 0.3, 0.0);

        for _ in 0..600 {
            step_ball(&mut position, &mut velocity, &tweaks);
            assert!(position.y >= tweaks.ball_rest_height);
        }
        assert_eq!(position.y, tweaks.ball_rest_height);
    }

    #[test]
    fn test_rolling_ball_comes_to_rest_without_reversing() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(0.0, 0.5, 0.0);
        let mut velocity = Vec3::new(0.8, 0.0, -0.6);
        let mut previous = position;

        for _ in 0..2000 {
            step_ball(&mut position, &mut velocity, &tweaks);
            assert!(velocity.x >= 0.0);
            assert!(velocity.z <= 0.0);
            assert!(position.x >= previous.x);
            assert!(position.z <= previous.z);
            previous = position;
        }

        // Geometric series: total travel is v0 / (1 - friction)
        let expected_x = 0.8 / (1.0 - tweaks.ball_friction);
        let expected_z = -0.6 / (1.0 - tweaks.ball_friction);
        assert!((position.x - expected_x).abs() < 1e-2);
        assert!((position.z - expected_z).abs() < 1e-2);
        assert!(velocity.length() < 1e-6);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut position = Vec3::new(3.0, 4.0, 41.0);
        let mut velocity = Vec3::new(0.1, 0.2, 0.3);

        reset_ball(&mut position, &mut velocity);
        let once = (position, velocity);
        reset_ball(&mut position, &mut velocity);

        assert_eq!((position, velocity), once);
        assert_eq!(position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(velocity, Vec3::ZERO);
    }
}
