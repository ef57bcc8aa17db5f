//! Per-member chase heuristic for the opposing roster

use bevy::prelude::*;

use super::{AiMember, AiRole};
use crate::ball::Ball;
use crate::events::{EventBus, GameEvent};
use crate::helpers::within_reach;
use crate::player::{Stamina, Velocity};
use crate::tuning::PhysicsTweaks;

/// Member sits out AI updates (used by scripted scenarios)
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Benched;

/// Advance one opposing member by a tick. Returns true when it struck the ball.
///
/// The chase direction is the raw offset to the ball, not normalized, so
/// members close faster from far away and diagonally. The strike reuses the
/// offset measured before moving.
pub fn step_member(
    role: AiRole,
    position: &mut Vec3,
    stamina: &mut Stamina,
    ball_pos: Vec3,
    ball_velocity: &mut Vec3,
    tweaks: &PhysicsTweaks,
) -> bool {
    let base_speed = match role {
        AiRole::Goalkeeper => tweaks.keeper_speed,
        AiRole::Field => tweaks.field_speed,
    };
    let step = base_speed * stamina.0 * tweaks.ai_step_scale;
    let dir_x = ball_pos.x - position.x;
    let dir_z = ball_pos.z - position.z;

    position.x += dir_x * step;
    match role {
        AiRole::Goalkeeper => position.z = tweaks.keeper_depth,
        AiRole::Field => position.z += dir_z * step,
    }

    let struck = within_reach(*position, ball_pos, tweaks.proximity_radius);
    if struck {
        ball_velocity.x = dir_x * tweaks.ai_strike_factor;
        ball_velocity.z = dir_z * tweaks.ai_strike_factor;
    }

    // No recovery for the AI side
    stamina.drain(tweaks.stamina_drain / 2.0, tweaks);
    struck
}

/// Tick step 7: every active opposing member, in roster order.
/// When several members strike in one tick the highest index wins.
pub fn update_ai(
    tweaks: Res<PhysicsTweaks>,
    mut event_bus: ResMut<EventBus>,
    mut ai_query: Query<
        (&AiMember, &mut Transform, &mut Stamina),
        (Without<Ball>, Without<Benched>),
    >,
    mut ball_query: Query<(&Transform, &mut Velocity), With<Ball>>,
) {
    let Ok((ball_transform, mut ball_velocity)) = ball_query.single_mut() else {
        return;
    };
    let ball_pos = ball_transform.translation;

    let mut members: Vec<_> = ai_query.iter_mut().collect();
    members.sort_by_key(|(member, _, _)| member.index);

    for (member, mut transform, mut stamina) in members {
        let struck = step_member(
            member.role,
            &mut transform.translation,
            &mut stamina,
            ball_pos,
            &mut ball_velocity.0,
            &tweaks,
        );
        if struck {
            debug!("AI {} struck the ball", member.index);
            event_bus.emit(GameEvent::AiStrike {
                index: member.index,
            });
            event_bus.emit(GameEvent::Trail {
                pos: ball_pos.into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeper_pinned_to_depth() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(-7.0, 1.0, -3.0);
        let mut stamina = Stamina(1.0);
        let mut velocity = Vec3::ZERO;

        step_member(
            AiRole::Goalkeeper,
            &mut position,
            &mut stamina,
            Vec3::new(5.0, 0.5, -30.0),
            &mut velocity,
            &tweaks,
        );

        assert_eq!(position.z, 20.0);
        // dir_x 12 * 0.2 * 1.0 * 0.05
        assert!((position.x - (-7.0 + 0.12)).abs() < 1e-5);
    }

    #[test]
    fn test_field_member_closes_on_both_axes() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(10.0, 1.0, 20.0);
        let mut stamina = Stamina(1.0);
        let mut velocity = Vec3::ZERO;

        let struck = step_member(
            AiRole::Field,
            &mut position,
            &mut stamina,
            Vec3::new(0.0, 0.5, 0.0),
            &mut velocity,
            &tweaks,
        );

        assert!(!struck);
        // step = 0.15 * 0.05
        assert!((position.x - (10.0 - 10.0 * 0.0075)).abs() < 1e-5);
        assert!((position.z - (20.0 - 20.0 * 0.0075)).abs() < 1e-5);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_strike_uses_pre_move_offset() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(1.0, 0.5, 0.0);
        let mut stamina = Stamina(1.0);
        let mut velocity = Vec3::new(0.0, 0.1, 0.0);

        let struck = step_member(
            AiRole::Field,
            &mut position,
            &mut stamina,
            Vec3::new(0.0, 0.5, 1.0),
            &mut velocity,
            &tweaks,
        );

        assert!(struck);
        assert!((velocity.x + 0.25).abs() < 1e-6);
        assert!((velocity.z - 0.25).abs() < 1e-6);
        assert_eq!(velocity.y, 0.1);
    }

    #[test]
    fn test_stamina_drains_without_recovery() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(0.0, 1.0, 30.0);
        let mut stamina = Stamina(1.0);
        let mut velocity = Vec3::ZERO;
        let far_ball = Vec3::new(0.0, 0.5, -30.0);

        step_member(AiRole::Field, &mut position, &mut stamina, far_ball, &mut velocity, &tweaks);
        assert!((stamina.0 - 0.9975).abs() < 1e-6);

        for _ in 0..1000 {
            step_member(
                AiRole::Field,
                &mut position,
                &mut stamina,
                far_ball,
                &mut velocity,
                &tweaks,
            );
            assert!(stamina.0 >= tweaks.stamina_min);
        }
        assert_eq!(stamina.0, tweaks.stamina_min);
    }

    #[test]
    fn test_tired_member_moves_slower() {
        let tweaks = PhysicsTweaks::default();
        let ball = Vec3::new(20.0, 0.5, 0.0);
        let mut velocity = Vec3::ZERO;

        let mut fresh = Vec3::new(0.0, 1.0, 0.0);
        step_member(AiRole::Field, &mut fresh, &mut Stamina(1.0), ball, &mut velocity, &tweaks);

        let mut tired = Vec3::new(0.0, 1.0, 0.0);
        step_member(AiRole::Field, &mut tired, &mut Stamina(0.2), ball, &mut velocity, &tweaks);

        assert!(tired.x < fresh.x);
        assert!((tired.x * 5.0 - fresh.x).abs() < 1e-5);
    }

    #[test]
    fn test_roles_by_index() {
        assert_eq!(AiMember::new(0).role, AiRole::Goalkeeper);
        assert_eq!(AiMember::new(1).role, AiRole::Field);
        assert_eq!(AiMember::new(10).role, AiRole::Field);
    }
}
