//! Scoring module - goal detection, score tracking and post-goal reset

use bevy::prelude::*;

use crate::ball::{Ball, Velocity, reset_ball};
use crate::events::{EventBus, GameEvent, Side};
use crate::shooting::ChargeState;
use crate::tuning::PhysicsTweaks;

/// Session score. Counters only ever go up.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player: {} | AI: {}", self.player, self.ai)
    }
}

/// Score text for the display host, refreshed on every goal
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay(pub String);

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self(Score::default().to_string())
    }
}

/// Which side (if any) scored with the ball at depth `z`.
/// Past +goal_line is the player's goal, past -goal_line the AI's.
pub fn detect_goal(z: f32, goal_line: f32) -> Option<Side> {
    if z > goal_line {
        Some(Side::Player)
    } else if z < -goal_line {
        Some(Side::Ai)
    } else {
        None
    }
}

/// Restore play after a goal: ball on the spot and at rest, charge cleared
pub fn reset_play(ball_pos: &mut Vec3, ball_velocity: &mut Vec3, charge: &mut ChargeState) {
    reset_ball(ball_pos, ball_velocity);
    charge.reset();
}

/// Tick step 9: award and reset when the ball is past either goal line
pub fn check_goal(
    tweaks: Res<PhysicsTweaks>,
    mut score: ResMut<Score>,
    mut score_display: ResMut<ScoreDisplay>,
    mut charge: ResMut<ChargeState>,
    mut event_bus: ResMut<EventBus>,
    mut ball_query: Query<(&mut Transform, &mut Velocity), With<Ball>>,
) {
    let Ok((mut ball_transform, mut ball_velocity)) = ball_query.single_mut() else {
        return;
    };
    let Some(scorer) = detect_goal(ball_transform.translation.z, tweaks.goal_line) else {
        return;
    };

    score.award(scorer);
    score_display.0 = score.to_string();
    reset_play(
        &mut ball_transform.translation,
        &mut ball_velocity.0,
        &mut charge,
    );

    event_bus.emit(GameEvent::Goal {
        scorer,
        score_player: score.player,
        score_ai: score.ai,
    });
    info!("GOAL! {}", *score);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_goal_lines() {
        assert_eq!(detect_goal(41.0, 40.0), Some(Side::Player));
        assert_eq!(detect_goal(-40.5, 40.0), Some(Side::Ai));
        assert_eq!(detect_goal(40.0, 40.0), None);
        assert_eq!(detect_goal(-40.0, 40.0), None);
        assert_eq!(detect_goal(0.0, 40.0), None);
    }

    #[test]
    fn test_goal_sides_are_exclusive() {
        let mut z = -200.0;
        while z <= 200.0 {
            let player = z > 40.0;
            let ai = z < -40.0;
            assert!(!(player && ai));
            assert_eq!(detect_goal(z, 40.0).is_some(), player || ai);
            z += 0.25;
        }
    }

    #[test]
    fn test_score_text() {
        let mut score = Score { player: 2, ai: 3 };
        score.award(Side::Player);
        assert_eq!(score.to_string(), "Player: 3 | AI: 3");
        assert_eq!(ScoreDisplay::default().0, "Player: 0 | AI: 0");
    }

    #[test]
    fn test_reset_play_clears_charge() {
        let mut pos = Vec3::new(2.0, 3.0, 41.0);
        let mut vel = Vec3::new(0.0, 0.0, 1.0);
        let mut charge = ChargeState {
            charging: true,
            kick_power: 1.4,
        };

        reset_play(&mut pos, &mut vel, &mut charge);

        assert_eq!(pos, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(vel, Vec3::ZERO);
        assert_eq!(charge, ChargeState::default());
    }

    #[test]
    fn test_goal_tick_updates_score_display() {
        use crate::simulation::{MatchHandles, MatchPlugin};

        let mut app = App::new();
        app.add_plugins(MatchPlugin);
        let ball = app.world().resource::<MatchHandles>().ball;
        app.world_mut()
            .get_mut::<Transform>(ball)
            .unwrap()
            .translation = Vec3::new(0.0, 0.5, 41.0);

        app.update();

        let world = app.world();
        assert_eq!(*world.resource::<Score>(), Score { player: 1, ai: 0 });
        assert_eq!(world.resource::<ScoreDisplay>().0, "Player: 1 | AI: 0");
        assert_eq!(
            world.get::<Transform>(ball).unwrap().translation,
            Vec3::new(0.0, 0.5, 0.0)
        );
        assert!(
            world
                .resource::<EventBus>()
                .peek()
                .iter()
                .any(|e| matches!(e.event, GameEvent::Goal { scorer: Side::Player, .. }))
        );
    }
}
