//! Close-control skills: touch, lob and flick

use bevy::prelude::*;

use crate::ball::Ball;
use crate::events::{EventBus, GameEvent};
use crate::helpers::{sign_or_positive, within_reach};
use crate::input::InputState;
use crate::player::{ControlledPlayer, Velocity};
use crate::shooting::ChargeState;
use crate::tuning::PhysicsTweaks;

/// Skills that fired this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkillOutcome {
    /// Signed x nudge when a touch happened
    pub touch: Option<f32>,
    pub lob: bool,
    /// z velocity given by a flick
    pub flick: Option<f32>,
}

impl SkillOutcome {
    pub fn any(&self) -> bool {
        self.touch.is_some() || self.lob || self.flick.is_some()
    }
}

/// Apply every proximity-gated skill the input asks for.
///
/// Reach is tested once against the ball position at the start of the step,
/// so a touch that moves the ball does not disable the lob or flick after it.
pub fn resolve_skills(
    player_pos: Vec3,
    input: &InputState,
    charge: &ChargeState,
    ball_pos: &mut Vec3,
    ball_velocity: &mut Vec3,
    tweaks: &PhysicsTweaks,
) -> SkillOutcome {
    let mut outcome = SkillOutcome::default();
    if !within_reach(player_pos, *ball_pos, tweaks.proximity_radius) {
        return outcome;
    }

    if input.touch {
        let nudge = tweaks.touch_nudge * sign_or_positive(input.analog.x);
        ball_pos.x += nudge;
        outcome.touch = Some(nudge);
    }

    if input.lob {
        ball_pos.z -= tweaks.lob_nudge;
        outcome.lob = true;
    }

    if input.flick && charge.charging && charge.kick_power > tweaks.flick_threshold {
        // Popped back toward the player's own half
        let vz = if player_pos.z > 0.0 {
            -tweaks.flick_speed
        } else {
            tweaks.flick_speed
        };
        ball_velocity.y = tweaks.flick_lift;
        ball_velocity.z = vz;
        outcome.flick = Some(vz);
    }

    outcome
}

/// Tick step 5: proximity-gated skills
pub fn apply_skills(
    tweaks: Res<PhysicsTweaks>,
    charge: Res<ChargeState>,
    mut event_bus: ResMut<EventBus>,
    player_query: Query<(&Transform, &InputState), (With<ControlledPlayer>, Without<Ball>)>,
    mut ball_query: Query<(&mut Transform, &mut Velocity), With<Ball>>,
) {
    let Ok((player_transform, input)) = player_query.single() else {
        return;
    };
    let Ok((mut ball_transform, mut ball_velocity)) = ball_query.single_mut() else {
        return;
    };

    let outcome = resolve_skills(
        player_transform.translation,
        input,
        &charge,
        &mut ball_transform.translation,
        &mut ball_velocity.0,
        &tweaks,
    );

    if let Some(nudge) = outcome.touch {
        event_bus.emit(GameEvent::Touch { nudge });
    }
    if outcome.lob {
        event_bus.emit(GameEvent::Lob);
    }
    if let Some(vz) = outcome.flick {
        debug!("Flick toward z {:+.1}", vz);
        event_bus.emit(GameEvent::Flick { vz });
    }
}
