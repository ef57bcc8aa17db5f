//! Kick charging: hold to build power, release to kick

use bevy::prelude::*;

use crate::ball::Ball;
use crate::events::{EventBus, GameEvent};
use crate::helpers::within_reach;
use crate::input::InputState;
use crate::player::{ControlledPlayer, Velocity};
use crate::tuning::PhysicsTweaks;

/// Charge sub-state of the controlled player.
/// `kick_power` only grows while `charging` is true and is 0 whenever idle.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeState {
    pub charging: bool,
    pub kick_power: f32,
}

/// What the charge button did this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeTransition {
    /// Not held, was not charging
    Idle,
    /// Pressed this tick (Idle -> Charging)
    Started,
    /// Still held
    Held,
    /// Let go; carries the power that was built up
    Released { power: f32 },
}

impl ChargeState {
    /// Evaluate press/hold/release. On release the power is handed back and
    /// the state returns to idle with zero power.
    pub fn update(&mut self, held: bool) -> ChargeTransition {
        if held {
            let started = !self.charging;
            self.charging = true;
            if started {
                ChargeTransition::Started
            } else {
                ChargeTransition::Held
            }
        } else if self.charging {
            let power = self.kick_power;
            self.reset();
            ChargeTransition::Released { power }
        } else {
            ChargeTransition::Idle
        }
    }

    /// Grow kick power by one tick's worth while charging, honoring the
    /// optional cap. Power is kept within bounds every tick.
    pub fn accumulate(&mut self, tweaks: &PhysicsTweaks) {
        if self.charging {
            self.kick_power += tweaks.kick_charge_rate;
        }
        self.kick_power = self.kick_power.max(0.0);
        if let Some(cap) = tweaks.kick_power_cap {
            self.kick_power = self.kick_power.min(cap);
        }
    }

    pub fn reset(&mut self) {
        self.charging = false;
        self.kick_power = 0.0;
    }
}

/// Kick impulse: ball velocity in the ground plane becomes the player-to-ball
/// offset scaled by power. Vertical velocity is untouched.
pub fn kick_impulse(player_pos: Vec3, ball_pos: Vec3, power: f32, ball_velocity: &mut Vec3) {
    ball_velocity.x = (ball_pos.x - player_pos.x) * power;
    ball_velocity.z = (ball_pos.z - player_pos.z) * power;
}

/// Tick step 3: charge transition, kicking on release if the ball is in reach
pub fn update_charge(
    tweaks: Res<PhysicsTweaks>,
    mut charge: ResMut<ChargeState>,
    mut event_bus: ResMut<EventBus>,
    player_query: Query<(&Transform, &InputState), (With<ControlledPlayer>, Without<Ball>)>,
    mut ball_query: Query<(&Transform, &mut Velocity), With<Ball>>,
) {
    let Ok((player_transform, input)) = player_query.single() else {
        return;
    };

    match charge.update(input.charge) {
        ChargeTransition::Started => event_bus.emit(GameEvent::ChargeStart),
        ChargeTransition::Released { power } => {
            let Ok((ball_transform, mut ball_velocity)) = ball_query.single_mut() else {
                return;
            };
            let player_pos = player_transform.translation;
            let ball_pos = ball_transform.translation;
            let connected = within_reach(player_pos, ball_pos, tweaks.proximity_radius);
            if connected {
                kick_impulse(player_pos, ball_pos, power, &mut ball_velocity.0);
                debug!("Kick connected with power {:.2}", power);
            }
            event_bus.emit(GameEvent::Kick { power, connected });
            if connected {
                event_bus.emit(GameEvent::Trail {
                    pos: ball_pos.into(),
                });
            }
        }
        ChargeTransition::Idle | ChargeTransition::Held => {}
    }
}

/// Tick step 4: build power while the button stays down
pub fn accumulate_kick_power(tweaks: Res<PhysicsTweaks>, mut charge: ResMut<ChargeState>) {
    charge.accumulate(&tweaks);
}
