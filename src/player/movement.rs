//! Controlled-player movement and stamina

use bevy::prelude::*;

use crate::input::InputState;
use crate::player::components::*;
use crate::tuning::PhysicsTweaks;

/// Move a player by the analog vector and settle stamina for this tick.
///
/// Speed is `player_speed * (sprint ? sprint_multiplier : 1) * stamina`, with the
/// stamina from before this tick's drain. Analog y maps onto field z.
pub fn step_player(
    position: &mut Vec3,
    stamina: &mut Stamina,
    analog: Vec2,
    sprint: bool,
    tweaks: &PhysicsTweaks,
) {
    let mut speed = tweaks.player_speed;
    if sprint {
        speed *= tweaks.sprint_multiplier;
    }
    speed *= stamina.0;

    position.x += analog.x * speed;
    position.z += analog.y * speed;

    if sprint {
        stamina.drain(tweaks.stamina_drain, tweaks);
    } else {
        stamina.recover(tweaks.stamina_drain / 2.0, tweaks);
    }
}

/// Tick step 2: apply the latched input to the controlled player
pub fn move_player(
    tweaks: Res<PhysicsTweaks>,
    mut player_query: Query<(&mut Transform, &mut Stamina, &InputState), With<ControlledPlayer>>,
) {
    let Ok((mut transform, mut stamina, input)) = player_query.single_mut() else {
        return;
    };
    step_player(
        &mut transform.translation,
        &mut stamina,
        input.analog,
        input.sprint,
        &tweaks,
    );
}
