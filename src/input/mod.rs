//! Input module - the snapshot written by input hosts and its per-tick latch
//!
//! Input hosts (touch joystick, gamepad, scripted tests, random soak driver)
//! overwrite `InputSnapshot` whenever they like. The simulation only reads it
//! once per tick in `read_input`, which copies a sanitized version onto the
//! controlled player's `InputState`.

mod random;

pub use random::*;

use bevy::prelude::*;

use crate::helpers::clamp_axis;
use crate::player::ControlledPlayer;

/// Raw four-button pad as exposed by the touch overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
}

/// Latest analog vector and action flags from the input host
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// x = left/right, y = forward/back; each in [-1, 1]
    pub analog: Vec2,
    pub sprint: bool,
    pub charge: bool,
    pub touch: bool,
    pub lob: bool,
    pub flick: bool,
}

impl InputSnapshot {
    /// Map the pad the way the touch overlay is wired:
    /// A charges, B sprints and touches, X lobs, Y flicks.
    pub fn from_buttons(analog: Vec2, buttons: ButtonState) -> Self {
        Self {
            analog,
            sprint: buttons.b,
            charge: buttons.a,
            touch: buttons.b,
            lob: buttons.x,
            flick: buttons.y,
        }
    }

    /// Copy with the analog vector clamped to the unit square
    pub fn sanitized(self) -> Self {
        Self {
            analog: Vec2::new(clamp_axis(self.analog.x), clamp_axis(self.analog.y)),
            ..self
        }
    }
}

/// Per-entity input latched at the start of each tick.
/// Only the controlled player carries one; every tick system reads from here.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub analog: Vec2,
    pub sprint: bool,
    pub charge: bool,
    pub touch: bool,
    pub lob: bool,
    pub flick: bool,
}

impl From<InputSnapshot> for InputState {
    fn from(snapshot: InputSnapshot) -> Self {
        Self {
            analog: snapshot.analog,
            sprint: snapshot.sprint,
            charge: snapshot.charge,
            touch: snapshot.touch,
            lob: snapshot.lob,
            flick: snapshot.flick,
        }
    }
}

/// Tick step 1: latch the host snapshot onto the controlled player
pub fn read_input(
    snapshot: Res<InputSnapshot>,
    mut player_query: Query<&mut InputState, With<ControlledPlayer>>,
) {
    let Ok(mut input) = player_query.single_mut() else {
        return;
    };
    *input = InputState::from(snapshot.sanitized());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_button_mapping() {
        let snapshot = InputSnapshot::from_buttons(
            Vec2::ZERO,
            ButtonState {
                a: false,
                b: true,
                x: false,
                y: false,
            },
        );
        // B doubles as sprint and touch
        assert!(snapshot.sprint);
        assert!(snapshot.touch);
        assert!(!snapshot.charge);
        assert!(!snapshot.lob);
        assert!(!snapshot.flick);

        let snapshot = InputSnapshot::from_buttons(
            Vec2::ZERO,
            ButtonState {
                a: true,
                b: false,
                x: true,
                y: true,
            },
        );
        assert!(snapshot.charge);
        assert!(snapshot.lob);
        assert!(snapshot.flick);
        assert!(!snapshot.sprint);
    }

    #[test]
    fn test_sanitized_clamps_analog() {
        let snapshot = InputSnapshot {
            analog: Vec2::new(4.0, f32::NAN),
            charge: true,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(snapshot.analog, Vec2::new(1.0, 0.0));
        assert!(snapshot.charge);
    }

    #[test]
    fn test_read_input_latches_snapshot() {
        let mut world = World::new();
        world.insert_resource(InputSnapshot {
            analog: Vec2::new(-3.0, 0.5),
            lob: true,
            ..Default::default()
        });
        let player = world
            .spawn((ControlledPlayer, InputState::default()))
            .id();

        world.run_system_once(read_input).unwrap();

        let input = world.get::<InputState>(player).unwrap();
        assert_eq!(input.analog, Vec2::new(-1.0, 0.5));
        assert!(input.lob);
    }
}
