//! Scripted input host for scenario tests

use bevy::prelude::*;
use std::collections::BTreeMap;

use super::parser::FrameInput;
use crate::input::{ButtonState, InputSnapshot};
use crate::simulation::MatchClock;

/// Resource holding the scripted input changes for a test
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Tick -> change taking effect on that tick
    frames: BTreeMap<u64, FrameInput>,
    /// Persisted input between changes
    current: InputSnapshot,
}

impl ScriptedInputs {
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        Self {
            frames: inputs.iter().map(|fi| (fi.frame, fi.clone())).collect(),
            current: InputSnapshot::default(),
        }
    }

    /// Input presented on tick `frame`
    pub fn snapshot_for(&mut self, frame: u64) -> InputSnapshot {
        if let Some(change) = self.frames.get(&frame) {
            apply_change(&mut self.current, change);
        }
        self.current
    }
}

fn apply_change(snapshot: &mut InputSnapshot, change: &FrameInput) {
    if let Some(buttons) = &change.buttons {
        let held = |name: &str| buttons.iter().any(|b| b.eq_ignore_ascii_case(name));
        let pad = ButtonState {
            a: held("a"),
            b: held("b"),
            x: held("x"),
            y: held("y"),
        };
        *snapshot = InputSnapshot::from_buttons(snapshot.analog, pad);
    }
    if let Some(x) = change.analog_x {
        snapshot.analog.x = x;
    }
    if let Some(y) = change.analog_y {
        snapshot.analog.y = y;
    }
    if let Some(sprint) = change.sprint {
        snapshot.sprint = sprint;
    }
    if let Some(charge) = change.charge {
        snapshot.charge = charge;
    }
    if let Some(touch) = change.touch {
        snapshot.touch = touch;
    }
    if let Some(lob) = change.lob {
        snapshot.lob = lob;
    }
    if let Some(flick) = change.flick {
        snapshot.flick = flick;
    }
}

/// Input host system: runs before the tick, which then becomes `clock + 1`
pub fn drive_scripted_input(
    clock: Res<MatchClock>,
    mut scripted: ResMut<ScriptedInputs>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    *snapshot = scripted.snapshot_for(clock.frame + 1);
}
