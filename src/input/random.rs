//! Seeded random input host for soak runs

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::InputSnapshot;

/// Shortest and longest time a random input combination is held (ticks)
const MIN_HOLD_TICKS: u32 = 5;
const MAX_HOLD_TICKS: u32 = 90;

/// Input host that holds random stick/button combinations for random durations.
/// Same seed, same input stream.
#[derive(Resource)]
pub struct RandomInputHost {
    rng: StdRng,
    hold_ticks: u32,
    current: InputSnapshot,
}

impl RandomInputHost {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            hold_ticks: 0,
            current: InputSnapshot::default(),
        }
    }

    /// Advance one tick and return the snapshot the host is presenting
    pub fn next_snapshot(&mut self) -> InputSnapshot {
        if self.hold_ticks == 0 {
            self.current = self.roll();
            self.hold_ticks = self.rng.gen_range(MIN_HOLD_TICKS..=MAX_HOLD_TICKS);
        }
        self.hold_ticks -= 1;
        self.current
    }

    fn roll(&mut self) -> InputSnapshot {
        // Stick released a fair share of the time, like a thumb lifting off
        let analog = if self.rng.gen_bool(0.2) {
            Vec2::ZERO
        } else {
            Vec2::new(self.rng.gen_range(-1.0..=1.0), self.rng.gen_range(-1.0..=1.0))
        };
        InputSnapshot {
            analog,
            sprint: self.rng.gen_bool(0.3),
            charge: self.rng.gen_bool(0.25),
            touch: self.rng.gen_bool(0.15),
            lob: self.rng.gen_bool(0.1),
            flick: self.rng.gen_bool(0.1),
        }
    }
}

/// Input host system: runs before the tick and overwrites the snapshot
pub fn drive_random_input(mut host: ResMut<RandomInputHost>, mut snapshot: ResMut<InputSnapshot>) {
    *snapshot = host.next_snapshot();
}
