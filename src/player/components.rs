//! Player-related components

use bevy::prelude::*;

use crate::tuning::PhysicsTweaks;

/// Marker for player entities (both rosters)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// 3D velocity vector, per tick. Only the ball moves by velocity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec3);

/// Marker for the one player driven by the input host
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ControlledPlayer;

/// Which side a player belongs to
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Team {
    /// Human side, attacks toward +z
    Home,
    /// AI side, attacks toward -z
    Away,
}

/// Position in the eleven-player roster (0 = controlled player / goalkeeper)
#[derive(Component, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct RosterIndex(pub usize);

/// Bounded stamina resource, scales movement speed.
/// Always within [stamina_min, stamina_max] after any update.
#[derive(Component, Clone, Copy, PartialEq, Debug)]
pub struct Stamina(pub f32);

impl Default for Stamina {
    fn default() -> Self {
        Self(crate::constants::STAMINA_MAX)
    }
}

impl Stamina {
    /// Spend stamina, never below the floor
    pub fn drain(&mut self, amount: f32, tweaks: &PhysicsTweaks) {
        self.0 -= amount;
        self.clamp(tweaks);
    }

    /// Recover stamina, never above the ceiling
    pub fn recover(&mut self, amount: f32, tweaks: &PhysicsTweaks) {
        self.0 += amount;
        self.clamp(tweaks);
    }

    pub fn clamp(&mut self, tweaks: &PhysicsTweaks) {
        if self.0 > tweaks.stamina_max {
            self.0 = tweaks.stamina_max;
        }
        if !(self.0 >= tweaks.stamina_min) {
            self.0 = tweaks.stamina_min;
        }
    }

    pub fn is_exhausted(&self, tweaks: &PhysicsTweaks) -> bool {
        self.0 <= tweaks.stamina_min
    }
}
