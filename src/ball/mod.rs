//! Ball module - components and physics systems

mod components;
mod physics;

pub use components::*;
pub use physics::*;

// Re-export Velocity from player since it's shared
pub use crate::player::Velocity;
