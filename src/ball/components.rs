//! Ball-related components

use bevy::prelude::*;

/// Marker for the ball entity (exactly one per match)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ball;
