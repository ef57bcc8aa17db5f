//! AI module - opposing roster behavior

mod controller;

pub use controller::*;

use bevy::prelude::*;

/// Role of an opposing member. Index 0 keeps goal, everyone else chases.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AiRole {
    /// Slides along its goal line, never advances
    Goalkeeper,
    /// Chases the ball on both axes
    Field,
}

impl AiRole {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            AiRole::Goalkeeper
        } else {
            AiRole::Field
        }
    }
}

/// An opposing roster member driven by `update_ai`
#[derive(Component, Clone, Copy, Debug)]
pub struct AiMember {
    pub index: usize,
    pub role: AiRole,
}

impl AiMember {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            role: AiRole::for_index(index),
        }
    }
}
