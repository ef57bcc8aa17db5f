//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::tuning::PhysicsTweaks;

/// Which side scored (or which roster an event concerns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled side
    Player,
    /// Opposing roster
    Ai,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "P"),
            Side::Ai => write!(f, "A"),
        }
    }
}

/// All game events that can be logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (once per run)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,
    },
    /// Tuning snapshot (logged after session start)
    Config(PhysicsTweaks),

    // === Match Events ===
    MatchStart { seed: u64, team_size: u32 },
    MatchEnd {
        score_player: u32,
        score_ai: u32,
        frames: u64,
    },

    // === Scoring Events ===
    Goal {
        scorer: Side,
        score_player: u32,
        score_ai: u32,
    },

    // === Skill Events ===
    /// Charge button pressed (Idle -> Charging)
    ChargeStart,
    /// Charge released; `connected` when the ball was in reach
    Kick { power: f32, connected: bool },
    /// Sideways nudge applied to the ball (signed x offset)
    Touch { nudge: f32 },
    /// Ball nudged along -z
    Lob,
    /// Ball popped up; carries the z velocity it was given
    Flick { vz: f32 },

    // === AI Events ===
    /// Opposing member `index` struck the ball
    AiStrike { index: usize },

    // === Rendering Host Notifications ===
    /// Spawn a trail effect at this position (fire-and-forget)
    Trail { pos: (f32, f32, f32) },

    // === Debug/Tick Events ===
    /// Sampled frame state
    Tick {
        frame: u64,
        player_pos: (f32, f32, f32),
        ball_pos: (f32, f32, f32),
        ball_vel: (f32, f32, f32),
        stamina: f32,
        kick_power: f32,
    },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::MatchStart { .. } => "MS",
            GameEvent::MatchEnd { .. } => "ME",
            GameEvent::Goal { .. } => "G",
            GameEvent::ChargeStart => "CS",
            GameEvent::Kick { .. } => "K",
            GameEvent::Touch { .. } => "TO",
            GameEvent::Lob => "LB",
            GameEvent::Flick { .. } => "FL",
            GameEvent::AiStrike { .. } => "AS",
            GameEvent::Trail { .. } => "TR",
            GameEvent::Tick { .. } => "T",
        }
    }

    /// Event name as used in scenario files (`event = "Kick"`)
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SessionStart",
            GameEvent::Config(_) => "Config",
            GameEvent::MatchStart { .. } => "MatchStart",
            GameEvent::MatchEnd { .. } => "MatchEnd",
            GameEvent::Goal { .. } => "Goal",
            GameEvent::ChargeStart => "ChargeStart",
            GameEvent::Kick { .. } => "Kick",
            GameEvent::Touch { .. } => "Touch",
            GameEvent::Lob => "Lob",
            GameEvent::Flick { .. } => "Flick",
            GameEvent::AiStrike { .. } => "AiStrike",
            GameEvent::Trail { .. } => "Trail",
            GameEvent::Tick { .. } => "Tick",
        }
    }
}
