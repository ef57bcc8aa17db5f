//! Metrics collection for headless sessions

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::events::{BusEvent, GameEvent};
use crate::tuning::PhysicsTweaks;

/// Running counters for one session, fed after every tick
#[derive(Debug, Clone)]
pub struct SessionMetrics {
    pub kicks: u32,
    pub connected_kicks: u32,
    pub ai_strikes: u32,
    pub touches: u32,
    pub lobs: u32,
    pub flicks: u32,
    pub max_kick_power: f32,
    pub min_player_stamina: f32,
    pub min_ai_stamina: f32,
    pub min_ball_height: f32,
    pub invariant_violations: u32,
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self {
            kicks: 0,
            connected_kicks: 0,
            ai_strikes: 0,
            touches: 0,
            lobs: 0,
            flicks: 0,
            max_kick_power: 0.0,
            min_player_stamina: f32::INFINITY,
            min_ai_stamina: f32::INFINITY,
            min_ball_height: f32::INFINITY,
            invariant_violations: 0,
        }
    }
}

/// State read back from the world after a tick
#[derive(Debug, Clone, Default)]
pub struct TickSample {
    pub player_stamina: f32,
    pub ai_stamina: Vec<f32>,
    pub ball_height: f32,
    pub charging: bool,
    pub kick_power: f32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_events(&mut self, events: &[BusEvent]) {
        for bus_event in events {
            match &bus_event.event {
                GameEvent::Kick { power, connected } => {
                    self.kicks += 1;
                    if *connected {
                        self.connected_kicks += 1;
                    }
                    self.max_kick_power = self.max_kick_power.max(*power);
                }
                GameEvent::AiStrike { .. } => self.ai_strikes += 1,
                GameEvent::Touch { .. } => self.touches += 1,
                GameEvent::Lob => self.lobs += 1,
                GameEvent::Flick { .. } => self.flicks += 1,
                _ => {}
            }
        }
    }

    /// Track extremes and count any bound the tick failed to keep
    pub fn record_tick(&mut self, sample: &TickSample, tweaks: &PhysicsTweaks) {
        self.min_player_stamina = self.min_player_stamina.min(sample.player_stamina);
        self.min_ball_height = self.min_ball_height.min(sample.ball_height);
        self.max_kick_power = self.max_kick_power.max(sample.kick_power);

        let stamina_ok = |s: f32| s >= tweaks.stamina_min && s <= tweaks.stamina_max;
        let mut violations = 0;
        if !stamina_ok(sample.player_stamina) {
            violations += 1;
        }
        for &stamina in &sample.ai_stamina {
            self.min_ai_stamina = self.min_ai_stamina.min(stamina);
            if !stamina_ok(stamina) {
                violations += 1;
            }
        }
        if !(sample.ball_height >= tweaks.ball_rest_height) {
            violations += 1;
        }
        if sample.kick_power < 0.0 || (!sample.charging && sample.kick_power != 0.0) {
            violations += 1;
        }
        if let Some(cap) = tweaks.kick_power_cap
            && sample.kick_power > cap
        {
            violations += 1;
        }

        if violations > 0 {
            warn!("{} invariant violation(s) this tick", violations);
        }
        self.invariant_violations += violations;
    }
}

/// Result of a single session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub seed: u64,
    pub frames: u64,
    pub score_player: u32,
    pub score_ai: u32,
    /// Final score text as shown to the player
    pub score_text: String,
    pub kicks: u32,
    pub connected_kicks: u32,
    pub ai_strikes: u32,
    pub touches: u32,
    pub lobs: u32,
    pub flicks: u32,
    pub max_kick_power: f32,
    pub min_player_stamina: f32,
    pub min_ai_stamina: f32,
    pub min_ball_height: f32,
    pub invariant_violations: u32,
    /// Event log written for this session, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_log: Option<String>,
}

/// Totals over a batch of sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub sessions: u32,
    pub total_frames: u64,
    pub goals_player: u32,
    pub goals_ai: u32,
    pub kicks: u32,
    pub ai_strikes: u32,
    pub invariant_violations: u32,
    /// Goals per 1000 ticks over the whole batch
    pub goal_rate: f32,
}

impl BatchSummary {
    pub fn from_results(results: &[SessionResult]) -> Self {
        let mut summary = Self {
            sessions: results.len() as u32,
            ..Default::default()
        };
        for r in results {
            summary.total_frames += r.frames;
            summary.goals_player += r.score_player;
            summary.goals_ai += r.score_ai;
            summary.kicks += r.kicks;
            summary.ai_strikes += r.ai_strikes;
            summary.invariant_violations += r.invariant_violations;
        }
        if summary.total_frames > 0 {
            summary.goal_rate = (summary.goals_player + summary.goals_ai) as f32 * 1000.0
                / summary.total_frames as f32;
        }
        summary
    }
}
