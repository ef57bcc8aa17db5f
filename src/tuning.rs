//! Global gameplay tuning settings

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;

// Serde default functions so partial tuning files only override what they name
fn default_ball_rest_height() -> f32 {
    BALL_REST_HEIGHT
}
fn default_ball_friction() -> f32 {
    BALL_FRICTION
}
fn default_ball_gravity_step() -> f32 {
    BALL_GRAVITY_STEP
}
fn default_player_speed() -> f32 {
    PLAYER_SPEED
}
fn default_sprint_multiplier() -> f32 {
    SPRINT_MULTIPLIER
}
fn default_stamina_min() -> f32 {
    STAMINA_MIN
}
fn default_stamina_max() -> f32 {
    STAMINA_MAX
}
fn default_stamina_drain() -> f32 {
    STAMINA_DRAIN
}
fn default_proximity_radius() -> f32 {
    PROXIMITY_RADIUS
}
fn default_kick_charge_rate() -> f32 {
    KICK_CHARGE_RATE
}
fn default_touch_nudge() -> f32 {
    TOUCH_NUDGE
}
fn default_lob_nudge() -> f32 {
    LOB_NUDGE
}
fn default_flick_threshold() -> f32 {
    FLICK_THRESHOLD
}
fn default_flick_lift() -> f32 {
    FLICK_LIFT
}
fn default_flick_speed() -> f32 {
    FLICK_SPEED
}
fn default_keeper_speed() -> f32 {
    KEEPER_SPEED
}
fn default_field_speed() -> f32 {
    FIELD_SPEED
}
fn default_ai_step_scale() -> f32 {
    AI_STEP_SCALE
}
fn default_ai_strike_factor() -> f32 {
    AI_STRIKE_FACTOR
}
fn default_keeper_depth() -> f32 {
    KEEPER_DEPTH
}
fn default_goal_line() -> f32 {
    GOAL_LINE
}
fn default_camera_height() -> f32 {
    CAMERA_HEIGHT
}
fn default_camera_distance() -> f32 {
    CAMERA_DISTANCE
}
fn default_camera_lerp() -> f32 {
    CAMERA_LERP
}

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// Runtime-adjustable simulation values, loaded from the tuning file
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsTweaks {
    // Ball
    #[serde(default = "default_ball_rest_height")]
    pub ball_rest_height: f32,
    #[serde(default = "default_ball_friction")]
    pub ball_friction: f32,
    #[serde(default = "default_ball_gravity_step")]
    pub ball_gravity_step: f32,
    // Movement and stamina
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,
    #[serde(default = "default_sprint_multiplier")]
    pub sprint_multiplier: f32,
    #[serde(default = "default_stamina_min")]
    pub stamina_min: f32,
    #[serde(default = "default_stamina_max")]
    pub stamina_max: f32,
    #[serde(default = "default_stamina_drain")]
    pub stamina_drain: f32,
    // Skills
    #[serde(default = "default_proximity_radius")]
    pub proximity_radius: f32,
    #[serde(default = "default_kick_charge_rate")]
    pub kick_charge_rate: f32,
    /// Upper bound for kick power. None keeps the linear ramp unbounded.
    #[serde(default)]
    pub kick_power_cap: Option<f32>,
    #[serde(default = "default_touch_nudge")]
    pub touch_nudge: f32,
    #[serde(default = "default_lob_nudge")]
    pub lob_nudge: f32,
    #[serde(default = "default_flick_threshold")]
    pub flick_threshold: f32,
    #[serde(default = "default_flick_lift")]
    pub flick_lift: f32,
    #[serde(default = "default_flick_speed")]
    pub flick_speed: f32,
    // AI
    #[serde(default = "default_keeper_speed")]
    pub keeper_speed: f32,
    #[serde(default = "default_field_speed")]
    pub field_speed: f32,
    #[serde(default = "default_ai_step_scale")]
    pub ai_step_scale: f32,
    #[serde(default = "default_ai_strike_factor")]
    pub ai_strike_factor: f32,
    #[serde(default = "default_keeper_depth")]
    pub keeper_depth: f32,
    // Scoring and camera
    #[serde(default = "default_goal_line")]
    pub goal_line: f32,
    #[serde(default = "default_camera_height")]
    pub camera_height: f32,
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f32,
    #[serde(default = "default_camera_lerp")]
    pub camera_lerp: f32,
}

impl Default for PhysicsTweaks {
    fn default() -> Self {
        Self {
            ball_rest_height: BALL_REST_HEIGHT,
            ball_friction: BALL_FRICTION,
            ball_gravity_step: BALL_GRAVITY_STEP,
            player_speed: PLAYER_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            stamina_min: STAMINA_MIN,
            stamina_max: STAMINA_MAX,
            stamina_drain: STAMINA_DRAIN,
            proximity_radius: PROXIMITY_RADIUS,
            kick_charge_rate: KICK_CHARGE_RATE,
            kick_power_cap: None,
            touch_nudge: TOUCH_NUDGE,
            lob_nudge: LOB_NUDGE,
            flick_threshold: FLICK_THRESHOLD,
            flick_lift: FLICK_LIFT,
            flick_speed: FLICK_SPEED,
            keeper_speed: KEEPER_SPEED,
            field_speed: FIELD_SPEED,
            ai_step_scale: AI_STEP_SCALE,
            ai_strike_factor: AI_STRIKE_FACTOR,
            keeper_depth: KEEPER_DEPTH,
            goal_line: GOAL_LINE,
            camera_height: CAMERA_HEIGHT,
            camera_distance: CAMERA_DISTANCE,
            camera_lerp: CAMERA_LERP,
        }
    }
}

impl PhysicsTweaks {
    /// Reject values that would break the per-tick invariants
    pub fn validate(&self) -> Result<(), String> {
        if !(self.stamina_min >= 0.0 && self.stamina_min <= self.stamina_max) {
            return Err(format!(
                "stamina_min ({}) must be within [0, stamina_max ({})]",
                self.stamina_min, self.stamina_max
            ));
        }
        if !(self.ball_friction > 0.0 && self.ball_friction <= 1.0) {
            return Err(format!(
                "ball_friction ({}) must be within (0, 1]",
                self.ball_friction
            ));
        }
        if !(self.proximity_radius > 0.0) {
            return Err(format!(
                "proximity_radius ({}) must be positive",
                self.proximity_radius
            ));
        }
        if !(self.goal_line > 0.0) {
            return Err(format!("goal_line ({}) must be positive", self.goal_line));
        }
        if let Some(cap) = self.kick_power_cap
            && !(cap >= 0.0)
        {
            return Err(format!("kick_power_cap ({}) must not be negative", cap));
        }
        Ok(())
    }
}

pub fn load_gameplay_tuning_from_file(path: &str) -> Result<PhysicsTweaks, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let tweaks: PhysicsTweaks =
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))?;
    tweaks
        .validate()
        .map_err(|e| format!("Invalid tuning in {}: {}", path, e))?;
    Ok(tweaks)
}

/// Load tuning from `path`, falling back to defaults on any error.
pub fn apply_tuning_file(tweaks: &mut PhysicsTweaks, path: &str) -> Result<(), String> {
    match load_gameplay_tuning_from_file(path) {
        Ok(loaded) => {
            *tweaks = loaded;
            Ok(())
        }
        Err(err) => {
            *tweaks = PhysicsTweaks::default();
            Err(err)
        }
    }
}

pub fn apply_global_tuning(tweaks: &mut PhysicsTweaks) -> Result<(), String> {
    apply_tuning_file(tweaks, GAMEPLAY_TUNING_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tweaks: PhysicsTweaks = serde_json::from_str(r#"{ "ball_friction": 0.9 }"#).unwrap();
        assert_eq!(tweaks.ball_friction, 0.9);
        assert_eq!(tweaks.stamina_min, STAMINA_MIN);
        assert_eq!(tweaks.kick_power_cap, None);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhysicsTweaks::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_stamina_bounds() {
        let tweaks = PhysicsTweaks {
            stamina_min: 0.8,
            stamina_max: 0.5,
            ..Default::default()
        };
        assert!(tweaks.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_cap() {
        let tweaks = PhysicsTweaks {
            kick_power_cap: Some(-1.0),
            ..Default::default()
        };
        assert!(tweaks.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let mut tweaks = PhysicsTweaks {
            ball_friction: 0.5,
            ..Default::default()
        };
        let result = apply_tuning_file(&mut tweaks, "config/does_not_exist.json");
        assert!(result.is_err());
        assert_eq!(tweaks, PhysicsTweaks::default());
    }

    #[test]
    fn test_shipped_tuning_matches_defaults() {
        let tweaks = load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE).unwrap();
        assert_eq!(tweaks, PhysicsTweaks::default());
    }
}
