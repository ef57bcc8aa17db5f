//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Field arrangement before tick 1. Anything left out keeps its kickoff value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TestSetup {
    /// Bench every AI member not listed under `[[setup.ai]]`
    pub park_ai: bool,
    pub kick_power_cap: Option<f32>,
    pub score: Option<ScoreDef>,
    pub ball: Option<BallDef>,
    pub player: Option<PlayerDef>,
    pub ai: Vec<AiDef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreDef {
    #[serde(default)]
    pub player: u32,
    #[serde(default)]
    pub ai: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BallDef {
    pub x: f32,
    #[serde(default = "default_ball_y")]
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
    #[serde(default)]
    pub vz: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlayerDef {
    pub x: f32,
    #[serde(default = "default_player_y")]
    pub y: f32,
    pub z: f32,
    pub stamina: Option<f32>,
}

/// Placement for one opposing member (index 0 is the goalkeeper)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AiDef {
    pub index: usize,
    pub x: f32,
    #[serde(default = "default_player_y")]
    pub y: f32,
    pub z: f32,
    pub stamina: Option<f32>,
}

fn default_ball_y() -> f32 {
    crate::constants::BALL_REST_HEIGHT
}

fn default_player_y() -> f32 {
    crate::constants::PLAYER_HEIGHT_OFFSET
}

/// Input change taking effect on tick `frame`. Fields left out keep their
/// previous value; `buttons` replaces every action flag using the pad mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub analog_x: Option<f32>,
    pub analog_y: Option<f32>,
    pub sprint: Option<bool>,
    pub charge: Option<bool>,
    pub touch: Option<bool>,
    pub lob: Option<bool>,
    pub flick: Option<bool>,
    /// Pad buttons held, e.g. `["a", "y"]`
    pub buttons: Option<Vec<String>>,
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
    /// Check stamina, ball height and charge bounds after every tick
    #[serde(default)]
    pub invariants: bool,
    /// Run at least this many ticks
    pub frames: Option<u64>,
}

/// Expected event in sequence
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a given tick
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

impl TestDefinition {
    /// Last tick the test needs to run
    pub fn last_frame(&self) -> u64 {
        let inputs = self.input.iter().map(|i| i.frame);
        let states = self.expect.state.iter().map(|s| s.after_frame);
        let events = self.expect.sequence.iter().filter_map(|e| e.frame_max);
        inputs
            .chain(states)
            .chain(events)
            .chain(self.expect.frames)
            .max()
            .unwrap_or(60)
    }
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
park_ai = true
[setup.ball]
x = 0.0
z = 41.0
[[setup.ai]]
index = 0
x = 3.0
z = -5.0

[[input]]
frame = 1
buttons = ["a"]

[[expect.state]]
after_frame = 1
checks = ["score.player = 1"]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert!(def.setup.park_ai);
        let ball = def.setup.ball.unwrap();
        assert_eq!(ball.y, 0.5);
        assert_eq!(def.setup.ai[0].y, 1.0);
        assert_eq!(def.input[0].buttons.as_deref(), Some(&["a".to_string()][..]));
        assert!(!def.expect.invariants);
        assert_eq!(def.last_frame(), 1);
    }

    #[test]
    fn test_minimal_file_defaults_to_sixty_frames() {
        let def: TestDefinition = toml::from_str(r#"name = "Empty""#).unwrap();
        assert!(def.setup.ball.is_none());
        assert_eq!(def.last_frame(), 60);
    }
}
