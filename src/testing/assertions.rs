//! Assertion checking for test expectations

use bevy::prelude::*;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::ball::Velocity;
use crate::events::BusEvent;
use crate::player::Stamina;
use crate::scoring::Score;
use crate::shooting::ChargeState;
use crate::simulation::MatchHandles;

/// Tolerance for `=` and `!=` on floats
const FLOAT_TOLERANCE: f32 = 1e-3;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n    Expected: {}\n    Actual: {}",
            self.message, self.expected, self.actual
        )
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
}

impl CapturedEvent {
    pub fn from_bus_event(bus_event: &BusEvent) -> Self {
        Self {
            frame: bus_event.frame,
            event_type: bus_event.event.name().to_string(),
        }
    }
}

/// Check if captured events match expected sequence (in order, gaps allowed)
pub fn check_sequence(
    expected: &[ExpectedEvent],
    captured: &[CapturedEvent],
) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.event_type == exp.event);

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                return Err(AssertionError {
                    message: format!("Event #{} '{}' not found", i + 1, exp.event),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..]
                            .iter()
                            .map(|e| &e.event_type)
                            .collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Position and stamina of one body
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    pub pos: Vec3,
    pub stamina: f32,
}

/// World state for assertions
#[derive(Debug, Clone)]
pub struct WorldState {
    pub score: Score,
    pub ball_pos: Vec3,
    pub ball_vel: Vec3,
    pub player: BodyState,
    pub charge: ChargeState,
    /// Away roster in index order
    pub ai: Vec<BodyState>,
}

impl WorldState {
    pub fn extract(world: &World) -> Option<Self> {
        let handles = world.resource::<MatchHandles>();
        let body = |entity: Entity| -> Option<BodyState> {
            Some(BodyState {
                pos: world.get::<Transform>(entity)?.translation,
                stamina: world.get::<Stamina>(entity)?.0,
            })
        };
        Some(Self {
            score: *world.resource::<Score>(),
            ball_pos: world.get::<Transform>(handles.ball)?.translation,
            ball_vel: world.get::<Velocity>(handles.ball)?.0,
            player: body(handles.controlled)?,
            charge: *world.resource::<ChargeState>(),
            ai: handles.away.iter().filter_map(|&e| body(e)).collect(),
        })
    }
}

/// Value found at a check path
enum Value {
    Number(f32),
    Count(u32),
    Flag(bool),
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

fn vec_component(v: Vec3, axis: &str) -> Option<f32> {
    match axis {
        "x" => Some(v.x),
        "y" => Some(v.y),
        "z" => Some(v.z),
        _ => None,
    }
}

fn body_field(body: &BodyState, field: &str) -> Option<Value> {
    if field == "stamina" {
        return Some(Value::Number(body.stamina));
    }
    vec_component(body.pos, field).map(Value::Number)
}

fn lookup(path: &str, state: &WorldState) -> Option<Value> {
    let parts: Vec<&str> = path.split('.').collect();
    match parts.as_slice() {
        ["score", "player"] => Some(Value::Count(state.score.player)),
        ["score", "ai"] => Some(Value::Count(state.score.ai)),
        ["ball", field] => match *field {
            "vx" => Some(Value::Number(state.ball_vel.x)),
            "vy" => Some(Value::Number(state.ball_vel.y)),
            "vz" => Some(Value::Number(state.ball_vel.z)),
            axis => vec_component(state.ball_pos, axis).map(Value::Number),
        },
        ["player", field] => body_field(&state.player, field),
        ["charge", "charging"] => Some(Value::Flag(state.charge.charging)),
        ["charge", "kick_power"] => Some(Value::Number(state.charge.kick_power)),
        ["ai", index, field] => {
            let body = state.ai.get(index.parse::<usize>().ok()?)?;
            body_field(body, field)
        }
        _ => None,
    }
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        let value = lookup(path, state).ok_or_else(|| AssertionError {
            message: format!("Unknown path in check: {}", check),
            expected: "score.*, ball.*, player.*, charge.*, ai.N.*".to_string(),
            actual: path.to_string(),
        })?;

        match value {
            Value::Number(actual) => {
                check_float_comparison(path, actual, operator, expected_value)?
            }
            Value::Count(actual) => {
                check_float_comparison(path, actual as f32, operator, expected_value)?
            }
            Value::Flag(actual) => {
                let expected = match expected_value {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(AssertionError {
                            message: format!("Invalid value for {}", path),
                            expected: "true or false".to_string(),
                            actual: other.to_string(),
                        });
                    }
                };
                let pass = match operator {
                    "=" => actual == expected,
                    "!=" => actual != expected,
                    _ => false,
                };
                if !pass {
                    return Err(AssertionError {
                        message: format!("Check failed: {}", check),
                        expected: format!("{} {} {}", path, operator, expected_value),
                        actual: actual.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(
    path: &str,
    actual: f32,
    operator: &str,
    expected_str: &str,
) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < FLOAT_TOLERANCE,
        "!=" => (actual - value).abs() >= FLOAT_TOLERANCE,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!(
                "Check failed: {} {} {} (actual: {:.4})",
                path, operator, expected_str, actual
            ),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.4}", actual),
        });
    }

    Ok(())
}
