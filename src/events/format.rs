//! Compact text format for game event serialization
//!
//! Format: `F:NNNNNN|CODE|data...`
//! - F:NNNNNN = tick number (6 digits, wraps at 999999)
//! - CODE = event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! F:000000|MS|42|11
//! F:000041|K|0.80|1
//! F:000041|TR|0.0,0.5,0.0
//! F:000300|AS|3
//! F:000512|G|P|1|0
//! F:003600|ME|1|2|3600
//! ```
//!
//! Tick samples:
//! ```text
//! F:000060|T|60|-20.0,1.0,-15.0|0.0,0.5,0.0|0.0,0.0,0.0|1.00|0.00
//!           ^frame|player_pos|ball_pos|ball_vel|stamina|kick_power
//! ```

use super::types::{GameEvent, Side};
use crate::tuning::PhysicsTweaks;

fn fmt_vec(v: (f32, f32, f32)) -> String {
    format!("{:.1},{:.1},{:.1}", v.0, v.1, v.2)
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(frame: u64, event: &GameEvent) -> String {
    let ts = format!("F:{:06}", frame % 1_000_000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(tweaks) => {
            // JSON keeps every tuning field without a bespoke layout
            serde_json::to_string(tweaks).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::MatchStart { seed, team_size } => format!("{}|{}", seed, team_size),
        GameEvent::MatchEnd {
            score_player,
            score_ai,
            frames,
        } => format!("{}|{}|{}", score_player, score_ai, frames),
        GameEvent::Goal {
            scorer,
            score_player,
            score_ai,
        } => format!("{}|{}|{}", scorer, score_player, score_ai),
        GameEvent::ChargeStart => String::new(),
        GameEvent::Kick { power, connected } => {
            format!("{:.2}|{}", power, if *connected { 1 } else { 0 })
        }
        GameEvent::Touch { nudge } => format!("{:.2}", nudge),
        GameEvent::Lob => String::new(),
        GameEvent::Flick { vz } => format!("{:.2}", vz),
        GameEvent::AiStrike { index } => index.to_string(),
        GameEvent::Trail { pos } => fmt_vec(*pos),
        GameEvent::Tick {
            frame,
            player_pos,
            ball_pos,
            ball_vel,
            stamina,
            kick_power,
        } => format!(
            "{}|{}|{}|{}|{:.2}|{:.2}",
            frame,
            fmt_vec(*player_pos),
            fmt_vec(*ball_pos),
            fmt_vec(*ball_vel),
            stamina,
            kick_power
        ),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a log line back into frame and event (for reading .evlog files)
pub fn parse_event(line: &str) -> Option<(u64, GameEvent)> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let frame: u64 = parts[0].strip_prefix("F:")?.parse().ok()?;
    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SE" if data.len() >= 2 => GameEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
        },
        "CF" => {
            let tweaks: PhysicsTweaks = serde_json::from_str(&data.join("|")).ok()?;
            GameEvent::Config(tweaks)
        }
        "MS" if data.len() >= 2 => GameEvent::MatchStart {
            seed: data[0].parse().ok()?,
            team_size: data[1].parse().ok()?,
        },
        "ME" if data.len() >= 3 => GameEvent::MatchEnd {
            score_player: data[0].parse().ok()?,
            score_ai: data[1].parse().ok()?,
            frames: data[2].parse().ok()?,
        },
        "G" if data.len() >= 3 => GameEvent::Goal {
            scorer: parse_side(data[0])?,
            score_player: data[1].parse().ok()?,
            score_ai: data[2].parse().ok()?,
        },
        "CS" => GameEvent::ChargeStart,
        "K" if data.len() >= 2 => GameEvent::Kick {
            power: data[0].parse().ok()?,
            connected: data[1] == "1",
        },
        "TO" => GameEvent::Touch {
            nudge: data[0].parse().ok()?,
        },
        "LB" => GameEvent::Lob,
        "FL" => GameEvent::Flick {
            vz: data[0].parse().ok()?,
        },
        "AS" => GameEvent::AiStrike {
            index: data[0].parse().ok()?,
        },
        "TR" => GameEvent::Trail {
            pos: parse_vec(data[0])?,
        },
        "T" if data.len() >= 6 => GameEvent::Tick {
            frame: data[0].parse().ok()?,
            player_pos: parse_vec(data[1])?,
            ball_pos: parse_vec(data[2])?,
            ball_vel: parse_vec(data[3])?,
            stamina: data[4].parse().ok()?,
            kick_power: data[5].parse().ok()?,
        },
        _ => return None,
    };

    Some((frame, event))
}

fn parse_side(s: &str) -> Option<Side> {
    match s {
        "P" => Some(Side::Player),
        "A" => Some(Side::Ai),
        _ => None,
    }
}

fn parse_vec(s: &str) -> Option<(f32, f32, f32)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parts[0].parse().ok()?,
        parts[1].parse().ok()?,
        parts[2].parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_line_layout() {
        let event = GameEvent::Goal {
            scorer: Side::Player,
            score_player: 3,
            score_ai: 3,
        };
        assert_eq!(serialize_event(512, &event), "F:000512|G|P|3|3");
    }

    #[test]
    fn test_payloadless_events_keep_trailing_separator() {
        assert_eq!(serialize_event(7, &GameEvent::Lob), "F:000007|LB|");
        let (frame, parsed) = parse_event("F:000007|LB|").unwrap();
        assert_eq!(frame, 7);
        assert_eq!(parsed, GameEvent::Lob);
    }

    #[test]
    fn test_parse_kick_and_trail() {
        let (frame, kick) = parse_event("F:000041|K|0.80|1").unwrap();
        assert_eq!(frame, 41);
        let GameEvent::Kick { power, connected } = kick else {
            panic!("Wrong event type");
        };
        assert!((power - 0.8).abs() < 0.01);
        assert!(connected);

        let line = serialize_event(41, &GameEvent::Trail { pos: (1.25, 0.5, -3.0) });
        let (_, trail) = parse_event(&line).unwrap();
        let GameEvent::Trail { pos } = trail else {
            panic!("Wrong event type");
        };
        assert!((pos.0 - 1.2).abs() < 0.11);
        assert_eq!(pos.2, -3.0);
    }

    #[test]
    fn test_config_line_reads_back() {
        let tweaks = PhysicsTweaks::default();
        let line = serialize_event(0, &GameEvent::Config(tweaks.clone()));
        assert!(line.starts_with("F:000000|CF|{"));
        let (_, parsed) = parse_event(&line).unwrap();
        assert_eq!(parsed, GameEvent::Config(tweaks));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_event("not an event").is_none());
        assert!(parse_event("F:000001|ZZ|1").is_none());
        assert!(parse_event("T:00001|G|P|1|0").is_none());
    }
}
