//! Session runner - drives headless apps tick by tick and collects results

use bevy::prelude::*;
use rand::Rng;
use serde::Serialize;

use super::app_builder::HeadlessAppBuilder;
use super::config::{InputMode, SimConfig};
use super::metrics::{BatchSummary, SessionMetrics, SessionResult, TickSample};
use super::parallel::run_sessions_parallel;
use super::plugin::{MatchClock, MatchHandles};
use crate::ball::Velocity;
use crate::constants::TEAM_SIZE;
use crate::events::{EventBus, EventLogConfig, EventLogger, GameEvent};
use crate::player::Stamina;
use crate::scoring::Score;
use crate::shooting::ChargeState;
use crate::tuning::PhysicsTweaks;

/// Build the app for one session from the run configuration
pub fn build_session_app(config: &SimConfig, seed: u64, install_logging: bool) -> App {
    let mut builder = HeadlessAppBuilder::new();
    if config.parallel > 0 {
        builder = builder.with_minimal_threads();
    }
    if install_logging {
        builder = builder.with_logging();
    }
    if let Some(path) = &config.tuning_file {
        builder = builder.with_tuning_file(path);
    }
    if config.input == InputMode::Random {
        builder = builder.with_random_input(seed);
    }
    builder.build()
}

/// Read the invariant-relevant state out of the world after a tick
pub fn sample_world(world: &World) -> TickSample {
    let handles = world.resource::<MatchHandles>();
    let charge = world.resource::<ChargeState>();
    TickSample {
        player_stamina: world
            .get::<Stamina>(handles.controlled)
            .map_or(f32::NAN, |s| s.0),
        ai_stamina: handles
            .away
            .iter()
            .filter_map(|&e| world.get::<Stamina>(e).map(|s| s.0))
            .collect(),
        ball_height: world
            .get::<Transform>(handles.ball)
            .map_or(f32::NAN, |t| t.translation.y),
        charging: charge.charging,
        kick_power: charge.kick_power,
    }
}

fn tick_event(world: &World) -> Option<GameEvent> {
    let handles = world.resource::<MatchHandles>();
    let player = world.get::<Transform>(handles.controlled)?;
    let stamina = world.get::<Stamina>(handles.controlled)?;
    let ball = world.get::<Transform>(handles.ball)?;
    let ball_velocity = world.get::<Velocity>(handles.ball)?;
    Some(GameEvent::Tick {
        frame: world.resource::<MatchClock>().frame,
        player_pos: player.translation.into(),
        ball_pos: ball.translation.into(),
        ball_vel: ball_velocity.0.into(),
        stamina: stamina.0,
        kick_power: world.resource::<ChargeState>().kick_power,
    })
}

/// Run one session of `config.frames` ticks
pub fn run_session(config: &SimConfig, seed: u64) -> SessionResult {
    run_session_inner(config, seed, false)
}

fn run_session_inner(config: &SimConfig, seed: u64, install_logging: bool) -> SessionResult {
    let mut app = build_session_app(config, seed, install_logging);
    let tweaks = app.world().resource::<PhysicsTweaks>().clone();

    let mut logger = EventLogger::new(EventLogConfig {
        log_dir: config.log_dir.clone().into(),
        enabled: config.log_events,
        tick_sample_frames: config.tick_sample_frames,
    });
    if config.log_events {
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
        logger.start_session(&timestamp);
        logger.log(
            0,
            GameEvent::MatchStart {
                seed,
                team_size: TEAM_SIZE as u32,
            },
        );
        logger.log_config(&tweaks);
    }

    let mut metrics = SessionMetrics::new();
    for _ in 0..config.frames {
        app.update();

        let events = app.world_mut().resource_mut::<EventBus>().drain();
        metrics.record_events(&events);
        metrics.record_tick(&sample_world(app.world()), &tweaks);

        if logger.is_active() {
            logger.log_bus_events(&events);
            let frame = app.world().resource::<MatchClock>().frame;
            if logger.should_log_tick(frame)
                && let Some(tick) = tick_event(app.world())
            {
                logger.log(frame, tick);
            }
        }
        app.world_mut().resource_mut::<EventBus>().clear_processed();
    }

    let score = *app.world().resource::<Score>();
    let frames = app.world().resource::<MatchClock>().frame;
    logger.log(
        frames,
        GameEvent::MatchEnd {
            score_player: score.player,
            score_ai: score.ai,
            frames,
        },
    );
    let event_log = logger.path().map(|p| p.display().to_string());
    logger.end_session();

    SessionResult {
        seed,
        frames,
        score_player: score.player,
        score_ai: score.ai,
        score_text: score.to_string(),
        kicks: metrics.kicks,
        connected_kicks: metrics.connected_kicks,
        ai_strikes: metrics.ai_strikes,
        touches: metrics.touches,
        lobs: metrics.lobs,
        flicks: metrics.flicks,
        max_kick_power: metrics.max_kick_power,
        min_player_stamina: metrics.min_player_stamina,
        min_ai_stamina: metrics.min_ai_stamina,
        min_ball_height: metrics.min_ball_height,
        invariant_violations: metrics.invariant_violations,
        event_log,
    }
}

/// Seeds for a batch: consecutive from the base seed
pub fn session_seeds(base_seed: u64, sessions: u32) -> Vec<u64> {
    (0..sessions as u64)
        .map(|i| base_seed.wrapping_add(i))
        .collect()
}

#[derive(Serialize)]
struct BatchReport<'a> {
    summary: BatchSummary,
    sessions: &'a [SessionResult],
}

/// Main simulation entry point
pub fn run_simulation(config: SimConfig) {
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let seeds = session_seeds(base_seed, config.sessions.max(1));

    if !config.quiet {
        println!(
            "Running {} session(s) of {} frames, {:?} input (seed: {})",
            seeds.len(),
            config.frames,
            config.input,
            base_seed
        );
    }

    let results = if config.parallel > 0 && seeds.len() > 1 {
        run_sessions_parallel(&config, &seeds)
    } else {
        let mut results = Vec::with_capacity(seeds.len());
        for (i, &seed) in seeds.iter().enumerate() {
            if !config.quiet && seeds.len() > 1 {
                print!("\rSession {}/{}...", i + 1, seeds.len());
                use std::io::Write;
                std::io::stdout().flush().ok();
            }
            // The log subscriber is process-wide, install it once
            results.push(run_session_inner(&config, seed, i == 0 && !config.quiet));
        }
        if !config.quiet && seeds.len() > 1 {
            println!("\rCompleted {} sessions.", seeds.len());
        }
        results
    };

    let summary = BatchSummary::from_results(&results);
    if !config.quiet {
        println!(
            "\nGoals: player {} - ai {} ({:.2} per 1000 ticks), kicks {}, AI strikes {}",
            summary.goals_player,
            summary.goals_ai,
            summary.goal_rate,
            summary.kicks,
            summary.ai_strikes
        );
        if summary.invariant_violations > 0 {
            println!("WARNING: {} invariant violations", summary.invariant_violations);
        }
    }

    let json = if results.len() == 1 {
        serde_json::to_string_pretty(&results[0])
    } else {
        serde_json::to_string_pretty(&BatchReport {
            summary,
            sessions: &results,
        })
    };
    match json {
        Ok(json) => output_json(&json, &config),
        Err(e) => eprintln!("Failed to serialize results: {}", e),
    }
}

fn output_json(json: &str, config: &SimConfig) {
    if let Some(output_file) = &config.output_file {
        match std::fs::write(output_file, json) {
            Ok(()) => println!("Results written to {}", output_file),
            Err(e) => eprintln!("Failed to write {}: {}", output_file, e),
        }
    } else {
        println!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(frames: u64, input: InputMode) -> SimConfig {
        SimConfig {
            frames,
            input,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_session_runs_clean() {
        let result = run_session(&quick(120, InputMode::Idle), 1);
        assert_eq!(result.frames, 120);
        assert_eq!(result.invariant_violations, 0);
        assert_eq!(result.kicks, 0);
        assert!(result.min_ball_height >= 0.5);
    }

    #[test]
    fn test_random_session_is_deterministic() {
        let config = quick(600, InputMode::Random);
        let a = run_session(&config, 99);
        let b = run_session(&config, 99);
        assert_eq!(a.score_text, b.score_text);
        assert_eq!(a.kicks, b.kicks);
        assert_eq!(a.touches, b.touches);
        assert_eq!(a.ai_strikes, b.ai_strikes);
        assert_eq!(a.max_kick_power, b.max_kick_power);
        assert_eq!(a.invariant_violations, 0);
    }

    #[test]
    fn test_session_seeds() {
        assert_eq!(session_seeds(10, 3), vec![10, 11, 12]);
        assert_eq!(session_seeds(u64::MAX, 2), vec![u64::MAX, 0]);
    }

    #[test]
    fn test_event_log_is_written() {
        let dir = std::env::temp_dir().join(format!("kickabout_runner_{}", uuid::Uuid::new_v4()));
        let config = SimConfig {
            log_events: true,
            log_dir: dir.display().to_string(),
            tick_sample_frames: 10,
            ..quick(30, InputMode::Idle)
        };

        let result = run_session(&config, 5);

        let path = result.event_log.expect("log path");
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[0].contains("|SE|"));
        assert!(lines[1].starts_with("F:000000|MS|5|11"));
        assert!(lines[2].contains("|CF|"));
        assert_eq!(lines.iter().filter(|l| l.contains("|T|")).count(), 3);
        assert!(lines.last().unwrap().starts_with("F:000030|ME|0|0|30"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
