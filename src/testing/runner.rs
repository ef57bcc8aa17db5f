//! Test execution engine

use bevy::prelude::*;

use crate::ai::Benched;
use crate::ball::Velocity;
use crate::events::EventBus;
use crate::player::Stamina;
use crate::scoring::{Score, ScoreDisplay};
use crate::simulation::{
    HeadlessAppBuilder, MatchHandles, SessionMetrics, SimulationTick, sample_world,
};
use crate::tuning::PhysicsTweaks;

use super::assertions::{
    AssertionError, CapturedEvent, WorldState, check_sequence, check_state,
};
use super::input::{ScriptedInputs, drive_scripted_input};
use super::parser::{TestDefinition, TestSetup};

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Build the scenario app: default tuning plus the setup's cap, scripted input
/// ahead of the tick, field arranged before tick 1
fn build_test_app(test: &TestDefinition) -> Result<App, String> {
    let tweaks = PhysicsTweaks {
        kick_power_cap: test.setup.kick_power_cap,
        ..Default::default()
    };
    tweaks.validate()?;

    let mut app = HeadlessAppBuilder::new().with_tweaks(tweaks).build();
    app.insert_resource(ScriptedInputs::from_inputs(&test.input));
    app.add_systems(Update, drive_scripted_input.before(SimulationTick));

    apply_setup(app.world_mut(), &test.setup)?;
    Ok(app)
}

fn apply_setup(world: &mut World, setup: &TestSetup) -> Result<(), String> {
    let handles = world.resource::<MatchHandles>().clone();

    if let Some(score) = setup.score {
        let score = Score {
            player: score.player,
            ai: score.ai,
        };
        world.insert_resource(score);
        world.insert_resource(ScoreDisplay(score.to_string()));
    }

    if let Some(ball) = setup.ball {
        let mut entity = world.entity_mut(handles.ball);
        if let Some(mut transform) = entity.get_mut::<Transform>() {
            transform.translation = Vec3::new(ball.x, ball.y, ball.z);
        }
        if let Some(mut velocity) = entity.get_mut::<Velocity>() {
            velocity.0 = Vec3::new(ball.vx, ball.vy, ball.vz);
        }
    }

    if let Some(player) = setup.player {
        place(
            world,
            handles.controlled,
            Vec3::new(player.x, player.y, player.z),
            player.stamina,
        );
    }

    for ai in &setup.ai {
        let Some(&entity) = handles.away.get(ai.index) else {
            return Err(format!(
                "AI index {} out of range (roster has {})",
                ai.index,
                handles.away.len()
            ));
        };
        place(world, entity, Vec3::new(ai.x, ai.y, ai.z), ai.stamina);
    }

    if setup.park_ai {
        for (index, &entity) in handles.away.iter().enumerate() {
            if !setup.ai.iter().any(|ai| ai.index == index) {
                world.entity_mut(entity).insert(Benched);
            }
        }
    }

    Ok(())
}

fn place(world: &mut World, entity: Entity, position: Vec3, stamina: Option<f32>) {
    let mut entity = world.entity_mut(entity);
    if let Some(mut transform) = entity.get_mut::<Transform>() {
        transform.translation = position;
    }
    if let Some(value) = stamina
        && let Some(mut current) = entity.get_mut::<Stamina>()
    {
        current.0 = value;
    }
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let mut app = match build_test_app(test) {
        Ok(app) => app,
        Err(message) => return TestResult::Error { message },
    };
    let tweaks = app.world().resource::<PhysicsTweaks>().clone();

    let last_frame = test.last_frame();
    let mut captured: Vec<CapturedEvent> = Vec::new();
    let mut metrics = SessionMetrics::new();

    for frame in 1..=last_frame {
        app.update();

        let events = app.world_mut().resource_mut::<EventBus>().drain();
        captured.extend(events.iter().map(CapturedEvent::from_bus_event));
        app.world_mut().resource_mut::<EventBus>().clear_processed();

        if test.expect.invariants {
            let before = metrics.invariant_violations;
            let sample = sample_world(app.world());
            metrics.record_tick(&sample, &tweaks);
            if metrics.invariant_violations > before {
                return TestResult::Fail {
                    error: AssertionError {
                        message: format!("Invariant violated after frame {}", frame),
                        expected: "stamina, ball height and kick power within bounds".to_string(),
                        actual: format!("{:?}", sample),
                    },
                };
            }
        }

        let checks: Vec<_> = test
            .expect
            .state
            .iter()
            .filter(|s| s.after_frame == frame)
            .collect();
        if checks.is_empty() {
            continue;
        }
        let Some(state) = WorldState::extract(app.world()) else {
            return TestResult::Error {
                message: format!("Match entities missing at frame {}", frame),
            };
        };
        for assertion in checks {
            if let Err(error) = check_state(assertion, &state) {
                return TestResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass { frames: last_frame }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::parse_test_file;
    use crate::testing::SCENARIOS_DIR;
    use std::path::{Path, PathBuf};

    fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect(&path, out);
            } else if path.extension().is_some_and(|e| e == "toml") {
                out.push(path);
            }
        }
    }

    #[test]
    fn test_all_scenarios_pass() {
        let mut files = Vec::new();
        collect(Path::new(SCENARIOS_DIR), &mut files);
        files.sort();
        assert!(!files.is_empty(), "no scenarios under {}", SCENARIOS_DIR);

        let mut failures = Vec::new();
        for path in &files {
            let result = parse_test_file(path).map(|def| run_test(&def));
            match result {
                Ok(TestResult::Pass { .. }) => {}
                Ok(TestResult::Fail { error }) => {
                    failures.push(format!("{}: {}", path.display(), error))
                }
                Ok(TestResult::Error { message }) | Err(message) => {
                    failures.push(format!("{}: {}", path.display(), message))
                }
            }
        }
        assert!(failures.is_empty(), "{}", failures.join("\n"));
    }

    #[test]
    fn test_out_of_range_ai_is_an_error() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Bad index"
[[setup.ai]]
index = 11
x = 0.0
z = 0.0
"#,
        )
        .unwrap();
        assert!(matches!(run_test(&def), TestResult::Error { .. }));
    }

    #[test]
    fn test_setup_applies_before_first_tick() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Setup"
[setup]
park_ai = true
[setup.score]
player = 2
ai = 1
[setup.player]
x = 5.0
z = 5.0
stamina = 0.5
"#,
        )
        .unwrap();
        let app = build_test_app(&def).unwrap();
        let state = WorldState::extract(app.world()).unwrap();
        assert_eq!(state.score, Score { player: 2, ai: 1 });
        assert_eq!(state.player.pos, Vec3::new(5.0, 1.0, 5.0));
        assert_eq!(state.player.stamina, 0.5);
        assert_eq!(
            app.world().resource::<ScoreDisplay>().0,
            "Player: 2 | AI: 1"
        );
    }
}
