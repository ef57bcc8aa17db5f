//! Headless App Builder
//!
//! Builds a headless Bevy app running the match tick. Used by the session
//! runner, the scenario tests and the parallel soak runs.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

use super::plugin::{MatchPlugin, SimulationTick};
use crate::input::{RandomInputHost, drive_random_input};
use crate::tuning::{self, PhysicsTweaks};

/// Pace of `run()`; tests and sessions call `update()` directly
const TICKS_PER_SECOND: f64 = 60.0;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    minimal_threads: bool,
    logging: bool,
    tuning: TuningSource,
    random_input_seed: Option<u64>,
}

/// Where the gameplay tuning comes from
#[derive(Debug, Clone)]
enum TuningSource {
    /// config/gameplay_tuning.json, defaults if missing
    Global,
    File(String),
    Fixed(PhysicsTweaks),
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    pub fn new() -> Self {
        Self {
            minimal_threads: false,
            logging: false,
            tuning: TuningSource::Global,
            random_input_seed: None,
        }
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Install Bevy's LogPlugin (only one app per process may do this)
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Load tuning from this JSON file instead of the global one
    pub fn with_tuning_file(mut self, path: &str) -> Self {
        self.tuning = TuningSource::File(path.to_string());
        self
    }

    /// Use exactly these tweaks, no file lookup
    pub fn with_tweaks(mut self, tweaks: PhysicsTweaks) -> Self {
        self.tuning = TuningSource::Fixed(tweaks);
        self
    }

    /// Drive the controlled player with a seeded `RandomInputHost`
    pub fn with_random_input(mut self, seed: u64) -> Self {
        self.random_input_seed = Some(seed);
        self
    }

    /// Build the app
    ///
    /// The returned app has:
    /// - MinimalPlugins with ScheduleRunnerPlugin
    /// - PhysicsTweaks resolved from the configured source
    /// - MatchPlugin: resources, spawned rosters and ball, the chained tick
    /// - the random input host ahead of the tick, if requested
    pub fn build(self) -> App {
        let mut app = App::new();

        let frame_time = Duration::from_secs_f64(1.0 / TICKS_PER_SECOND);
        if self.minimal_threads {
            // Critical for parallel execution to avoid hitting OS limits
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame_time))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame_time)));
        }
        if self.logging {
            app.add_plugins(LogPlugin::default());
        }

        // Tweaks go in first; MatchPlugin only fills in what is missing
        let tweaks = match self.tuning {
            TuningSource::Global => {
                let mut tweaks = PhysicsTweaks::default();
                if let Err(e) = tuning::apply_global_tuning(&mut tweaks) {
                    warn!("Using default tuning: {}", e);
                }
                tweaks
            }
            TuningSource::File(path) => {
                let mut tweaks = PhysicsTweaks::default();
                if let Err(e) = tuning::apply_tuning_file(&mut tweaks, &path) {
                    warn!("Using default tuning: {}", e);
                }
                tweaks
            }
            TuningSource::Fixed(tweaks) => tweaks,
        };
        app.insert_resource(tweaks);

        app.add_plugins(MatchPlugin);

        if let Some(seed) = self.random_input_seed {
            app.insert_resource(RandomInputHost::new(seed));
            app.add_systems(Update, drive_random_input.before(SimulationTick));
        }

        app
    }
}
