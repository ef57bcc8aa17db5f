//! Headless simulation - the match plugin, app builder and session runner
//!
//! One `App::update()` is one tick. The runner drives sessions without
//! rendering and collects score, skill counts and invariant checks.

pub mod app_builder;
pub mod config;
pub mod metrics;
pub mod parallel;
pub mod plugin;
pub mod runner;

pub use app_builder::HeadlessAppBuilder;
pub use config::{InputMode, SimConfig};
pub use metrics::{BatchSummary, SessionMetrics, SessionResult, TickSample};
pub use parallel::run_sessions_parallel;
pub use plugin::{MatchClock, MatchHandles, MatchPlugin, SimulationTick, advance_clock, spawn_match};
pub use runner::{run_session, run_simulation, sample_world};
