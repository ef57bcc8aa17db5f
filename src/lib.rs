//! Kickabout - a one-screen football kickabout simulated with Bevy
//!
//! One human-controlled player and an eleven-member AI roster share a ball.
//! The crate holds the deterministic per-tick simulation plus the headless
//! runner and scenario tooling built on top of it. Rendering, touch controls
//! and sound are left to host apps, which read entity transforms, the
//! `CameraFollow` and `ScoreDisplay` resources, and events on the `EventBus`.

// Core modules
pub mod camera;
pub mod constants;
pub mod events;
pub mod helpers;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ai;
pub mod ball;
pub mod input;
pub mod player;
pub mod scoring;
pub mod shooting;

// Re-export commonly used types for convenience
pub use ai::{AiMember, AiRole, Benched};
pub use ball::Ball;
pub use camera::CameraFollow;
pub use constants::*;
pub use events::{BusEvent, EventBus, GameEvent, Side};
pub use helpers::*;
pub use input::{ButtonState, InputSnapshot, InputState, RandomInputHost};
pub use player::{ControlledPlayer, Player, RosterIndex, Stamina, Team, Velocity};
pub use scoring::{Score, ScoreDisplay};
pub use shooting::ChargeState;
pub use simulation::{HeadlessAppBuilder, MatchClock, MatchHandles, MatchPlugin, SimulationTick};
pub use tuning::PhysicsTweaks;
