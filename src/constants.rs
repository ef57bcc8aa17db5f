//! Tunable constants for kickabout
//!
//! All gameplay values are defined here for easy tweaking. Distances are in
//! field units, speeds in units per tick.

use bevy::prelude::*;

// =============================================================================
// FIELD
// =============================================================================

pub const GOAL_LINE: f32 = 40.0; // Ball beyond +/- this z scores
pub const TEAM_SIZE: usize = 11;

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const BALL_REST_HEIGHT: f32 = 0.5; // Ball center when resting on the grass
pub const BALL_FRICTION: f32 = 0.97; // Velocity retained per tick
pub const BALL_GRAVITY_STEP: f32 = 0.01; // Vertical velocity lost per airborne tick
pub const BALL_SPAWN: Vec3 = Vec3::new(0.0, BALL_REST_HEIGHT, 0.0);

// =============================================================================
// PLAYER MOVEMENT & STAMINA
// =============================================================================

pub const PLAYER_HEIGHT_OFFSET: f32 = 1.0; // Body center above the grass
pub const PLAYER_SPEED: f32 = 0.2;
pub const SPRINT_MULTIPLIER: f32 = 1.5;
pub const STAMINA_MAX: f32 = 1.0;
pub const STAMINA_MIN: f32 = 0.2; // Floor, keeps some mobility when exhausted
pub const STAMINA_DRAIN: f32 = 0.005; // Per sprinting tick, recovery is half of this

// =============================================================================
// SKILLS
// =============================================================================

pub const PROXIMITY_RADIUS: f32 = 1.5; // Ball interaction range
pub const KICK_CHARGE_RATE: f32 = 0.02; // Kick power gained per held tick
pub const TOUCH_NUDGE: f32 = 0.5;
pub const LOB_NUDGE: f32 = 0.7;
pub const FLICK_THRESHOLD: f32 = 0.6; // Kick power needed before a flick fires
pub const FLICK_LIFT: f32 = 0.3;
pub const FLICK_SPEED: f32 = 0.5;

// =============================================================================
// AI
// =============================================================================

pub const KEEPER_SPEED: f32 = 0.2;
pub const FIELD_SPEED: f32 = 0.15;
pub const AI_STEP_SCALE: f32 = 0.05; // Fraction of the ball offset closed per tick
pub const AI_STRIKE_FACTOR: f32 = 0.25;
pub const KEEPER_DEPTH: f32 = 20.0; // Goalkeeper z, pinned every tick

// =============================================================================
// CAMERA
// =============================================================================

pub const CAMERA_HEIGHT: f32 = 25.0; // Eye height above the player
pub const CAMERA_DISTANCE: f32 = 35.0; // Eye distance behind the player along +z
pub const CAMERA_LERP: f32 = 0.05;

// =============================================================================
// SPAWN LAYOUT
// =============================================================================

pub const SPAWN_COLUMNS: usize = 6;
pub const SPAWN_COLUMN_SPACING: f32 = 8.0;
pub const SPAWN_ROW_SPACING: f32 = 15.0;
pub const SPAWN_LEFT_X: f32 = -20.0;
pub const HOME_FIRST_ROW_Z: f32 = -15.0;
pub const AWAY_FIRST_ROW_Z: f32 = 15.0;
