//! Utility functions for kickabout

use bevy::prelude::*;

/// True when two points are strictly closer than `radius`.
/// This is the only contact model: no collision geometry beyond a sphere test.
pub fn within_reach(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Sign of `value`, treating zero as positive
pub fn sign_or_positive(value: f32) -> f32 {
    if value == 0.0 { 1.0 } else { value.signum() }
}

/// Clamp an analog axis to [-1, 1], mapping non-finite values to 0
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Home-roster spawn position for member `index`
pub fn home_spawn(index: usize) -> Vec3 {
    roster_spawn(index, crate::constants::HOME_FIRST_ROW_Z)
}

/// Away-roster spawn position for member `index`
pub fn away_spawn(index: usize) -> Vec3 {
    roster_spawn(index, crate::constants::AWAY_FIRST_ROW_Z)
}

fn roster_spawn(index: usize, first_row_z: f32) -> Vec3 {
    use crate::constants::*;

    let column = (index % SPAWN_COLUMNS) as f32;
    let row = (index / SPAWN_COLUMNS) as f32;
    Vec3::new(
        SPAWN_LEFT_X + column * SPAWN_COLUMN_SPACING,
        PLAYER_HEIGHT_OFFSET,
        first_row_z + row * SPAWN_ROW_SPACING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_reach_is_strict() {
        let a = Vec3::ZERO;
        assert!(within_reach(a, Vec3::new(1.0, 0.0, 0.0), 1.5));
        assert!(!within_reach(a, Vec3::new(1.5, 0.0, 0.0), 1.5));
    }

    #[test]
    fn test_sign_or_positive() {
        assert_eq!(sign_or_positive(0.0), 1.0);
        assert_eq!(sign_or_positive(-0.0), 1.0);
        assert_eq!(sign_or_positive(-0.3), -1.0);
        assert_eq!(sign_or_positive(0.7), 1.0);
    }

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(3.0), 1.0);
        assert_eq!(clamp_axis(-2.0), -1.0);
        assert_eq!(clamp_axis(f32::NAN), 0.0);
        assert_eq!(clamp_axis(f32::INFINITY), 0.0);
        assert_eq!(clamp_axis(0.25), 0.25);
    }

    #[test]
    fn test_spawn_layout() {
        assert_eq!(home_spawn(0), Vec3::new(-20.0, 1.0, -15.0));
        assert_eq!(home_spawn(7), Vec3::new(-12.0, 1.0, 0.0));
        assert_eq!(away_spawn(0), Vec3::new(-20.0, 1.0, 15.0));
        assert_eq!(away_spawn(10), Vec3::new(12.0, 1.0, 30.0));
    }
}
