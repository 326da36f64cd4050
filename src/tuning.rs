//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so a run can be rebalanced from
//! a JSON file without recompiling. Missing fields fall back to [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal spawn rule for one spawned layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Seconds between spawns at the start of a run
    pub threshold: f64,
    /// Amount subtracted from the threshold every tick (0 = constant)
    pub threshold_decay: f64,
    /// World x where new instances appear
    pub x: f64,
    /// World y range new instances are drawn from (inclusive)
    pub y_min: f64,
    pub y_max: f64,
    /// Template width
    pub width: f64,
}

/// Fixed pool of recycled background tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRule {
    pub count: usize,
    pub width: f64,
    /// Layer-local y of every tile
    pub y: f64,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub fixed_delta: f64,
    pub viewport_half_width: f64,
    pub viewport_height: f64,

    // === Actor response ===
    pub tap_impulse: f32,
    pub tap_angular_impulse: f32,
    pub max_vertical_velocity: f32,
    pub nose_dive_delay: f64,
    pub nose_dive_torque: f32,
    pub min_rotation_deg: f32,
    pub max_rotation_deg: f32,
    pub max_angular_velocity: f32,
    pub crash_rotation_deg: f32,

    // === Scrolling ===
    pub start_scroll_speed: f64,
    pub scroll_acceleration: f64,
    pub cloud_scroll_speed: f64,
    pub ground: TileRule,
    pub clouds: TileRule,

    // === Spawning ===
    pub obstacles: SpawnRule,
    /// Vertical opening of an obstacle's scoring gate
    pub obstacle_gap: f64,
    pub items: SpawnRule,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_delta: FIXED_DELTA,
            viewport_half_width: VIEWPORT_HALF_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            tap_impulse: TAP_IMPULSE,
            tap_angular_impulse: TAP_ANGULAR_IMPULSE,
            max_vertical_velocity: MAX_VERTICAL_VELOCITY,
            nose_dive_delay: NOSE_DIVE_DELAY,
            nose_dive_torque: NOSE_DIVE_TORQUE,
            min_rotation_deg: MIN_ROTATION_DEG,
            max_rotation_deg: MAX_ROTATION_DEG,
            max_angular_velocity: MAX_ANGULAR_VELOCITY,
            crash_rotation_deg: CRASH_ROTATION_DEG,

            start_scroll_speed: START_SCROLL_SPEED,
            scroll_acceleration: SCROLL_ACCELERATION,
            cloud_scroll_speed: CLOUD_SCROLL_SPEED,
            ground: TileRule {
                count: GROUND_TILE_COUNT,
                width: GROUND_TILE_WIDTH,
                y: GROUND_Y,
            },
            clouds: TileRule {
                count: CLOUD_TILE_COUNT,
                width: CLOUD_TILE_WIDTH,
                y: CLOUD_Y,
            },

            obstacles: SpawnRule {
                threshold: OBSTACLE_SPAWN_THRESHOLD,
                threshold_decay: OBSTACLE_THRESHOLD_DECAY,
                x: OBSTACLE_SPAWN_X,
                y_min: OBSTACLE_SPAWN_Y_MIN,
                y_max: OBSTACLE_SPAWN_Y_MAX,
                width: OBSTACLE_WIDTH,
            },
            obstacle_gap: OBSTACLE_GAP,
            items: SpawnRule {
                threshold: ITEM_SPAWN_THRESHOLD,
                threshold_decay: 0.0,
                x: ITEM_SPAWN_X,
                y_min: ITEM_SPAWN_Y_MIN,
                y_max: ITEM_SPAWN_Y_MAX,
                width: ITEM_WIDTH,
            },
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NonPositive { field: &'static str, value: f64 },
    InvertedRange { field: &'static str, min: f64, max: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::InvertedRange { field, min, max } => {
                write!(f, "{field} range is inverted ({min} > {max})")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning (fixed delta {:.4}s)", tuning.fixed_delta);
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("fixed_delta", self.fixed_delta),
            ("viewport_half_width", self.viewport_half_width),
            ("ground.width", self.ground.width),
            ("clouds.width", self.clouds.width),
            ("obstacles.width", self.obstacles.width),
            ("items.width", self.items.width),
            ("max_angular_velocity", self.max_angular_velocity as f64),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let ranges = [
            ("obstacles.y", self.obstacles.y_min, self.obstacles.y_max),
            ("items.y", self.items.y_min, self.items.y_max),
            (
                "rotation",
                self.min_rotation_deg as f64,
                self.max_rotation_deg as f64,
            ),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "start_scroll_speed": 200.0 }"#).unwrap();
        assert_eq!(tuning.start_scroll_speed, 200.0);
        assert_eq!(tuning.obstacles.x, OBSTACLE_SPAWN_X);
        assert_eq!(tuning.items.threshold, ITEM_SPAWN_THRESHOLD);
    }

    #[test]
    fn test_rejects_inverted_spawn_range() {
        let mut tuning = Tuning::default();
        tuning.items.y_min = 500.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedRange { field: "items.y", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_delta() {
        let err = Tuning::from_json(r#"{ "fixed_delta": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { field: "fixed_delta", .. }));
    }

    #[test]
    fn test_rejects_negative_angular_limit() {
        let err = Tuning::from_json(r#"{ "max_angular_velocity": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NonPositive {
                field: "max_angular_velocity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
