//! Hoppy Bunny - An endless side-scrolling tap-to-hop arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, contacts, game state)
//! - `tuning`: Data-driven game balance
//! - `host`: Headless integration layer (rigid body, frame clock, contacts)

pub mod host;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`crate::Tuning`])
///
/// Time, scroll and scene-space values are `f64`; actor body values are `f32`.
pub mod consts {
    /// Fixed simulation timestep (60 Hz). Actual frame delta is ignored.
    pub const FIXED_DELTA: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible viewport half width (scene is 320 wide)
    pub const VIEWPORT_HALF_WIDTH: f64 = 160.0;
    /// Visible viewport height
    pub const VIEWPORT_HEIGHT: f64 = 568.0;

    /// Tap response
    pub const TAP_IMPULSE: f32 = 250.0;
    pub const TAP_ANGULAR_IMPULSE: f32 = 1.0;

    /// Vertical velocity cap
    pub const MAX_VERTICAL_VELOCITY: f32 = 400.0;
    /// Seconds without a tap before the nose-dive torque kicks in
    pub const NOSE_DIVE_DELAY: f64 = 0.1;
    /// Nose-dive torque, multiplied by the fixed delta
    pub const NOSE_DIVE_TORQUE: f32 = -20000.0;
    /// Rotation limits (degrees)
    pub const MIN_ROTATION_DEG: f32 = -80.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;
    /// Angular velocity limit (radians/s)
    pub const MAX_ANGULAR_VELOCITY: f32 = 7.0;
    /// Rotation the actor is forced to on game over (degrees)
    pub const CRASH_ROTATION_DEG: f32 = -90.0;

    /// Scroll speeds (pixels/s)
    pub const START_SCROLL_SPEED: f64 = 160.0;
    pub const SCROLL_ACCELERATION: f64 = 0.1; // per tick
    pub const CLOUD_SCROLL_SPEED: f64 = 200.0;

    /// Obstacle spawning
    pub const OBSTACLE_SPAWN_THRESHOLD: f64 = 1.5;
    pub const OBSTACLE_THRESHOLD_DECAY: f64 = 0.0001; // per tick
    pub const OBSTACLE_SPAWN_X: f64 = 352.0;
    pub const OBSTACLE_SPAWN_Y_MIN: f64 = 234.0;
    pub const OBSTACLE_SPAWN_Y_MAX: f64 = 382.0;
    pub const OBSTACLE_WIDTH: f64 = 52.0;
    pub const OBSTACLE_GAP: f64 = 180.0;

    /// Bonus item spawning
    pub const ITEM_SPAWN_THRESHOLD: f64 = 2.0;
    pub const ITEM_SPAWN_X: f64 = 400.0;
    pub const ITEM_SPAWN_Y_MIN: f64 = 150.0;
    pub const ITEM_SPAWN_Y_MAX: f64 = 450.0;
    pub const ITEM_WIDTH: f64 = 24.0;

    /// Recycled background tiles
    pub const GROUND_TILE_WIDTH: f64 = 340.0;
    pub const GROUND_TILE_COUNT: usize = 2;
    pub const GROUND_Y: f64 = 43.0;
    pub const CLOUD_TILE_WIDTH: f64 = 340.0;
    pub const CLOUD_TILE_COUNT: usize = 2;
    pub const CLOUD_Y: f64 = 480.0;

    /// Physics category bit identifying bonus items
    pub const ITEM_CATEGORY: u32 = 16;
}

/// Clamp an angle (radians) to a range given in degrees
#[inline]
pub fn clamp_degrees(angle: f32, min_deg: f32, max_deg: f32) -> f32 {
    angle.clamp(min_deg.to_radians(), max_deg.to_radians())
}
