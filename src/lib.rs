//! Hill Climb - A side-view driving game over procedural hills
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, vehicle physics, pickups, game state)
//! - `renderer`: Pure tessellation of a frame snapshot into vertices
//! - `platform`: Frame clock, presentation throttle and input mapping
//! - `persistence`: Key/value storage backends
//! - `records`: Best-distance bookkeeping
//! - `tuning`: Data-driven game balance
//! - `game`: Frame loop orchestrator tying everything together

pub mod game;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{FrameResult, Game, HudState};
pub use records::BestRecord;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`]; anything gameplay
/// code reads at runtime goes through a `Tuning` instead.
pub mod consts {
    /// Track length in world units (5 units = 1 meter)
    pub const TRACK_LENGTH: f32 = 20_000.0;
    /// Horizontal distance between terrain samples
    pub const TERRAIN_STEP: f32 = 20.0;
    /// Probe distance for the central-difference slope estimate
    pub const SLOPE_PROBE: f32 = 5.0;
    /// World units per displayed meter
    pub const UNITS_PER_METER: f32 = 5.0;

    /// Vehicle forces
    pub const ACCEL_FORCE: f32 = 650.0;
    pub const BRAKE_FORCE: f32 = 500.0;
    /// Gravity along the slope (negative pulls downhill in signed x)
    pub const GRAVITY_MAGNITUDE: f32 = -380.0;
    pub const FRICTION_COEFF: f32 = 1.8;

    /// Velocity clamp (reverse is capped lower than forward)
    pub const MAX_VELOCITY: f32 = 600.0;
    pub const MIN_VELOCITY: f32 = -200.0;

    /// Vehicle start position
    pub const START_X: f32 = 100.0;

    /// Fuel (percent)
    pub const FUEL_MAX: f32 = 100.0;
    pub const FUEL_DRAIN_GAS: f32 = 1.8;
    pub const FUEL_DRAIN_BRAKE: f32 = 0.6;
    pub const FUEL_REFILL: f32 = 30.0;

    /// Pickup radii
    pub const COIN_RADIUS: f32 = 35.0;
    pub const FUEL_RADIUS: f32 = 40.0;

    /// Camera keeps the vehicle this far (fraction of viewport) from the left edge
    pub const CAMERA_FOLLOW_FRACTION: f32 = 0.3;
    /// Exponential smoothing factor per frame
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    pub const VIEWPORT_WIDTH: f32 = 1280.0;

    /// Largest dt fed to the integrator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Nominal dt for the first frame after the loop is (re)armed
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Minimum gap between HUD publications (ms, ~10 Hz)
    pub const HUD_PUBLISH_INTERVAL_MS: f64 = 100.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert a world x coordinate into whole meters travelled
#[inline]
pub fn units_to_meters(x: f32, units_per_meter: f32) -> u32 {
    (x.max(0.0) / units_per_meter).floor() as u32
}
