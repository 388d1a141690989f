//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a run can be replayed with a
//! different balance file. Defaults come from [`crate::consts`].

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Shape of the terrain height function (three sinusoids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainShape {
    pub amplitudes: [f32; 3],
    pub frequencies: [f32; 3],
}

impl Default for TerrainShape {
    fn default() -> Self {
        // Amplitudes sum to 110, which bounds the vertical excursion
        Self {
            amplitudes: [60.0, 35.0, 15.0],
            frequencies: [0.003, 0.011, 0.027],
        }
    }
}

impl TerrainShape {
    /// Largest possible |y| for this shape
    pub fn max_excursion(&self) -> f32 {
        self.amplitudes.iter().map(|a| a.abs()).sum()
    }
}

/// Half-open spacing interval `[min, max)` used when scattering collectibles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// First entity is placed at this x
    pub start: f32,
    pub min: f32,
    pub max: f32,
}

/// Complete gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    pub track_length: f32,
    pub terrain_step: f32,
    pub terrain: TerrainShape,
    pub slope_probe: f32,
    pub units_per_meter: f32,

    // === Vehicle ===
    pub start_x: f32,
    pub accel_force: f32,
    pub brake_force: f32,
    pub gravity_magnitude: f32,
    pub friction_coeff: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    /// Throttle spool rate for the boost gauge (fraction per second)
    pub spool_rate: f32,

    // === Fuel ===
    pub fuel_drain_gas: f32,
    pub fuel_drain_brake: f32,
    pub fuel_refill: f32,

    // === Collectibles ===
    pub coin_radius: f32,
    pub fuel_radius: f32,
    pub coin_spacing: Spacing,
    pub fuel_spacing: Spacing,

    // === Camera ===
    pub viewport_width: f32,
    pub camera_follow_fraction: f32,
    pub camera_smoothing: f32,

    // === Frame timing ===
    pub max_frame_dt: f32,
    pub hud_publish_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            track_length: TRACK_LENGTH,
            terrain_step: TERRAIN_STEP,
            terrain: TerrainShape::default(),
            slope_probe: SLOPE_PROBE,
            units_per_meter: UNITS_PER_METER,

            start_x: START_X,
            accel_force: ACCEL_FORCE,
            brake_force: BRAKE_FORCE,
            gravity_magnitude: GRAVITY_MAGNITUDE,
            friction_coeff: FRICTION_COEFF,
            min_velocity: MIN_VELOCITY,
            max_velocity: MAX_VELOCITY,
            spool_rate: 2.5,

            fuel_drain_gas: FUEL_DRAIN_GAS,
            fuel_drain_brake: FUEL_DRAIN_BRAKE,
            fuel_refill: FUEL_REFILL,

            coin_radius: COIN_RADIUS,
            fuel_radius: FUEL_RADIUS,
            coin_spacing: Spacing {
                start: 300.0,
                min: 150.0,
                max: 400.0,
            },
            fuel_spacing: Spacing {
                start: 800.0,
                min: 1500.0,
                max: 2500.0,
            },

            viewport_width: VIEWPORT_WIDTH,
            camera_follow_fraction: CAMERA_FOLLOW_FRACTION,
            camera_smoothing: CAMERA_SMOOTHING,

            max_frame_dt: MAX_FRAME_DT,
            hud_publish_interval_ms: HUD_PUBLISH_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse a tuning file and validate it
    pub fn from_json(raw: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(raw).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject balance values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.track_length > 0.0) || !(self.terrain_step > 0.0) {
            return Err(TuningError::Validation(
                "track_length and terrain_step must be > 0".to_string(),
            ));
        }
        if !(self.slope_probe > 0.0) || !(self.units_per_meter > 0.0) {
            return Err(TuningError::Validation(
                "slope_probe and units_per_meter must be > 0".to_string(),
            ));
        }
        if self.start_x < 0.0 || self.start_x >= self.track_length {
            return Err(TuningError::Validation(format!(
                "start_x {} must lie inside [0, {})",
                self.start_x, self.track_length
            )));
        }
        if self.min_velocity > 0.0 || self.max_velocity <= 0.0 {
            return Err(TuningError::Validation(
                "velocity range must straddle zero".to_string(),
            ));
        }
        if self.min_velocity.abs() >= self.max_velocity {
            return Err(TuningError::Validation(
                "reverse speed cap must be lower than forward top speed".to_string(),
            ));
        }
        if self.gravity_magnitude > 0.0 {
            return Err(TuningError::Validation(
                "gravity_magnitude must be <= 0".to_string(),
            ));
        }
        if self.accel_force < 0.0 || self.brake_force < 0.0 || self.friction_coeff < 0.0 {
            return Err(TuningError::Validation(
                "forces and friction must be >= 0".to_string(),
            ));
        }
        if self.fuel_drain_gas < 0.0 || self.fuel_drain_brake < 0.0 || self.fuel_refill < 0.0 {
            return Err(TuningError::Validation(
                "fuel rates must be >= 0".to_string(),
            ));
        }
        if !(self.coin_radius > 0.0) || !(self.fuel_radius > 0.0) {
            return Err(TuningError::Validation(
                "pickup radii must be > 0".to_string(),
            ));
        }
        for (label, spacing) in [
            ("coin_spacing", &self.coin_spacing),
            ("fuel_spacing", &self.fuel_spacing),
        ] {
            if !(spacing.min > 0.0) || spacing.min >= spacing.max {
                return Err(TuningError::Validation(format!(
                    "{label} needs 0 < min < max (got {}..{})",
                    spacing.min, spacing.max
                )));
            }
            // The smallest step must still move x anywhere along the track
            let reach = spacing.start.abs().max(self.track_length);
            if !(reach + spacing.min > reach) {
                return Err(TuningError::Validation(format!(
                    "{label} min {} is too small to advance along a {} unit track",
                    spacing.min, self.track_length
                )));
            }
        }
        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return Err(TuningError::Validation(
                "camera_smoothing must be in (0, 1]".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.camera_follow_fraction) {
            return Err(TuningError::Validation(
                "camera_follow_fraction must be in [0, 1)".to_string(),
            ));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(TuningError::Validation(
                "max_frame_dt must be > 0".to_string(),
            ));
        }
        if !(self.hud_publish_interval_ms > 0.0 && self.hud_publish_interval_ms.is_finite()) {
            return Err(TuningError::Validation(
                "hud_publish_interval_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Validation(String),
}

impl Display for TuningError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(source) => write!(f, "failed to parse tuning: {source}"),
            Self::Validation(message) => write!(f, "invalid tuning: {message}"),
        }
    }
}

impl Error for TuningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(source) => Some(source),
            Self::Validation(_) => None,
        }
    }
}
