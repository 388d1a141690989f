//! Vehicle longitudinal physics
//!
//! The vehicle is a point sliding along the terrain surface. Only `x` and
//! `velocity_x` are stored; height and body angle are read back from the
//! terrain each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::tuning::Tuning;

/// Normalized pedal state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pedal {
    #[default]
    Idle,
    Gas,
    Brake,
}

impl Pedal {
    /// Resolve raw pedal flags. Holding both cancels out to `Idle`.
    pub fn from_flags(gas: bool, brake: bool) -> Self {
        match (gas, brake) {
            (true, false) => Pedal::Gas,
            (false, true) => Pedal::Brake,
            _ => Pedal::Idle,
        }
    }

    /// Engine force along the track for this pedal
    pub fn engine_force(self, tuning: &Tuning) -> f32 {
        match self {
            Pedal::Gas => tuning.accel_force,
            Pedal::Brake => -tuning.brake_force,
            Pedal::Idle => 0.0,
        }
    }

    /// Fuel consumed (percentage points) over `dt` seconds
    pub fn fuel_drain(self, dt: f32, tuning: &Tuning) -> f32 {
        let rate = match self {
            Pedal::Gas => tuning.fuel_drain_gas,
            Pedal::Brake => tuning.fuel_drain_brake,
            Pedal::Idle => 0.0,
        };
        rate * dt.max(0.0)
    }
}

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The vehicle hit the end of the track this step
    pub reached_finish: bool,
}

/// The player's vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub x: f32,
    pub velocity_x: f32,
}

impl Vehicle {
    pub fn new(x: f32) -> Self {
        Self { x, velocity_x: 0.0 }
    }

    /// Advance one frame with semi-implicit Euler
    ///
    /// Velocity is integrated from the forces first, then position from the
    /// new velocity. `dt` is used as given; callers clamp it.
    pub fn step(&mut self, terrain: &Terrain, pedal: Pedal, dt: f32, tuning: &Tuning) -> StepOutcome {
        if !(dt > 0.0) {
            return StepOutcome::default();
        }

        let angle = terrain.angle_at(self.x);
        let gravity_force = angle.sin() * tuning.gravity_magnitude;
        let engine_force = pedal.engine_force(tuning);
        let friction_force = -self.velocity_x * tuning.friction_coeff;

        self.velocity_x += (engine_force + gravity_force + friction_force) * dt;
        self.velocity_x = self
            .velocity_x
            .clamp(tuning.min_velocity, tuning.max_velocity);

        self.x += self.velocity_x * dt;
        let mut outcome = StepOutcome::default();
        if self.x <= 0.0 {
            self.x = 0.0;
            // Rolled back against the start wall
            self.velocity_x = self.velocity_x.max(0.0);
        } else if self.x >= tuning.track_length {
            self.x = tuning.track_length;
            outcome.reached_finish = true;
        }
        outcome
    }

    /// Body angle (radians) from the terrain slope under the vehicle
    pub fn angle(&self, terrain: &Terrain) -> f32 {
        terrain.angle_at(self.x)
    }

    /// Height of the vehicle's contact point
    pub fn y(&self, terrain: &Terrain) -> f32 {
        terrain.height_at(self.x)
    }

    /// Contact point in world space
    pub fn position(&self, terrain: &Terrain) -> Vec2 {
        terrain.surface_point(self.x)
    }
}
