//! Side-scrolling camera that trails the vehicle

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Horizontal view offset (world x at the left edge of the screen)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Where the camera wants to be for a vehicle at `vehicle_x`
    pub fn target_for(vehicle_x: f32, tuning: &Tuning) -> f32 {
        vehicle_x - tuning.viewport_width * tuning.camera_follow_fraction
    }

    /// Ease toward the target (exponential smoothing, never a hard snap)
    pub fn follow(&mut self, vehicle_x: f32, tuning: &Tuning) {
        let target = Self::target_for(vehicle_x, tuning);
        self.x += (target - self.x) * tuning.camera_smoothing;
        self.x = self.x.max(0.0);
    }

    /// Jump straight to the target (run reset)
    pub fn snap_to(&mut self, vehicle_x: f32, tuning: &Tuning) {
        self.x = Self::target_for(vehicle_x, tuning).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_moves_fraction_of_gap() {
        let tuning = Tuning::default();
        let mut camera = Camera { x: 1_000.0 };
        // target = 3000 - 1280 * 0.3 = 2616
        camera.follow(3_000.0, &tuning);
        assert!((camera.x - (1_000.0 + 1_616.0 * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_converges_to_target() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();
        for _ in 0..500 {
            camera.follow(5_000.0, &tuning);
        }
        let target = Camera::target_for(5_000.0, &tuning);
        assert!((camera.x - target).abs() < 0.01);
    }

    #[test]
    fn test_never_negative() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();
        camera.follow(100.0, &tuning);
        assert_eq!(camera.x, 0.0);
        camera.snap_to(50.0, &tuning);
        assert_eq!(camera.x, 0.0);
    }
}
