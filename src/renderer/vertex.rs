//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// `rgba(...)` string for canvas fill styles
pub fn css_color(color: [f32; 4]) -> String {
    let [r, g, b, a] = color.map(|c| c.clamp(0.0, 1.0));
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.78, 0.96, 1.0];
    pub const GROUND: [f32; 4] = [0.42, 0.30, 0.18, 1.0];
    pub const GRASS: [f32; 4] = [0.30, 0.66, 0.24, 1.0];
    pub const CAR_BODY: [f32; 4] = [0.85, 0.15, 0.12, 1.0];
    pub const CAR_CABIN: [f32; 4] = [0.70, 0.85, 0.95, 1.0];
    pub const WHEEL: [f32; 4] = [0.08, 0.08, 0.08, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.82, 0.1, 1.0];
    pub const FUEL_CAN: [f32; 4] = [0.85, 0.1, 0.1, 1.0];
    pub const FUEL_CAP: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const FINISH_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
