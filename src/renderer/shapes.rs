//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a rectangle of `size` centred on `center`, rotated by `angle`
pub fn rotated_rect(center: Vec2, size: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let half = size * 0.5;
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| center + rot.rotate(c));

    quad(corners, color)
}

/// Two triangles for a quad given in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Band hanging below a polyline: each segment becomes a quad reaching down to `floor_y`
///
/// Screen space has y growing downward, so `floor_y` is usually the bottom of
/// the viewport.
pub fn fill_below(points: &[Vec2], floor_y: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        vertices.extend(quad(
            [
                p1,
                p2,
                Vec2::new(p2.x, floor_y),
                Vec2::new(p1.x, floor_y),
            ],
            color,
        ));
    }
    vertices
}

/// Thick polyline (constant screen-space width)
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let half = width * 0.5;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        // Direction from p1 to p2
        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;
        vertices.extend(quad([p1 + perp, p2 + perp, p2 - perp, p1 - perp], color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        // Every rim vertex sits on the radius
        for v in verts.iter().skip(1).step_by(3) {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rotated_rect_quarter_turn() {
        let verts = rotated_rect(Vec2::ZERO, Vec2::new(4.0, 2.0), PI / 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        // A 4x2 rect turned 90 degrees spans 2 wide, 4 tall
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((max_x - 1.0).abs() < 1e-4);
        assert!((max_y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_fill_below_reaches_floor() {
        let points = [Vec2::new(0.0, 10.0), Vec2::new(10.0, 20.0), Vec2::new(20.0, 5.0)];
        let verts = fill_below(&points, 100.0, [1.0; 4]);
        assert_eq!(verts.len(), 12);
        assert!(verts.iter().any(|v| v.position[1] == 100.0));
    }

    #[test]
    fn test_degenerate_polylines_are_empty() {
        assert!(polyline(&[Vec2::ZERO], 2.0, [1.0; 4]).is_empty());
        assert!(fill_below(&[], 2.0, [1.0; 4]).is_empty());
    }
}
