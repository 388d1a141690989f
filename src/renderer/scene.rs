//! Frame tessellation
//!
//! [`build_frame`] turns a [`FrameSnapshot`] into one triangle list in screen
//! space. It reads the snapshot and nothing else, so the same snapshot always
//! produces the same mesh.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Collectible, FrameSnapshot, sample_height, samples_between};

/// Vehicle body dimensions (world units)
const CAR_LENGTH: f32 = 70.0;
const CAR_HEIGHT: f32 = 22.0;
const CABIN_LENGTH: f32 = 32.0;
const CABIN_HEIGHT: f32 = 16.0;
const WHEEL_RADIUS: f32 = 11.0;
const WHEELBASE: f32 = 46.0;

const COIN_RADIUS: f32 = 10.0;
const COIN_HOVER: f32 = 28.0;
const FUEL_SIZE: Vec2 = Vec2::new(18.0, 24.0);
const FUEL_HOVER: f32 = 24.0;

const GRASS_WIDTH: f32 = 6.0;
const FINISH_POST: Vec2 = Vec2::new(6.0, 120.0);

/// Screen area the frame is drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Screen y of world height 0
    pub horizon: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            horizon: height * 0.6,
        }
    }

    /// World point to screen point (screen y grows downward)
    #[inline]
    pub fn to_screen(&self, world: Vec2, camera_x: f32) -> Vec2 {
        Vec2::new(world.x - camera_x, self.horizon - world.y)
    }
}

/// Triangle list for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameMesh {
    pub vertices: Vec<Vertex>,
}

impl FrameMesh {
    /// Raw bytes for a GPU vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> {
        self.vertices.chunks_exact(3)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

fn visible(item: &Collectible, min_x: f32, max_x: f32, margin: f32) -> bool {
    !item.collected() && item.x >= min_x - margin && item.x <= max_x + margin
}

/// Tessellate the world as seen through the camera
pub fn build_frame(snapshot: &FrameSnapshot<'_>, viewport: &Viewport) -> FrameMesh {
    let mut vertices = Vec::new();
    let cam = snapshot.camera_x;
    let (min_x, max_x) = (cam, cam + viewport.width);

    // Sky
    vertices.extend(shapes::quad(
        [
            Vec2::ZERO,
            Vec2::new(viewport.width, 0.0),
            Vec2::new(viewport.width, viewport.height),
            Vec2::new(0.0, viewport.height),
        ],
        colors::SKY,
    ));

    // Ground and grass edge
    let surface: Vec<Vec2> = samples_between(snapshot.terrain, min_x, max_x)
        .iter()
        .map(|s| viewport.to_screen(Vec2::new(s.x, s.y), cam))
        .collect();
    vertices.extend(shapes::fill_below(&surface, viewport.height, colors::GROUND));
    vertices.extend(shapes::polyline(&surface, GRASS_WIDTH, colors::GRASS));

    // Finish line post
    let finish_x = snapshot.track_length;
    if finish_x >= min_x && finish_x <= max_x {
        let ground = sample_height(snapshot.terrain, finish_x);
        let base = viewport.to_screen(Vec2::new(finish_x, ground), cam);
        vertices.extend(shapes::rotated_rect(
            base - Vec2::new(0.0, FINISH_POST.y * 0.5),
            FINISH_POST,
            0.0,
            colors::FINISH_LINE,
        ));
    }

    // Collectibles hover above the surface
    for coin in snapshot.coins.iter().filter(|c| visible(c, min_x, max_x, COIN_RADIUS)) {
        let ground = sample_height(snapshot.terrain, coin.x);
        let center = viewport.to_screen(Vec2::new(coin.x, ground + COIN_HOVER), cam);
        vertices.extend(shapes::circle(center, COIN_RADIUS, colors::COIN, 16));
    }
    for can in snapshot.fuel_cans.iter().filter(|c| visible(c, min_x, max_x, FUEL_SIZE.x)) {
        let ground = sample_height(snapshot.terrain, can.x);
        let center = viewport.to_screen(Vec2::new(can.x, ground + FUEL_HOVER), cam);
        vertices.extend(shapes::rotated_rect(center, FUEL_SIZE, 0.0, colors::FUEL_CAN));
        vertices.extend(shapes::rotated_rect(
            center - Vec2::new(0.0, FUEL_SIZE.y * 0.5 + 3.0),
            Vec2::new(8.0, 6.0),
            0.0,
            colors::FUEL_CAP,
        ));
    }

    // Vehicle: body follows the slope; screen y is flipped so the angle is too
    let contact = viewport.to_screen(Vec2::new(snapshot.vehicle_x, snapshot.vehicle_y), cam);
    let screen_angle = -snapshot.vehicle_angle;
    let along = Vec2::from_angle(screen_angle);
    let up = Vec2::new(along.y, -along.x);

    let body_center = contact + up * (WHEEL_RADIUS + CAR_HEIGHT * 0.5);
    vertices.extend(shapes::rotated_rect(
        body_center,
        Vec2::new(CAR_LENGTH, CAR_HEIGHT),
        screen_angle,
        colors::CAR_BODY,
    ));
    let cabin_center = body_center + up * (CAR_HEIGHT * 0.5 + CABIN_HEIGHT * 0.5) - along * 6.0;
    vertices.extend(shapes::rotated_rect(
        cabin_center,
        Vec2::new(CABIN_LENGTH, CABIN_HEIGHT),
        screen_angle,
        colors::CAR_CABIN,
    ));
    for side in [-1.0, 1.0] {
        let wheel = contact + along * (side * WHEELBASE * 0.5) + up * WHEEL_RADIUS;
        vertices.extend(shapes::circle(wheel, WHEEL_RADIUS, colors::WHEEL, 12));
    }

    FrameMesh { vertices }
}
