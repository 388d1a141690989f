//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Variable dt, clamped before integration
//! - Stable iteration order (ascending x per collectible kind)
//! - No rendering, storage or platform dependencies

pub mod camera;
pub mod collectibles;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod vehicle;

pub use camera::Camera;
pub use collectibles::{Collectible, CollectibleField, CollectibleKind, Pickup};
pub use state::{DisplayStats, FrameSnapshot, GameEvent, GamePhase, GameState};
pub use terrain::{
    Terrain, TerrainSample, generate_terrain, sample_height, samples_between, terrain_height,
};
pub use tick::{TickInput, tick};
pub use vehicle::{Pedal, StepOutcome, Vehicle};
