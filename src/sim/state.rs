//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in [`GameState`]; subsystems get
//! it (or pieces of it) by reference, never through captured globals.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collectibles::{Collectible, CollectibleField};
use super::terrain::{Terrain, TerrainSample};
use super::vehicle::{Pedal, Vehicle};
use crate::consts::FUEL_MAX;
use crate::tuning::Tuning;
use crate::units_to_meters;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    Start,
    /// Active driving
    Playing,
    /// Game is paused
    Paused,
    /// Ran out of fuel
    GameOver,
    /// Reached the end of the track
    Finished,
}

impl GamePhase {
    /// Run has ended (out of fuel or over the line)
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Finished)
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        match self {
            Start => matches!(next, Start | Playing),
            Playing => matches!(next, Playing | Paused | GameOver | Finished),
            Paused => matches!(next, Paused | Playing),
            GameOver | Finished => next == self || next == Playing,
        }
    }
}

/// Things that happened during a tick (for logging and persistence)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    CoinCollected { id: u32 },
    FuelCollected { id: u32, fuel: f32 },
    /// Best distance advanced to this many meters
    NewRecord(u32),
    OutOfFuel,
    Finished,
}

/// Numbers the HUD shows (published to the host UI as JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStats {
    pub distance: u32,
    /// km/h
    pub speed: u32,
    pub fuel_pct: u32,
    pub rpm_pct: u32,
    pub boost_pct: u32,
    pub coins: u32,
    pub best_record: u32,
    pub new_record: bool,
    pub phase: GamePhase,
    pub paused: bool,
}

/// Read-only view of one frame handed to the renderer
#[derive(Debug, Clone)]
pub struct FrameSnapshot<'a> {
    pub vehicle_x: f32,
    pub vehicle_y: f32,
    /// Body angle from the slope under the vehicle (radians)
    pub vehicle_angle: f32,
    pub camera_x: f32,
    /// Finish line x (the last terrain sample may lie past it)
    pub track_length: f32,
    pub terrain: &'a [TerrainSample],
    pub coins: &'a [Collectible],
    pub fuel_cans: &'a [Collectible],
    pub stats: DisplayStats,
}

/// Extra rpm gauge points while the gas is held
const RPM_GAS_BUMP: f32 = 15.0;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values for this session
    pub tuning: Tuning,
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Track surface (kept across retries)
    pub terrain: Terrain,
    pub vehicle: Vehicle,
    pub collectibles: CollectibleField,
    pub camera: Camera,
    /// Fuel in percent, always within [0, 100]
    pub fuel: f32,
    pub coins: u32,
    /// Best distance in meters (loaded from storage by the orchestrator)
    pub best_record: u32,
    /// Set the first time this run beats the best record, cleared on restart
    pub new_record: bool,
    /// Throttle spool 0..1 (boost gauge)
    pub throttle: f32,
    /// Pedal resolved on the last playing frame
    pub pedal: Pedal,
    pub phase: GamePhase,
    /// Frames simulated in the current run
    pub frame: u64,
    /// Runs started this session
    pub runs: u32,
}

impl GameState {
    /// Create a new session: draws the terrain seed from the RNG and waits on the title screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain_seed = rng.random::<f32>() * 1000.0;
        let terrain = Terrain::generate(
            terrain_seed,
            tuning.track_length,
            tuning.terrain_step,
            tuning.slope_probe,
            &tuning.terrain,
        );
        Self::with_terrain(seed, tuning, terrain, rng)
    }

    /// Create a session on a caller-supplied track
    pub fn with_terrain(seed: u64, tuning: Tuning, terrain: Terrain, mut rng: Pcg32) -> Self {
        let collectibles = CollectibleField::generate(&mut rng, tuning.track_length, &tuning);
        let vehicle = Vehicle::new(tuning.start_x);
        let mut camera = Camera::default();
        camera.snap_to(vehicle.x, &tuning);
        Self {
            seed,
            rng,
            terrain,
            vehicle,
            collectibles,
            camera,
            fuel: FUEL_MAX,
            coins: 0,
            best_record: 0,
            new_record: false,
            throttle: 0.0,
            pedal: Pedal::Idle,
            phase: GamePhase::Start,
            frame: 0,
            runs: 0,
            tuning,
        }
    }

    /// Flat-track session (tests and tutorial)
    pub fn flat(seed: u64, tuning: Tuning) -> Self {
        let terrain = Terrain::flat(tuning.track_length, tuning.terrain_step, tuning.slope_probe);
        Self::with_terrain(seed, tuning, terrain, Pcg32::seed_from_u64(seed))
    }

    /// Reset everything a new run needs. Terrain is kept.
    pub fn reset_run(&mut self) {
        self.vehicle = Vehicle::new(self.tuning.start_x);
        self.camera.snap_to(self.vehicle.x, &self.tuning);
        self.collectibles =
            CollectibleField::generate(&mut self.rng, self.tuning.track_length, &self.tuning);
        self.fuel = FUEL_MAX;
        self.coins = 0;
        self.new_record = false;
        self.throttle = 0.0;
        self.pedal = Pedal::Idle;
        self.frame = 0;
        self.runs += 1;
    }

    /// Move to `next`, logging the change. Illegal moves are ignored.
    pub(crate) fn set_phase(&mut self, next: GamePhase) -> bool {
        if !self.phase.can_transition_to(next) {
            log::warn!("Ignoring illegal phase change {:?} -> {:?}", self.phase, next);
            return false;
        }
        if self.phase != next {
            log::info!("Phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
        true
    }

    /// Whole meters travelled this run
    pub fn distance(&self) -> u32 {
        units_to_meters(self.vehicle.x, self.tuning.units_per_meter)
    }

    /// Borrow everything the renderer needs for this frame
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            vehicle_x: self.vehicle.x,
            vehicle_y: self.vehicle.y(&self.terrain),
            vehicle_angle: self.vehicle.angle(&self.terrain),
            camera_x: self.camera.x,
            track_length: self.tuning.track_length,
            terrain: self.terrain.samples(),
            coins: &self.collectibles.coins,
            fuel_cans: &self.collectibles.fuel_cans,
            stats: self.stats(),
        }
    }

    /// Derived HUD numbers
    pub fn stats(&self) -> DisplayStats {
        let speed_units = self.vehicle.velocity_x.abs();
        let speed_kmh = speed_units / self.tuning.units_per_meter * 3.6;
        let speed_frac = speed_units / self.tuning.max_velocity;
        let gas_bump = if self.pedal == Pedal::Gas && self.phase == GamePhase::Playing {
            RPM_GAS_BUMP
        } else {
            0.0
        };
        DisplayStats {
            distance: self.distance(),
            speed: speed_kmh.round() as u32,
            fuel_pct: self.fuel.clamp(0.0, FUEL_MAX).round() as u32,
            rpm_pct: (speed_frac * 100.0 + gas_bump).clamp(0.0, 100.0).round() as u32,
            boost_pct: (self.throttle * 100.0).clamp(0.0, 100.0).round() as u32,
            coins: self.coins,
            best_record: self.best_record,
            new_record: self.new_record,
            phase: self.phase,
            paused: self.phase == GamePhase::Paused,
        }
    }
}
