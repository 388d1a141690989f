//! Per-frame simulation step
//!
//! One call advances the game by one display frame. Within a playing frame
//! the order is fixed: physics, pickups, fuel/record bookkeeping, camera.

use super::collectibles::CollectibleKind;
use super::state::{GameEvent, GamePhase, GameState};
use super::vehicle::Pedal;
use crate::consts::FUEL_MAX;

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Gas pedal held
    pub gas: bool,
    /// Brake pedal held
    pub brake: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Start / retry / play again (one-shot)
    pub start: bool,
}

/// Advance the game state by one frame of `dt` seconds
///
/// `dt` is clamped to the tuning's `max_frame_dt`. Outside `Playing` only the
/// start and pause actions are honoured; nothing else moves.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Start / retry from the title or a finished run
    if input.start && (state.phase == GamePhase::Start || state.phase.is_terminal()) {
        state.reset_run();
        state.set_phase(GamePhase::Playing);
        log::info!("Run {} started (best {} m)", state.runs, state.best_record);
        events.push(GameEvent::RunStarted);
        // The start frame only sets the run up; driving begins next frame
        return events;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.set_phase(GamePhase::Paused);
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.set_phase(GamePhase::Playing);
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    // Don't tick unless driving
    if state.phase != GamePhase::Playing {
        return events;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.tuning.max_frame_dt)
    } else {
        0.0
    };
    state.frame += 1;

    let pedal = Pedal::from_flags(input.gas, input.brake);
    state.pedal = pedal;

    // --- PHYSICS ---
    let outcome = state
        .vehicle
        .step(&state.terrain, pedal, dt, &state.tuning);

    // --- PICKUPS ---
    for pickup in state.collectibles.collect_near(state.vehicle.x, &state.tuning) {
        match pickup.kind {
            CollectibleKind::Coin => {
                state.coins += 1;
                log::debug!("Coin {} collected at x={:.0}", pickup.id, pickup.x);
                events.push(GameEvent::CoinCollected { id: pickup.id });
            }
            CollectibleKind::Fuel => {
                state.fuel = (state.fuel + state.tuning.fuel_refill).min(FUEL_MAX);
                log::debug!("Fuel can {} collected, fuel now {:.1}", pickup.id, state.fuel);
                events.push(GameEvent::FuelCollected {
                    id: pickup.id,
                    fuel: state.fuel,
                });
            }
        }
    }

    // --- FUEL / RECORD ---
    state.fuel = (state.fuel - pedal.fuel_drain(dt, &state.tuning)).clamp(0.0, FUEL_MAX);

    let spool = state.tuning.spool_rate * dt;
    state.throttle = if pedal == Pedal::Gas {
        (state.throttle + spool).min(1.0)
    } else {
        (state.throttle - spool).max(0.0)
    };

    let distance = state.distance();
    if distance > state.best_record {
        if !state.new_record {
            log::info!("New record! {} m (previous {} m)", distance, state.best_record);
        }
        state.best_record = distance;
        state.new_record = true;
        events.push(GameEvent::NewRecord(distance));
    }

    // Crossing the line wins over an empty tank on the same frame
    if outcome.reached_finish {
        state.set_phase(GamePhase::Finished);
        log::info!("Finished! {} coins, {:.1}% fuel left", state.coins, state.fuel);
        events.push(GameEvent::Finished);
    } else if state.fuel <= 0.0 {
        state.fuel = 0.0;
        state.set_phase(GamePhase::GameOver);
        log::info!("Out of fuel at {} m", distance);
        events.push(GameEvent::OutOfFuel);
    }

    // --- CAMERA ---
    state.camera.follow(state.vehicle.x, &state.tuning);

    events
}
