//! End-to-end driving scenarios through the public API

use hill_climb::persistence::{MemoryStore, RecordStore};
use hill_climb::platform::InputAction;
use hill_climb::records::BEST_DISTANCE_KEY;
use hill_climb::sim::{
    Collectible, CollectibleField, CollectibleKind, GameEvent, GamePhase, GameState, Pedal,
    Terrain, TickInput, Vehicle, tick,
};
use hill_climb::{Game, Tuning};

const DT: f32 = 0.05;

/// Flat track, run started, nothing to pick up
fn driving() -> GameState {
    let mut state = GameState::flat(7, Tuning::default());
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );
    assert_eq!(state.phase, GamePhase::Playing);
    state.collectibles = CollectibleField::default();
    state
}

fn gas() -> TickInput {
    TickInput {
        gas: true,
        ..Default::default()
    }
}

#[test]
fn one_second_of_gas_hits_the_speed_cap() {
    let tuning = Tuning::default();
    let terrain = Terrain::flat(tuning.track_length, tuning.terrain_step, tuning.slope_probe);
    let mut vehicle = Vehicle::new(100.0);

    let outcome = vehicle.step(&terrain, Pedal::Gas, 1.0, &tuning);

    // 0 + (650 - 1.8 * 0) * 1.0 = 650, capped at 600
    assert_eq!(vehicle.velocity_x, 600.0);
    assert_eq!(vehicle.x, 700.0);
    assert!(!outcome.reached_finish);
}

#[test]
fn long_frames_are_clamped_by_the_tick() {
    let mut state = driving();
    tick(&mut state, &gas(), 1.0);
    // Only one 0.05 s step is integrated
    assert!((state.vehicle.velocity_x - 650.0 * DT).abs() < 1e-3);
}

#[test]
fn empty_tank_ends_the_run_at_exactly_zero() {
    let mut state = driving();
    state.fuel = 5.0;

    let mut events = Vec::new();
    for _ in 0..200 {
        events = tick(&mut state, &gas(), DT);
        assert!(state.fuel >= 0.0);
        if state.phase != GamePhase::Playing {
            break;
        }
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.fuel, 0.0);
    assert!(events.contains(&GameEvent::OutOfFuel));
    assert_eq!(state.stats().fuel_pct, 0);
}

#[test]
fn reaching_the_end_finishes_and_clamps() {
    let mut state = driving();
    let end = state.tuning.track_length;
    state.vehicle.x = end - 1.0;
    state.vehicle.velocity_x = 600.0;

    let events = tick(&mut state, &gas(), DT);

    assert_eq!(state.phase, GamePhase::Finished);
    assert_eq!(state.vehicle.x, end);
    assert!(events.contains(&GameEvent::Finished));

    // Nothing moves once finished
    tick(&mut state, &gas(), DT);
    assert_eq!(state.vehicle.x, end);
}

#[test]
fn finish_beats_an_empty_tank() {
    let mut state = driving();
    state.vehicle.x = state.tuning.track_length - 1.0;
    state.vehicle.velocity_x = 600.0;
    state.fuel = 0.01;

    tick(&mut state, &gas(), DT);
    assert_eq!(state.phase, GamePhase::Finished);
}

#[test]
fn coin_is_collected_once_across_passes() {
    let mut state = driving();
    state.collectibles.coins = vec![Collectible::new(1, CollectibleKind::Coin, 1000.0)];
    state.vehicle.x = 900.0;

    let mut collected = 0;
    let count = |events: &[GameEvent]| {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count()
    };

    // Forward through the coin
    while state.vehicle.x < 1_100.0 {
        collected += count(&tick(&mut state, &gas(), DT));
    }
    // Back through it again
    let brake = TickInput {
        brake: true,
        ..Default::default()
    };
    while state.vehicle.x > 900.0 {
        collected += count(&tick(&mut state, &brake, DT));
    }

    assert_eq!(collected, 1);
    assert_eq!(state.coins, 1);
    assert!(state.collectibles.coins[0].collected());
}

#[test]
fn fuel_can_refills_but_never_past_full() {
    let mut state = driving();
    state.collectibles.fuel_cans = vec![
        Collectible::new(1, CollectibleKind::Fuel, 300.0),
        Collectible::new(2, CollectibleKind::Fuel, 600.0),
    ];
    state.fuel = 50.0;

    while state.vehicle.x < 320.0 {
        tick(&mut state, &gas(), DT);
    }
    // 50 + 30 minus a little drain on the way
    assert!(state.fuel > 75.0 && state.fuel <= 80.0);

    while state.vehicle.x < 620.0 {
        tick(&mut state, &gas(), DT);
    }
    assert!(state.fuel <= 100.0);
    assert!(state.fuel > 99.0);
}

#[test]
fn best_record_survives_a_new_game() {
    let mut game = Game::with_state(driving_title(), MemoryStore::new());
    let mut epoch = game.start().expect("run starts");
    game.press(InputAction::Gas);

    let mut now = 0.0;
    for _ in 0..180 {
        let result = game.frame(epoch, now);
        if !result.continue_loop {
            break;
        }
        epoch = game.loop_epoch();
        now += 1000.0 / 60.0;
    }
    let best = game.best_record();
    assert!(best > 0);

    // Same store, fresh game: the record is loaded back
    let store = game.record_store().clone();
    assert_eq!(store.get(BEST_DISTANCE_KEY), Some(best as i64));
    let reloaded = Game::with_state(driving_title(), store);
    assert_eq!(reloaded.best_record(), best);
    assert_eq!(reloaded.hud().best_record, best);
    assert!(!reloaded.hud().new_record);
}

#[test]
fn retry_keeps_the_track_and_reshuffles_pickups() {
    let mut state = GameState::new(11, Tuning::default());
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );
    let samples = state.terrain.samples().to_vec();
    let coins: Vec<f32> = state.collectibles.coins.iter().map(|c| c.x).collect();

    state.fuel = 0.01;
    tick(&mut state, &gas(), DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    let events = tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );
    assert!(events.contains(&GameEvent::RunStarted));
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.terrain.samples(), samples.as_slice());
    let reshuffled: Vec<f32> = state.collectibles.coins.iter().map(|c| c.x).collect();
    assert_ne!(coins, reshuffled);
}

fn driving_title() -> GameState {
    let mut state = GameState::flat(7, Tuning::default());
    state.collectibles = CollectibleField::default();
    state
}
