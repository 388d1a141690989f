//! Frame loop orchestrator
//!
//! [`Game`] owns the simulation state, the best-record store and both clocks.
//! The host (browser `requestAnimationFrame`, or the headless runner) calls
//! [`Game::frame`] with the loop epoch it was handed when the loop was armed.
//! Stopping the loop bumps the epoch, so a callback that was already queued
//! finds itself stale and returns without touching anything.

use crate::persistence::RecordStore;
use crate::platform::{FrameClock, HeldInput, InputAction, KeyMap, PublishGate};
use crate::records::BestRecord;
use crate::sim::{DisplayStats, FrameSnapshot, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// HUD numbers published to the host UI
pub type HudState = DisplayStats;

/// What the host should do after a frame
#[derive(Debug, Clone, Default)]
pub struct FrameResult {
    /// Schedule another frame with the same epoch
    pub continue_loop: bool,
    /// Fresh HUD state, when the presentation clock allows a publish
    pub hud: Option<HudState>,
    /// Everything that happened this frame
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
pub struct Game<S: RecordStore> {
    state: GameState,
    record: BestRecord<S>,
    clock: FrameClock,
    hud_gate: PublishGate,
    input: HeldInput,
    keymap: KeyMap,
    /// Incremented every time the loop is armed or cancelled
    epoch: u64,
    running: bool,
}

impl<S: RecordStore> Game<S> {
    /// New session with a freshly generated track
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        Self::with_state(GameState::new(seed, tuning), store)
    }

    /// Wrap an existing state (flat tracks in tests, replays)
    pub fn with_state(mut state: GameState, store: S) -> Self {
        let record = BestRecord::load(store);
        state.best_record = record.best();
        let clock = FrameClock::new(state.tuning.max_frame_dt);
        let hud_gate = PublishGate::new(state.tuning.hud_publish_interval_ms);
        Self {
            state,
            record,
            clock,
            hud_gate,
            input: HeldInput::default(),
            keymap: KeyMap::default(),
            epoch: 0,
            running: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best_record(&self) -> u32 {
        self.record.best()
    }

    pub fn record_store(&self) -> &S {
        self.record.store()
    }

    /// Current HUD numbers (unthrottled)
    pub fn hud(&self) -> HudState {
        self.state.stats()
    }

    /// Read-only render contract for this frame
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        self.state.snapshot()
    }

    /// Epoch the host must pass to [`Game::frame`]
    pub fn loop_epoch(&self) -> u64 {
        self.epoch
    }

    /// A frame callback should currently be scheduled
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Arm the loop: fresh epoch, fresh clock
    fn arm_loop(&mut self) -> u64 {
        self.epoch += 1;
        self.running = true;
        self.clock.disarm();
        self.epoch
    }

    /// Cancel the loop: queued callbacks become stale
    fn stop_loop(&mut self) {
        if self.running {
            log::debug!("Frame loop stopped (epoch {})", self.epoch);
        }
        self.epoch += 1;
        self.running = false;
        self.clock.disarm();
    }

    /// Persist whatever the simulation reported
    fn record_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::NewRecord(distance) = event {
                self.record.submit(*distance);
            }
        }
    }

    /// Apply a one-shot action right away (the loop may not be running)
    fn apply_action(&mut self, input: TickInput) -> Vec<GameEvent> {
        let phase_before = self.state.phase;
        let events = tick(&mut self.state, &input, 0.0);
        self.record_events(&events);
        if self.state.phase != phase_before {
            self.record.flush();
        }
        self.hud_gate.force();
        events
    }

    /// Start / retry / play again. Returns the epoch to schedule, if a run started.
    pub fn start(&mut self) -> Option<u64> {
        let events = self.apply_action(TickInput {
            start: true,
            ..Default::default()
        });
        if events.contains(&GameEvent::RunStarted) {
            Some(self.arm_loop())
        } else {
            None
        }
    }

    /// Pause or resume. Returns the epoch to schedule when resuming.
    pub fn toggle_pause(&mut self) -> Option<u64> {
        let events = self.apply_action(TickInput {
            pause: true,
            ..Default::default()
        });
        if events.contains(&GameEvent::Paused) {
            self.input.clear();
            self.stop_loop();
            None
        } else if events.contains(&GameEvent::Resumed) {
            Some(self.arm_loop())
        } else {
            None
        }
    }

    /// Auto-pause (tab hidden, window blur). Held pedals are dropped.
    pub fn suspend(&mut self, reason: &str) {
        self.input.clear();
        if self.state.phase == GamePhase::Playing {
            log::info!("Auto-paused ({})", reason);
            self.toggle_pause();
        }
    }

    /// The player navigated away: stop the loop and park the run
    pub fn leave(&mut self) {
        self.suspend("navigate away");
        self.stop_loop();
        self.record.flush();
    }

    /// Throw the track away and start a new session on a new seed (record kept)
    pub fn new_track(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.stop_loop();
        self.input.clear();
        self.state = GameState::new(seed, tuning);
        self.state.best_record = self.record.best();
        log::info!("New track with seed {}", seed);
    }

    /// Route an action. Returns an epoch to schedule if the loop was (re)armed.
    pub fn press(&mut self, action: InputAction) -> Option<u64> {
        match action {
            InputAction::Gas | InputAction::Brake => {
                self.input.press(action);
                None
            }
            InputAction::Pause => self.toggle_pause(),
            InputAction::Start => self.start(),
        }
    }

    pub fn release(&mut self, action: InputAction) {
        self.input.release(action);
    }

    /// Whether `code` is bound to an action
    pub fn handles_key(&self, code: &str) -> bool {
        self.keymap.action_for(code).is_some()
    }

    /// Key-code flavour of [`Game::press`]; unknown keys are ignored
    pub fn press_key(&mut self, code: &str) -> Option<u64> {
        let action = self.keymap.action_for(code)?;
        self.press(action)
    }

    /// Key-code flavour of [`Game::release`]
    pub fn release_key(&mut self, code: &str) -> bool {
        match self.keymap.action_for(code) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    /// Run one display frame at host time `now_ms`
    pub fn frame(&mut self, epoch: u64, now_ms: f64) -> FrameResult {
        if !self.running || epoch != self.epoch {
            // Stale callback from a cancelled loop
            return FrameResult::default();
        }

        let dt = self.clock.advance(now_ms);
        let input = self.input.tick_input();
        let phase_before = self.state.phase;

        let events = tick(&mut self.state, &input, dt);

        self.record_events(&events);

        if self.state.phase != phase_before {
            self.record.flush();
            self.hud_gate.force();
        }
        if self.state.phase != GamePhase::Playing {
            self.stop_loop();
        }

        let hud = if self.hud_gate.should_publish(now_ms) {
            Some(self.state.stats())
        } else {
            None
        };

        FrameResult {
            continue_loop: self.running,
            hud,
            events,
        }
    }
}
