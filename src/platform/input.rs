//! Keyboard / pedal input mapping
//!
//! Pedals are level-triggered (held while the key or button is down) and
//! sampled once per frame. Pause and start are edge-triggered; the
//! orchestrator applies them the moment they arrive, since the frame loop
//! isn't running on the title, pause or end screens.

use crate::sim::TickInput;

/// What a key or on-screen button means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Gas,
    Brake,
    Pause,
    Start,
}

/// Key code (`KeyboardEvent.code` style) to action table
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(&'static str, InputAction)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                ("ArrowRight", InputAction::Gas),
                ("ArrowUp", InputAction::Gas),
                ("KeyD", InputAction::Gas),
                ("ArrowLeft", InputAction::Brake),
                ("ArrowDown", InputAction::Brake),
                ("KeyA", InputAction::Brake),
                ("Escape", InputAction::Pause),
                ("KeyP", InputAction::Pause),
                ("Enter", InputAction::Start),
                ("Space", InputAction::Start),
            ],
        }
    }
}

impl KeyMap {
    pub fn action_for(&self, code: &str) -> Option<InputAction> {
        self.bindings
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, action)| *action)
    }
}

/// Pedals currently held down
#[derive(Debug, Clone, Default)]
pub struct HeldInput {
    gas: bool,
    brake: bool,
}

impl HeldInput {
    /// A pedal went down. Auto-repeat is harmless; actions aren't held.
    pub fn press(&mut self, action: InputAction) {
        match action {
            InputAction::Gas => self.gas = true,
            InputAction::Brake => self.brake = true,
            InputAction::Pause | InputAction::Start => {}
        }
    }

    /// A pedal came up
    pub fn release(&mut self, action: InputAction) {
        match action {
            InputAction::Gas => self.gas = false,
            InputAction::Brake => self.brake = false,
            InputAction::Pause | InputAction::Start => {}
        }
    }

    /// Drop everything (window blur, teardown)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pedal input for the next frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            gas: self.gas,
            brake: self.brake,
            ..Default::default()
        }
    }

    pub fn gas(&self) -> bool {
        self.gas
    }

    pub fn brake(&self) -> bool {
        self.brake
    }
}
