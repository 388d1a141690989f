//! Platform abstraction layer
//!
//! Turns what the host hands us into what the simulation wants:
//! - Wall-clock timestamps into clamped frame dt
//! - Key/button events into per-frame tick input
//! - A presentation clock that throttles HUD publication

pub mod input;
pub mod time;

pub use input::{HeldInput, InputAction, KeyMap};
pub use time::{FrameClock, PublishGate};
