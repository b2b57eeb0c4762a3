//! Platform abstraction layer
//!
//! Handles the host-facing side of the game loop:
//! - Time (virtual millisecond clock)
//! - Deferred tasks (tick re-arming, debounced paddle moves)

pub mod timer;

pub use timer::{TimerId, TimerQueue};
