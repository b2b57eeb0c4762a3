//! Simulation module
//!
//! All gameplay logic lives here. This module has no timers, rendering or
//! platform dependencies:
//! - One tick is one fixed step (no frame-rate compensation)
//! - Seeded RNG only
//! - Stable brick order (generation order)

pub mod collision;
pub mod field;
pub mod state;
pub mod tick;

pub use collision::{Aabb, intersects};
pub use field::{Brick, Field, FieldLayout, Rgb, generate};
pub use state::{Ball, EnginePhase, Paddle, RoundSnapshot};
pub use tick::{Engine, RoundListener, SERVE_VELOCITIES, TickOutcome, velocity_for_roll};
