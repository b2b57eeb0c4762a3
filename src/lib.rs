//! Brick Breaker - a single-screen ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation (ball motion, AABB collisions, brick field, round state machine)
//! - `platform`: Virtual-clock timers for cooperative tick scheduling
//! - `input`: Pointer-to-paddle translation scoped to the play field
//! - `session`: Lives, score, player name, start/finish dialogs
//! - `game`: Driver wiring session, input and timers together
//! - `settings`: JSON-backed configuration

pub mod game;
pub mod input;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use game::{Game, Task};
pub use session::{SessionController, SessionError, SessionPhase};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 370.0;
    pub const FIELD_HEIGHT: f32 = 495.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = FIELD_WIDTH / 2.0 - BALL_RADIUS / 2.0;
    pub const BALL_START_Y: f32 = FIELD_HEIGHT / 2.0 - BALL_RADIUS / 2.0;
    pub const BALL_COLOR: &str = "#16817a";

    /// Paddle defaults - x is the paddle center, y its top edge
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_START_X: f32 = FIELD_WIDTH / 2.0;
    pub const PADDLE_Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT * 5.0;
    pub const PADDLE_COLOR: &str = "orange";

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 40.0;
    pub const BRICK_HEIGHT: f32 = 10.0;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 7;
    pub const BRICK_ORIGIN_X: f32 = 12.5;
    pub const BRICK_ORIGIN_Y: f32 = 40.0;
    pub const BRICK_SPACING_X: f32 = 50.0;
    pub const BRICK_SPACING_Y: f32 = 20.0;

    /// Delay between simulation ticks (milliseconds)
    pub const TICK_DELAY_MS: u64 = 5;
    /// Pointer debounce before a paddle move is applied (milliseconds)
    pub const PADDLE_DEBOUNCE_MS: u64 = 30;

    pub const STARTING_LIVES: u32 = 3;
}
