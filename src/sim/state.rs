//! Simulation entities and round state
//!
//! Positions are in field pixels with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::field::Brick;
use crate::consts::*;

/// Round lifecycle as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Built but never started
    Idle,
    /// Ticking
    Running,
    /// Every brick destroyed
    Cleared,
    /// Lives ran out with bricks left
    OutOfLives,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: String,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Ball::start_pos(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            color: BALL_COLOR.to_string(),
        }
    }
}

impl Ball {
    /// Field-center serve position
    pub fn start_pos() -> Vec2 {
        Vec2::new(BALL_START_X, BALL_START_Y)
    }

    /// Collision box: a radius-sided square at the ball position
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.radius, self.radius)
    }
}

/// The player's paddle. `x` is the paddle center, `y` its top edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PADDLE_START_X, PADDLE_Y),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color: PADDLE_COLOR.to_string(),
        }
    }
}

impl Paddle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos.x - self.width / 2.0,
            self.pos.y,
            self.width,
            self.height,
        )
    }

    /// Whether a paddle of `width` centered at `x` stays strictly inside the field
    pub fn fits_at(x: f32, width: f32, field_width: f32) -> bool {
        !(x + width / 2.0 >= field_width || x - width / 2.0 <= 0.0)
    }
}

/// Read-only view of the simulation for renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: EnginePhase,
    pub round: u64,
    pub ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
}
