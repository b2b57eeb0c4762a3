//! Round simulation tick
//!
//! The engine owns the ball, paddle and brick field for a round and
//! advances them one fixed step at a time. It does not own lives or score;
//! it reports what happened to a [`RoundListener`] synchronously and in
//! order, and reads the listener's lives to decide whether the round goes on.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::field::{Brick, Field, FieldLayout};
use super::state::{Ball, EnginePhase, Paddle, RoundSnapshot};
use crate::consts::*;

/// Receiver for engine events
pub trait RoundListener {
    /// Lives left, read at the start and end of every tick
    fn current_lives(&self) -> u32;
    fn on_brick_destroyed(&mut self);
    fn on_ball_lost(&mut self);
    fn on_round_finished(&mut self, did_win: bool);
}

/// What the scheduler should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Round still live - schedule the next tick
    Continue,
    /// Round ended during this tick (`on_round_finished` was fired)
    Finished,
    /// Engine is not running; nothing happened
    Stopped,
}

/// Serve velocities, one per restart bin
pub const SERVE_VELOCITIES: [Vec2; 3] = [
    Vec2::new(-1.0, 1.5),
    Vec2::new(2.0, 1.75),
    Vec2::new(1.25, 1.0),
];

/// Map a uniform roll in [0, 1) to a serve velocity
pub fn velocity_for_roll(roll: f32) -> Vec2 {
    if roll < 0.33 {
        SERVE_VELOCITIES[0]
    } else if roll < 0.66 {
        SERVE_VELOCITIES[1]
    } else {
        SERVE_VELOCITIES[2]
    }
}

/// The simulation engine
#[derive(Debug, Clone)]
pub struct Engine {
    phase: EnginePhase,
    ball: Ball,
    paddle: Paddle,
    field: Field,
    field_size: Vec2,
    rng: Pcg32,
    /// Incremented on every `start`; lets schedulers spot stale ticks
    round: u64,
    ticks: u64,
}

impl Engine {
    pub fn new(layout: FieldLayout, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = Field::new(layout, &mut rng);
        Self {
            phase: EnginePhase::Idle,
            ball: Ball::default(),
            paddle: Paddle::default(),
            field,
            field_size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            rng,
            round: 0,
            ticks: 0,
        }
    }

    /// Begin a round. Safe to call while running: the previous round is
    /// superseded and its round id goes stale.
    ///
    /// The field is regenerated only if it is not a full fresh grid, so a
    /// new round always starts with every brick in place.
    pub fn start(&mut self) -> u64 {
        self.round += 1;
        self.ticks = 0;
        self.restart_ball();
        if !self.field.is_full() {
            self.field.regenerate(&mut self.rng);
        }
        self.phase = EnginePhase::Running;
        log::info!(
            "Round {} started: {} bricks, serve velocity ({}, {})",
            self.round,
            self.field.len(),
            self.ball.vel.x,
            self.ball.vel.y
        );
        self.round
    }

    /// Put the ball back at the field center with a freshly rolled velocity
    pub fn restart_ball(&mut self) {
        let roll: f32 = self.rng.random();
        self.ball.vel = velocity_for_roll(roll);
        self.ball.pos = Ball::start_pos();
    }

    /// Move the paddle center to `x`. Positions that would push the paddle
    /// onto or past a field edge are ignored.
    pub fn set_paddle_target_x(&mut self, x: f32) -> bool {
        if !Paddle::fits_at(x, self.paddle.width, self.field_size.x) {
            log::debug!("Paddle target {} rejected (out of field)", x);
            return false;
        }
        self.paddle.pos.x = x;
        true
    }

    /// Advance the round by one step
    pub fn tick(&mut self, listener: &mut impl RoundListener) -> TickOutcome {
        if self.phase != EnginePhase::Running {
            return TickOutcome::Stopped;
        }

        // Nothing left to play for: report the result without moving
        if listener.current_lives() == 0 || self.field.is_empty() {
            return self.finish(listener);
        }

        self.ticks += 1;
        self.ball.pos += self.ball.vel;

        if self.bounce_off_edges() {
            listener.on_ball_lost();
            self.restart_ball();
            log::debug!(
                "Ball lost on tick {}, {} lives left",
                self.ticks,
                listener.current_lives()
            );
        }

        if let Some(brick) = self.hit_brick() {
            self.ball.vel.y = -self.ball.vel.y;
            log::debug!(
                "Brick at ({}, {}) destroyed, {} left",
                brick.pos.x,
                brick.pos.y,
                self.field.len()
            );
            listener.on_brick_destroyed();
        }

        // Inverts independently of a brick hit in the same tick, so both
        // together cancel out
        if self.paddle.bounds().intersects(&self.ball.bounds()) {
            self.ball.vel.y = -self.ball.vel.y;
        }

        if listener.current_lives() > 0 && !self.field.is_empty() {
            TickOutcome::Continue
        } else {
            self.finish(listener)
        }
    }

    /// Edge response for the moved ball. Only one edge is handled per tick,
    /// checked right, left, bottom, top. Returns true if the ball was lost.
    fn bounce_off_edges(&mut self) -> bool {
        let ball = &mut self.ball;
        if ball.pos.x + ball.radius >= self.field_size.x || ball.pos.x <= 0.0 {
            ball.vel.x = -ball.vel.x;
        } else if ball.pos.y + ball.radius >= self.field_size.y {
            return true;
        } else if ball.pos.y <= 0.0 {
            ball.vel.y = -ball.vel.y;
        }
        false
    }

    /// Remove and return the first brick overlapping the ball
    fn hit_brick(&mut self) -> Option<Brick> {
        let index = self.field.first_hit(&self.ball.bounds())?;
        Some(self.field.remove(index))
    }

    fn finish(&mut self, listener: &mut impl RoundListener) -> TickOutcome {
        let did_win = self.field.is_empty();
        self.phase = if did_win {
            EnginePhase::Cleared
        } else {
            EnginePhase::OutOfLives
        };
        log::info!(
            "Round {} finished after {} ticks: {}",
            self.round,
            self.ticks,
            if did_win { "cleared" } else { "out of lives" }
        );
        listener.on_round_finished(did_win);
        TickOutcome::Finished
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn bricks(&self) -> &[Brick] {
        self.field.bricks()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            round: self.round,
            ticks: self.ticks,
            ball: self.ball.clone(),
            paddle: self.paddle.clone(),
            bricks: self.field.bricks().to_vec(),
        }
    }

    #[cfg(test)]
    pub(crate) fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }
}
