//! Game driver
//!
//! Wires the session, pointer input and timer queue together. The round
//! loop is a repeating tick task: each tick that wants to continue re-arms
//! the next one. Starting a round cancels whatever tick is still pending,
//! and every tick carries its round id so a stale one is dropped unrun.

use glam::Vec2;

use crate::input::{FieldRegion, PointerInput};
use crate::platform::{TimerId, TimerQueue};
use crate::session::{HudSnapshot, SessionController, SessionError, SessionPhase};
use crate::settings::{ConfigError, Settings};
use crate::sim::{RoundSnapshot, TickOutcome};

/// Deferred work
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    /// Advance the given round by one tick
    Tick { round: u64 },
    /// Debounced paddle move
    MovePaddle { x: f32 },
}

#[derive(Debug)]
pub struct Game {
    session: SessionController,
    input: PointerInput,
    timers: TimerQueue<Task>,
    pending_tick: Option<TimerId>,
    tick_delay_ms: u64,
    paddle_debounce_ms: u64,
}

impl Game {
    /// Rejects settings that could not drive a round (zero tick delay, no lives, empty grid)
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            session: SessionController::new(settings),
            input: PointerInput::default(),
            timers: TimerQueue::new(),
            pending_tick: None,
            tick_delay_ms: settings.tick_delay_ms,
            paddle_debounce_ms: settings.paddle_debounce_ms,
        })
    }

    /// Where the field sits on the host surface
    pub fn set_field_region(&mut self, region: FieldRegion) {
        self.input.set_region(region);
    }

    /// Start dialog submitted
    pub fn begin(&mut self, player: &str) -> Result<(), SessionError> {
        let round = self.session.begin(player)?;
        self.arm_tick(round);
        Ok(())
    }

    /// Finish dialog's "play again"
    pub fn play_again(&mut self) -> Result<(), SessionError> {
        let round = self.session.play_again()?;
        self.arm_tick(round);
        Ok(())
    }

    /// Pointer moved over the host surface
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if let Some(x) = self.input.paddle_target(pointer) {
            self.timers.schedule(self.paddle_debounce_ms, Task::MovePaddle { x });
        }
    }

    /// Run every task due within the next `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now() + ms;
        while let Some((id, task)) = self.timers.pop_due(until) {
            self.run(id, task);
        }
        self.timers.advance_to(until);
    }

    fn run(&mut self, id: TimerId, task: Task) {
        match task {
            Task::Tick { round } => {
                if self.pending_tick == Some(id) {
                    self.pending_tick = None;
                }
                if round != self.session.engine().round() {
                    log::debug!("Dropping stale tick for round {}", round);
                    return;
                }
                if self.session.tick() == TickOutcome::Continue {
                    self.arm_tick(round);
                }
            }
            Task::MovePaddle { x } => {
                self.session.set_paddle_target_x(x);
            }
        }
    }

    /// Replace any pending tick with one for `round`
    fn arm_tick(&mut self, round: u64) {
        if let Some(id) = self.pending_tick.take() {
            self.timers.cancel(id);
        }
        self.pending_tick = Some(self.timers.schedule(self.tick_delay_ms, Task::Tick { round }));
    }

    /// True while a tick is scheduled
    pub fn is_ticking(&self) -> bool {
        self.pending_tick.is_some()
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn hud(&self) -> HudSnapshot {
        self.session.hud()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.session.snapshot()
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut SessionController {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn game() -> Game {
        let settings = Settings {
            seed: Some(17),
            ..Default::default()
        };
        Game::new(&settings).unwrap()
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            tick_delay_ms: 0,
            ..Default::default()
        };
        assert!(matches!(Game::new(&settings), Err(ConfigError::Invalid(_))));

        let settings = Settings {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(matches!(Game::new(&settings), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_nothing_ticks_before_begin() {
        let mut game = game();
        game.advance(1_000);
        assert!(!game.is_ticking());
        assert_eq!(game.snapshot().ticks, 0);
        assert_eq!(game.now(), 1_000);
    }

    #[test]
    fn test_ticks_every_delay() {
        let mut game = game();
        game.begin("Ada").unwrap();
        assert!(game.is_ticking());

        game.advance(4);
        assert_eq!(game.snapshot().ticks, 0);
        game.advance(1);
        assert_eq!(game.snapshot().ticks, 1);
        game.advance(50);
        assert_eq!(game.snapshot().ticks, 11);
    }

    #[test]
    fn test_paddle_move_is_debounced() {
        let mut game = game();
        game.begin("Ada").unwrap();

        game.pointer_moved(Vec2::new(100.0, 400.0));
        game.advance(PADDLE_DEBOUNCE_MS - 1);
        assert_eq!(game.snapshot().paddle.pos.x, PADDLE_START_X);

        game.advance(1);
        assert_eq!(game.snapshot().paddle.pos.x, 100.0);
    }

    #[test]
    fn test_pointer_relative_to_field_region() {
        let mut game = game();
        game.set_field_region(FieldRegion::new(
            Vec2::new(40.0, 80.0),
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        ));
        game.begin("Ada").unwrap();

        game.pointer_moved(Vec2::new(240.0, 300.0));
        // Outside the region: ignored even though x alone would fit
        game.pointer_moved(Vec2::new(150.0, 20.0));
        game.advance(PADDLE_DEBOUNCE_MS);
        assert_eq!(game.snapshot().paddle.pos.x, 200.0);
    }

    #[test]
    fn test_out_of_bounds_pointer_ignored() {
        let mut game = game();
        game.begin("Ada").unwrap();
        game.pointer_moved(Vec2::new(10.0, 400.0));
        game.pointer_moved(Vec2::new(500.0, 400.0));
        game.advance(100);
        assert_eq!(game.snapshot().paddle.pos.x, PADDLE_START_X);
    }

    #[test]
    fn test_round_stops_ticking_when_lost() {
        let mut game = game();
        game.begin("Ada").unwrap();

        // Park the ball on the bottom edge every tick until the round ends
        for _ in 0..3 {
            let engine = game.session_mut().engine_mut();
            let ball = engine.ball_mut();
            ball.vel = Vec2::new(-1.0, 1.5);
            ball.pos = Vec2::new(101.0, 486.0);
            game.advance(TICK_DELAY_MS);
        }

        assert_eq!(game.phase(), SessionPhase::Finished { did_win: false });
        assert!(!game.is_ticking());
        let ticks = game.snapshot().ticks;
        game.advance(1_000);
        assert_eq!(game.snapshot().ticks, ticks);
    }

    #[test]
    fn test_play_again_does_not_double_tick() {
        let mut game = game();
        game.begin("Ada").unwrap();
        game.advance(20);

        // Finish the round from the outside, then restart
        for _ in 0..3 {
            let ball = game.session_mut().engine_mut().ball_mut();
            ball.vel = Vec2::new(-1.0, 1.5);
            ball.pos = Vec2::new(101.0, 486.0);
            game.advance(TICK_DELAY_MS);
        }
        game.play_again().unwrap();
        assert_eq!(game.hud().lives, 3);
        assert_eq!(game.hud().score, 0);

        game.advance(50);
        assert_eq!(game.snapshot().round, 2);
        assert_eq!(game.snapshot().ticks, 10);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let mut game = game();
        game.begin("Ada").unwrap();
        game.advance(10);

        // Restart the engine behind the driver's back; the armed tick now
        // belongs to an old round
        game.session_mut().engine_mut().start();
        game.advance(100);
        assert!(!game.is_ticking());
        assert_eq!(game.snapshot().ticks, 0);
    }
}
