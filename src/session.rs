//! Session: player, lives, score and the dialogs around a round
//!
//! The controller owns the engine's lifecycle. Session bookkeeping lives in
//! [`SessionState`], which is what the engine reports its events to.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Engine, RoundListener, RoundSnapshot, TickOutcome};

/// Where the player is in the session flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start dialog is up, waiting for a name
    AwaitingPlayer,
    /// A round is being played
    Playing,
    /// Finish dialog is up, offering "play again"
    Finished { did_win: bool },
}

/// Finish dialog headline
pub fn finish_message(did_win: bool) -> &'static str {
    if did_win {
        "Congrats, you won!"
    } else {
        "Sorry, you lost"
    }
}

/// Rejected dialog signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Start dialog submitted with a blank name
    EmptyPlayerName,
    /// Start dialog submitted after the session already began
    AlreadyStarted,
    /// "Play again" before anyone started playing
    NoPlayer,
    /// "Play again" while a round is still running
    RoundInProgress,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::EmptyPlayerName => write!(f, "player name is required"),
            SessionError::AlreadyStarted => write!(f, "session already started"),
            SessionError::NoPlayer => write!(f, "no player has started a session"),
            SessionError::RoundInProgress => write!(f, "round still in progress"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Score/lives/player line shown above the field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub player: Option<String>,
    pub lives: u32,
    pub score: u32,
    pub phase: SessionPhase,
}

/// Session bookkeeping driven by engine events
#[derive(Debug, Clone)]
pub struct SessionState {
    lives: u32,
    score: u32,
    player: Option<String>,
    phase: SessionPhase,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            lives: 0,
            score: 0,
            player: None,
            phase: SessionPhase::AwaitingPlayer,
        }
    }
}

impl RoundListener for SessionState {
    fn current_lives(&self) -> u32 {
        self.lives
    }

    fn on_brick_destroyed(&mut self) {
        self.score += 1;
    }

    fn on_ball_lost(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn on_round_finished(&mut self, did_win: bool) {
        log::info!(
            "{}: score {}, lives {}",
            finish_message(did_win),
            self.score,
            self.lives
        );
        self.phase = SessionPhase::Finished { did_win };
    }
}

/// Orchestrates rounds for one player
#[derive(Debug, Clone)]
pub struct SessionController {
    state: SessionState,
    engine: Engine,
    starting_lives: u32,
}

impl SessionController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: SessionState::default(),
            engine: Engine::new(settings.layout, settings.resolve_seed()),
            starting_lives: settings.starting_lives,
        }
    }

    /// Start dialog submitted. Returns the new round id.
    pub fn begin(&mut self, player: &str) -> Result<u64, SessionError> {
        if self.state.player.is_some() {
            log::warn!("Start dialog submitted twice");
            return Err(SessionError::AlreadyStarted);
        }
        let player = player.trim();
        if player.is_empty() {
            log::warn!("Start dialog submitted without a name");
            return Err(SessionError::EmptyPlayerName);
        }
        log::info!("Player {} joined", player);
        self.state.player = Some(player.to_string());
        Ok(self.restore_lives())
    }

    /// Finish dialog's "play again". Returns the new round id.
    pub fn play_again(&mut self) -> Result<u64, SessionError> {
        match self.state.phase {
            SessionPhase::AwaitingPlayer => Err(SessionError::NoPlayer),
            SessionPhase::Playing => Err(SessionError::RoundInProgress),
            SessionPhase::Finished { .. } => {
                self.state.score = 0;
                Ok(self.restore_lives())
            }
        }
    }

    /// Refilling lives is what (re)starts the engine
    fn restore_lives(&mut self) -> u64 {
        self.state.lives = self.starting_lives;
        self.state.phase = SessionPhase::Playing;
        self.engine.start()
    }

    /// One engine step with this session as the event receiver
    pub fn tick(&mut self) -> TickOutcome {
        self.engine.tick(&mut self.state)
    }

    pub fn set_paddle_target_x(&mut self, x: f32) -> bool {
        self.engine.set_paddle_target_x(x)
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn player(&self) -> Option<&str> {
        self.state.player.as_deref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.engine.snapshot()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            player: self.state.player.clone(),
            lives: self.state.lives,
            score: self.state.score,
            phase: self.state.phase,
        }
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}
