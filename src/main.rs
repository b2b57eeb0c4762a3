//! Brick Breaker headless runner
//!
//! Plays a few rounds on virtual time with an autopilot that keeps the
//! pointer under the ball, then prints a JSON summary.
//!
//! Usage: `brick-breaker [settings.json]` (log level via `RUST_LOG`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Serialize;

use brick_breaker::session::{HudSnapshot, finish_message};
use brick_breaker::{Game, SessionPhase, Settings};

/// Rounds to play before exiting
const ROUNDS: u32 = 3;
/// Virtual time budget per round (ms)
const ROUND_BUDGET_MS: u64 = 10 * 60 * 1000;
/// How often the autopilot moves the pointer (ms)
const AUTOPILOT_STEP_MS: u64 = 10;

#[derive(Debug, Serialize)]
struct RoundReport {
    round: u64,
    /// None when the time budget ran out first
    did_win: Option<bool>,
    ticks: u64,
    bricks_left: usize,
    hud: HudSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    log::info!("Brick Breaker (headless) starting...");

    let mut game = Game::new(&settings).context("invalid settings")?;
    game.begin("autopilot").context("start dialog rejected")?;

    let mut reports = Vec::new();
    for n in 0..ROUNDS {
        if n > 0 {
            game.play_again().context("play again rejected")?;
        }
        let report = play_round(&mut game);
        let timed_out = report.did_win.is_none();
        reports.push(report);
        // A round still in progress cannot be replayed
        if timed_out {
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

/// Drive one round until it finishes or the budget runs out
fn play_round(game: &mut Game) -> RoundReport {
    let deadline = game.now() + ROUND_BUDGET_MS;

    while game.now() < deadline {
        if let SessionPhase::Finished { .. } = game.phase() {
            break;
        }
        // Track the ball's center; the host surface and field share an origin
        let ball = game.session().engine().ball();
        let pointer = Vec2::new(ball.pos.x + ball.radius / 2.0, ball.pos.y);
        game.pointer_moved(pointer);
        game.advance(AUTOPILOT_STEP_MS);
    }

    let snapshot = game.snapshot();
    let did_win = match game.phase() {
        SessionPhase::Finished { did_win } => {
            log::info!("Round {}: {}", snapshot.round, finish_message(did_win));
            Some(did_win)
        }
        _ => {
            log::warn!("Round {} ran out of time", snapshot.round);
            None
        }
    };

    RoundReport {
        round: snapshot.round,
        did_win,
        ticks: snapshot.ticks,
        bricks_left: snapshot.bricks.len(),
        hud: game.hud(),
    }
}
