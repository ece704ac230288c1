//! Recorded action timelines, replayed headlessly against the engine
//!
//! A replay is a mode, an optional seed and a list of actions stamped with
//! the driver time they were issued at. Same replay + same seed always
//! gives the same outcome.

use crate::game::{Action, GameEvent, GameState, GameSummary};
use crate::mode::GameMode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One recorded input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Driver time in milliseconds, counted from game start
    pub at_ms: u64,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Replay {
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl Replay {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut replay: Replay = serde_json::from_str(json).context("Failed to parse replay")?;
        // Stable, so same-time steps keep their recorded order
        replay.steps.sort_by_key(|step| step.at_ms);
        Ok(replay)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// How the driver advances time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    pub seed: u64,
    /// Milliseconds passed to each `tick`
    pub tick_ms: u64,
    /// Give up after this much driver time
    pub max_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub seed: u64,
    pub summary: GameSummary,
    /// Steps the engine refused (blocked moves, second hold, ...)
    pub rejected: usize,
    pub events: Vec<GameEvent>,
}

/// Drive a fresh game through the replay until it ends or time runs out
pub fn run_replay(replay: &Replay, options: DriverOptions) -> ReplayOutcome {
    let seed = replay.seed.unwrap_or(options.seed);
    let tick_ms = options.tick_ms.max(1);
    info!(mode = replay.mode.name(), seed, steps = replay.steps.len(), "replay started");

    let mut game = GameState::with_seed(replay.mode.config(), seed);
    let mut steps = replay.steps.iter().peekable();
    let mut events = Vec::new();
    let mut rejected = 0;
    let mut clock = 0;

    loop {
        while let Some(step) = steps.next_if(|step| step.at_ms <= clock) {
            if !game.apply(step.action) {
                debug!(at_ms = step.at_ms, action = ?step.action, "step rejected");
                rejected += 1;
            }
            events.extend(game.take_events());
        }

        if game.status().is_finished() || clock >= options.max_ms {
            break;
        }

        game.tick(tick_ms);
        clock += tick_ms;
        events.extend(game.take_events());
    }

    let summary = game.summary();
    info!(
        status = ?summary.status,
        score = summary.score,
        lines = summary.lines,
        rejected,
        "replay finished"
    );
    ReplayOutcome {
        seed,
        summary,
        rejected,
        events,
    }
}
