//! A single hacking session: the live grid, the countdown, and attempt bookkeeping.
//!
//! The session is the only owner of the live grid. Every accepted rotation
//! re-traces the whole grid and re-checks the win condition; nothing else
//! carries state between calls.

use std::hash::Hasher;
use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

use crate::board::{Grid, RotateError};
use crate::config::{ConfigError, PuzzleConfig};
use crate::levelgen::seed::{mix_seed_stream, roll_range, seeded_rng};
use crate::levelgen::{GeneratedLevel, generate_level};
use crate::trace::{check_win_condition, trace_circuit};
use crate::types::Coord;

const REWARD_STREAM: u64 = 0x5EED_0000_0000_0001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
    Cancelled,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        self != SessionStatus::Playing
    }

    fn code(self) -> u8 {
        match self {
            SessionStatus::Playing => 0,
            SessionStatus::Won => 1,
            SessionStatus::Lost => 2,
            SessionStatus::Cancelled => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotateOutcome {
    pub coord: Coord,
    pub rotation: u8,
    pub powered_tiles: usize,
    pub won: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub status: SessionStatus,
    pub reward: Option<u32>,
    pub attempts: u32,
    pub time_left: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid puzzle config: {0}")]
    Config(#[from] ConfigError),
    #[error("session is no longer in play ({0:?})")]
    NotPlaying(SessionStatus),
    #[error(transparent)]
    Rotate(#[from] RotateError),
}

pub struct Session {
    seed: u64,
    config: PuzzleConfig,
    attempts: u32,
    level: GeneratedLevel,
    grid: Grid,
    status: SessionStatus,
    time_left: Duration,
    reward: Option<u32>,
    reward_rng: ChaCha8Rng,
}

impl Session {
    /// Builds the first level, seeds its power, and starts the clock.
    pub fn start(seed: u64, config: PuzzleConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let level = generate_level(seed, 0, &config);
        let grid = trace_circuit(&level.grid);
        debug!(seed, attempt = 0, "session started");

        Ok(Self {
            seed,
            time_left: config.time_limit(),
            reward_rng: seeded_rng(mix_seed_stream(seed, REWARD_STREAM)),
            config,
            attempts: 1,
            level,
            grid,
            status: SessionStatus::Playing,
            reward: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn level(&self) -> &GeneratedLevel {
        &self.level
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub fn reward(&self) -> Option<u32> {
        self.reward
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.status.is_finished().then_some(SessionResult {
            status: self.status,
            reward: self.reward,
            attempts: self.attempts,
            time_left: self.time_left,
        })
    }

    /// Turns one tile a quarter clockwise, re-traces, and checks for a win.
    pub fn rotate(&mut self, coord: Coord) -> Result<RotateOutcome, SessionError> {
        if self.status.is_finished() {
            return Err(SessionError::NotPlaying(self.status));
        }
        let rotation = self.grid.rotate_tile(coord)?;
        self.grid = trace_circuit(&self.grid);

        let won = check_win_condition(&self.grid);
        if won {
            let reward = roll_range(
                &mut self.reward_rng,
                self.config.reward_min as usize,
                self.config.reward_max as usize,
            ) as u32;
            self.reward = Some(reward);
            self.finish(SessionStatus::Won);
        }

        Ok(RotateOutcome { coord, rotation, powered_tiles: self.grid.powered_count(), won })
    }

    /// Runs the countdown. Reaching zero while playing loses the session.
    pub fn advance_clock(&mut self, elapsed: Duration) -> SessionStatus {
        if self.status == SessionStatus::Playing {
            self.time_left = self.time_left.saturating_sub(elapsed);
            if self.time_left.is_zero() {
                self.finish(SessionStatus::Lost);
            }
        }
        self.status
    }

    pub fn cancel(&mut self) -> SessionStatus {
        if self.status == SessionStatus::Playing {
            self.finish(SessionStatus::Cancelled);
        }
        self.status
    }

    /// Deals a fresh level and restarts the clock.
    pub fn restart(&mut self) {
        let attempt = self.attempts;
        self.attempts += 1;
        self.level = generate_level(self.seed, attempt, &self.config);
        self.grid = trace_circuit(&self.level.grid);
        self.status = SessionStatus::Playing;
        self.time_left = self.config.time_limit();
        self.reward = None;
        debug!(seed = self.seed, attempt, "session restarted");
    }

    fn finish(&mut self, status: SessionStatus) {
        self.status = status;
        debug!(
            seed = self.seed,
            attempts = self.attempts,
            ?status,
            time_left_ms = self.time_left.as_millis() as u64,
            "session finished"
        );
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.attempts);
        hasher.write_u8(self.status.code());
        hasher.write_u64(self.time_left.as_millis() as u64);
        hasher.write_u32(self.reward.unwrap_or(0));
        hasher.write(&self.grid.canonical_bytes());
        hasher.finish()
    }
}
