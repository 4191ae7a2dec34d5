//! Tunables for level generation and session pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub grid_size: usize,
    pub time_limit_secs: u64,
    /// Chance in percent that an off-path cell becomes a firewall.
    pub blocker_percent: u8,
    pub path_attempts: u32,
    /// Stop searching once the best inner path is longer than this.
    pub long_path_threshold: usize,
    pub reward_min: u32,
    pub reward_max: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: 8,
            time_limit_secs: 60,
            blocker_percent: 10,
            path_attempts: 100,
            long_path_threshold: 25,
            reward_min: 300,
            reward_max: 700,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid_size must be between 3 and 32, got {0}")]
    GridSize(usize),
    #[error("blocker_percent must be at most 100, got {0}")]
    BlockerPercent(u8),
    #[error("path_attempts must be at least 1")]
    NoPathAttempts,
    #[error("time_limit_secs must be at least 1")]
    NoTimeLimit,
    #[error("reward_min ({min}) exceeds reward_max ({max})")]
    RewardRange { min: u32, max: u32 },
}

impl PuzzleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.blocker_percent > 100 {
            return Err(ConfigError::BlockerPercent(self.blocker_percent));
        }
        if self.path_attempts == 0 {
            return Err(ConfigError::NoPathAttempts);
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::NoTimeLimit);
        }
        if self.reward_min > self.reward_max {
            return Err(ConfigError::RewardRange { min: self.reward_min, max: self.reward_max });
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}
