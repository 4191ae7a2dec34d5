use breach_core::{Session, SessionStatus};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{APP_NAME, format_snapshot_hash};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionRecordFile {
    pub format_version: u32,
    pub seed: u64,
    pub status: SessionStatus,
    pub attempts: u32,
    pub reward: Option<u32>,
    pub time_left_ms: u64,
    pub snapshot_hash_hex: String,
    pub updated_at_unix_ms: u64,
}

impl SessionRecordFile {
    pub fn from_session(session: &Session) -> Self {
        Self {
            format_version: 1,
            seed: session.seed(),
            status: session.status(),
            attempts: session.attempts(),
            reward: session.reward(),
            time_left_ms: session.time_left().as_millis() as u64,
            snapshot_hash_hex: format_snapshot_hash(session.snapshot_hash()),
            updated_at_unix_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |duration| duration.as_millis() as u64),
        }
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_session.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(record)
    }
}
