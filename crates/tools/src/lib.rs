use anyhow::{Context, Result, anyhow};
use breach_core::SessionJournal;
use std::fs;
use std::io;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber shared by the tool binaries.
pub fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to install log subscriber")
}

pub fn load_journal(path: &Path) -> Result<SessionJournal> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    serde_json::from_str(&journal_data).with_context(|| "Failed to deserialize journal JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use breach_core::{PuzzleConfig, replay_session};
    use tempfile::tempdir;

    #[test]
    fn logging_installs_once() {
        init_logging().expect("first install succeeds");
        assert!(tracing::dispatcher::has_been_set());
        assert!(init_logging().is_err());
    }

    #[test]
    fn saved_journal_loads_and_replays() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("journal.json");

        let mut journal = SessionJournal::new(64, PuzzleConfig::default());
        journal.append_elapse(2_000);
        fs::write(&path, serde_json::to_string_pretty(&journal).expect("serialize"))
            .expect("write");

        let loaded = load_journal(&path).expect("load");
        assert_eq!(loaded, journal);
        let result = replay_session(&loaded).expect("replay");
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn malformed_journal_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("journal.json");
        fs::write(&path, "[]").expect("write");

        assert!(load_journal(&path).is_err());
        assert!(load_journal(&dir.path().join("absent.json")).is_err());
    }
}
