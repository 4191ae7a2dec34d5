//! Puzzle settings loaded from a TOML file.

use breach_core::PuzzleConfig;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub fn get_default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push("config.toml");
        path
    })
}

/// Reads and validates a config file. Fields missing from the file keep their defaults.
pub fn load(path: &Path) -> io::Result<PuzzleConfig> {
    let content = fs::read_to_string(path)?;
    let config: PuzzleConfig =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    config.validate().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(config)
}

/// Loads `explicit` when given. Otherwise the default location is tried, and a missing
/// default file yields the built-in defaults.
pub fn resolve(explicit: Option<&Path>) -> io::Result<PuzzleConfig> {
    if let Some(path) = explicit {
        return load(path);
    }
    match get_default_path() {
        Some(path) if path.exists() => load(&path),
        _ => Ok(PuzzleConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_overrides_only_listed_fields() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "grid_size = 10\ntime_limit_secs = 90\n").expect("write");

        let config = load(&path).expect("load");
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.time_limit_secs, 90);
        assert_eq!(config.blocker_percent, PuzzleConfig::default().blocker_percent);
    }

    #[test]
    fn invalid_values_are_reported_as_invalid_data() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "grid_size = 2\n").expect("write");

        let err = load(&path).expect_err("grid of two is rejected");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let err = resolve(Some(&dir.path().join("absent.toml"))).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
