use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{NotesError, Result};

pub const FILE_ENV: &str = "NOTESTORE_FILE";
pub const BIND_ENV: &str = "NOTESTORE_BIND";

const DEFAULT_FILE: &str = "notes.json";
const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Runtime configuration: where the notes live and where to serve them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub notes_file: PathBuf,
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_file: PathBuf::from(DEFAULT_FILE),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `NOTESTORE_FILE` / `NOTESTORE_BIND`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(file) = lookup(FILE_ENV).filter(|v| !v.is_empty()) {
            config.notes_file = PathBuf::from(file);
        }
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            config.bind = bind;
        }
        config
    }

    /// Apply command-line overrides on top of the current values.
    pub fn with_overrides(mut self, notes_file: Option<PathBuf>, bind: Option<String>) -> Self {
        if let Some(file) = notes_file {
            self.notes_file = file;
        }
        if let Some(bind) = bind {
            self.bind = bind;
        }
        self
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| NotesError::InvalidInput(format!("invalid bind address '{}'", self.bind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.notes_file, PathBuf::from("notes.json"));
        assert_eq!(config.bind_addr().unwrap().port(), 8501);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(|key| match key {
            FILE_ENV => Some("/tmp/other.json".to_string()),
            BIND_ENV => Some("0.0.0.0:9000".to_string()),
            _ => None,
        });
        assert_eq!(config.notes_file, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let config = Config::from_lookup(|_| Some(String::new()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = Config::default().with_overrides(Some(PathBuf::from("x.json")), None);
        assert_eq!(config.notes_file, PathBuf::from("x.json"));
        assert_eq!(config.bind, "127.0.0.1:8501");
    }

    #[test]
    fn test_invalid_bind() {
        let config = Config::default().with_overrides(None, Some("nope".to_string()));
        assert!(matches!(config.bind_addr(), Err(NotesError::InvalidInput(_))));
    }
}
