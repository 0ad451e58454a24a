//! Settings: defaults, overridden by `config.toml`, overridden by the command line.

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::hn_client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

pub const DEFAULT_INITIAL_TERM: &str = "React";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("initial search term must not be empty")]
    EmptyInitialTerm,
}

/// Command line of the desktop app.
#[derive(Parser, Debug, Default)]
#[command(name = "hacker_stories", version, about = "Search Hacker News stories")]
pub struct Cli {
    /// Term searched when the window opens
    #[arg(short, long)]
    pub term: Option<String>,

    /// Search API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Start with the light theme
    #[arg(long)]
    pub light: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub initial_term: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub dark_mode: Option<bool>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub initial_term: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub dark_mode: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            initial_term: DEFAULT_INITIAL_TERM.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dark_mode: true,
            log_file: None,
        }
    }
}

impl Settings {
    /// Resolves settings for `cli`, reading the config file it points at
    /// (or the default one).
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.clone().or_else(default_config_path);
        let file = match path {
            Some(path) => load_config_file(&path)?,
            None => None,
        };
        Self::resolve(file, cli)
    }

    pub fn resolve(file: Option<ConfigFile>, cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(file) = file {
            if let Some(endpoint) = file.endpoint {
                settings.endpoint = endpoint;
            }
            if let Some(term) = file.initial_term {
                settings.initial_term = term;
            }
            if let Some(secs) = file.timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
            if let Some(agent) = file.user_agent {
                settings.user_agent = agent;
            }
            if let Some(dark) = file.dark_mode {
                settings.dark_mode = dark;
            }
            settings.log_file = file.log_file;
        }

        if let Some(endpoint) = &cli.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(term) = &cli.term {
            settings.initial_term = term.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        if cli.light {
            settings.dark_mode = false;
        }
        if let Some(log_file) = &cli.log_file {
            settings.log_file = Some(log_file.clone());
        }

        if settings.initial_term.trim().is_empty() {
            return Err(ConfigError::EmptyInitialTerm);
        }
        Ok(settings)
    }
}

/// `<config dir>/hacker_stories/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("hacker_stories").join("config.toml"))
}

/// A missing file is not an error; the defaults apply.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = Settings::resolve(None, &Cli::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.initial_term, "React");
        assert_eq!(settings.endpoint, "https://hn.algolia.com/api/v1/search");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_file(&dir.path().join("nope.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            endpoint = "http://localhost:8080/search"
            initial_term = "Rust"
            timeout_secs = 5
            dark_mode = false
            "#,
        );
        let config = load_config_file(file.path()).unwrap();
        let settings = Settings::resolve(config, &Cli::default()).unwrap();

        assert_eq!(settings.endpoint, "http://localhost:8080/search");
        assert_eq!(settings.initial_term, "Rust");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(!settings.dark_mode);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn command_line_beats_file() {
        let file = ConfigFile {
            initial_term: Some("Rust".into()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let cli = Cli::try_parse_from([
            "hacker_stories",
            "--term",
            "Cypress",
            "--timeout-secs",
            "9",
            "--light",
        ])
        .unwrap();

        let settings = Settings::resolve(Some(file), &cli).unwrap();
        assert_eq!(settings.initial_term, "Cypress");
        assert_eq!(settings.timeout, Duration::from_secs(9));
        assert!(!settings.dark_mode);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("favorites = true\n");
        let err = load_config_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn blank_initial_term_is_rejected() {
        let cli = Cli::try_parse_from(["hacker_stories", "--term", " "]).unwrap();
        let err = Settings::resolve(None, &cli).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyInitialTerm));
    }

    #[test]
    fn zero_timeout_flag_is_refused() {
        assert!(Cli::try_parse_from(["hacker_stories", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn explicit_config_flag_is_used() {
        let file = write_config("initial_term = \"Zig\"\n");
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.initial_term, "Zig");
    }
}
