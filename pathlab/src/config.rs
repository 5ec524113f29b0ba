//! Demonstrator configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```toml
//! rows = 30
//! cols = 40
//! heuristic = "octile"
//! maze_density = 0.25
//! step_delay_ms = 5
//! seed = 7
//! log_file = "/tmp/pathlab.log"
//! log_filter = "debug"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use pathlab_core::HeuristicKind;
use serde::{Deserialize, Serialize};

/// Environment variable naming a config file, used when no path is given on
/// the command line.
pub const CONFIG_ENV: &str = "PATHLAB_CONFIG";

/// Largest accepted grid side. Keeps the grid within a terminal.
pub const MAX_SIDE: i32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rows: i32,
    pub cols: i32,
    /// Initial heuristic. Its movement policy comes with it.
    pub heuristic: HeuristicKind,
    /// Wall probability for the random maze.
    pub maze_density: f64,
    /// Pause between animation frames, in milliseconds.
    pub step_delay_ms: u64,
    /// Fixed maze seed; random when absent.
    pub seed: Option<u64>,
    /// Log destination. The terminal is taken over by the UI, so logs go to
    /// a file.
    pub log_file: PathBuf,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            heuristic: HeuristicKind::Manhattan,
            maze_density: pathlab_maze::DEFAULT_DENSITY,
            step_delay_ms: 20,
            seed: None,
            log_file: PathBuf::from("pathlab.log"),
            log_filter: "info".into(),
        }
    }
}

/// Errors from loading or validating a [`Config`].
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "invalid config: {e}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from `path` if given, else from `$PATHLAB_CONFIG` if set, else
    /// use the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, side) in [("rows", self.rows), ("cols", self.cols)] {
            if !(1..=MAX_SIDE).contains(&side) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {MAX_SIDE}, got {side}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.maze_density) {
            return Err(ConfigError::Invalid(format!(
                "maze_density must be within [0, 1], got {}",
                self.maze_density
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_demo() {
        let c = Config::default();
        assert_eq!((c.rows, c.cols), (20, 20));
        assert_eq!(c.heuristic, HeuristicKind::Manhattan);
        assert_eq!(c.maze_density, 0.3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let c = Config::from_toml_str("cols = 32\nheuristic = \"euclidean\"\nseed = 9").unwrap();
        assert_eq!(c.cols, 32);
        assert_eq!(c.rows, 20);
        assert_eq!(c.heuristic, HeuristicKind::Euclidean);
        assert_eq!(c.seed, Some(9));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str("rows = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("maze_density = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("heuristic = \"dijkstra\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("colour = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/pathlab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/pathlab.toml"));
    }
}
