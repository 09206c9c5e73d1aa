//! Application configuration.
//!
//! Loaded from a TOML file. Every field has a default, so a missing file
//! or a partial file is fine. Paths may start with `~/`.
//!
//! ```toml
//! data_dir = "~/.scorekeeper"
//! format = "json"
//! color_scheme = "light"
//! default_color = "#ff6b6b"
//! color_seed = 42
//!
//! [chart]
//! width = 40
//!
//! [log]
//! level = "warn"
//! path = "~/.scorekeeper/scorekeeper.log"
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use crate::core::{Color, ColorError, ColorScheme};
use crate::persistence::SnapshotFormat;
use crate::session::SessionOptions;

/// Default config file location, relative to `$HOME`.
pub const DEFAULT_CONFIG_PATH: &str = "~/.scorekeeper/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid default_color: {0}")]
    Color(#[from] ColorError),

    #[error("chart.width must be at least 1")]
    ChartWidth,

    #[error("cannot expand {0}: HOME is not set")]
    NoHome(String),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    data_dir: String,
    format: SnapshotFormat,
    color_scheme: ColorScheme,
    default_color: String,
    color_seed: Option<u64>,
    chart: ChartConfig,
    log: FileLogConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.scorekeeper".to_string(),
            format: SnapshotFormat::Json,
            color_scheme: ColorScheme::Light,
            default_color: Color::DEFAULT.to_string(),
            color_seed: None,
            chart: ChartConfig::default(),
            log: FileLogConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
struct FileLogConfig {
    level: String,
    path: Option<String>,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Cells spanned by the longest bar.
    pub width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { width: 40 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Optional append-only log file.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub format: SnapshotFormat,
    pub color_scheme: ColorScheme,
    pub default_color: Color,
    pub color_seed: Option<u64>,
    pub chart: ChartConfig,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // The built-in defaults only fail to resolve when HOME is unset.
        resolve(FileConfig::default()).unwrap_or_else(|_| Self {
            data_dir: PathBuf::from(".scorekeeper"),
            format: SnapshotFormat::Json,
            color_scheme: ColorScheme::Light,
            default_color: Color::DEFAULT,
            color_seed: None,
            chart: ChartConfig::default(),
            log: LogConfig {
                level: "warn".to_string(),
                path: None,
            },
        })
    }
}

impl AppConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let cfg: FileConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        resolve(cfg)
    }

    /// Override the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Session settings derived from this config.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        let options = SessionOptions::default()
            .with_color_scheme(self.color_scheme)
            .with_default_color(self.default_color);
        match self.color_seed {
            Some(seed) => options.with_color_seed(seed),
            None => options,
        }
    }
}

/// Load the configuration.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is used if present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match expand_tilde(DEFAULT_CONFIG_PATH) {
            Ok(default) if default.is_file() => default,
            _ => return Ok(AppConfig::default()),
        },
    };

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    AppConfig::from_toml(&text, &path)
}

fn resolve(cfg: FileConfig) -> Result<AppConfig, ConfigError> {
    if cfg.chart.width == 0 {
        return Err(ConfigError::ChartWidth);
    }

    Ok(AppConfig {
        data_dir: expand_tilde(&cfg.data_dir)?,
        format: cfg.format,
        color_scheme: cfg.color_scheme,
        default_color: Color::parse(&cfg.default_color)?,
        color_seed: cfg.color_seed,
        chart: cfg.chart,
        log: LogConfig {
            level: cfg.log.level,
            path: cfg.log.path.as_deref().map(expand_tilde).transpose()?,
        },
    })
}

/// Expand a leading `~/` to `$HOME`.
pub fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = env::var("HOME").map_err(|_| ConfigError::NoHome(path.to_string()))?;
            Ok(PathBuf::from(home).join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml(text, Path::new("test.toml"))
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.format, SnapshotFormat::Json);
        assert_eq!(cfg.color_scheme, ColorScheme::Light);
        assert_eq!(cfg.default_color, Color::DEFAULT);
        assert_eq!(cfg.chart.width, 40);
        assert_eq!(cfg.log.level, "warn");
        assert!(cfg.log.path.is_none());
        assert!(cfg.color_seed.is_none());
    }

    #[test]
    fn test_full_file() {
        let cfg = parse(
            r##"
            data_dir = "/var/lib/scores"
            format = "binary"
            color_scheme = "dark"
            default_color = "#00ff00"
            color_seed = 9

            [chart]
            width = 20

            [log]
            level = "debug"
            path = "/tmp/scores.log"
            "##,
        )
        .unwrap();

        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/scores"));
        assert_eq!(cfg.format, SnapshotFormat::Binary);
        assert_eq!(cfg.color_scheme, ColorScheme::Dark);
        assert_eq!(cfg.default_color, Color::rgb(0, 255, 0));
        assert_eq!(cfg.color_seed, Some(9));
        assert_eq!(cfg.chart.width, 20);
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.log.path, Some(PathBuf::from("/tmp/scores.log")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(parse("default_color = \"red\""), Err(ConfigError::Color(_))));
        assert!(matches!(parse("[chart]\nwidth = 0"), Err(ConfigError::ChartWidth)));
        assert!(matches!(parse("format = \"xml\""), Err(ConfigError::Parse { .. })));
        assert!(matches!(parse("unknown = 1"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path").unwrap(), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("rel/path").unwrap(), PathBuf::from("rel/path"));

        if let Ok(home) = env::var("HOME") {
            assert_eq!(expand_tilde("~/x/y").unwrap(), PathBuf::from(home).join("x/y"));
        }
    }

    #[test]
    fn test_session_options() {
        let cfg = parse("color_seed = 3\ncolor_scheme = \"dark\"").unwrap();
        let options = cfg.session_options();

        assert_eq!(options.color_seed, Some(3));
        assert_eq!(options.color_scheme, ColorScheme::Dark);
        assert_eq!(options.default_color, Color::DEFAULT);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
