//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env is
//! loaded first) > built-in default. Invalid values are logged and replaced
//! by the default.
//!
//! ```toml
//! data_dir = "data"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [viewer]
//! layout = "tajweed-audio-with-tabs"
//! default_mode = "random"
//! random_step = "shuffled_walk"
//! session_expiry_hours = 24
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::layout::Layout;
use crate::navigator::{RandomStep, TraversalMode};
use crate::paths;

// ==================== Defaults ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Viewer session expiration time in hours of inactivity
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Longest accepted session expiry (one year)
pub const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365;

/// Probability threshold for session cleanup (0-255, lower = less frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Derivations shown on the front face; the back shows all of them
pub const FRONT_DERIVATION_LIMIT: usize = 6;

// ==================== config.toml ====================

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<String>,
    server: Option<ServerSection>,
    viewer: Option<ViewerSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewerSection {
    layout: Option<String>,
    default_mode: Option<String>,
    random_step: Option<String>,
    session_expiry_hours: Option<i64>,
}

// ==================== Resolved configuration ====================

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub layout: Layout,
    pub default_mode: TraversalMode,
    pub random_step: RandomStep,
    pub session_expiry_hours: i64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(paths::DEFAULT_DATA_DIR),
            host: SERVER_ADDR.to_string(),
            port: SERVER_PORT,
            layout: Layout::default(),
            default_mode: TraversalMode::default(),
            random_step: RandomStep::default(),
            session_expiry_hours: SESSION_EXPIRY_HOURS,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from config.toml and the process environment.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = read_config_file(Path::new(paths::CONFIG_FILE));
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Load from an explicit config.toml text, ignoring the environment.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(contents)?;
        Ok(Self::resolve(file, |_| None))
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let server = file.server.unwrap_or_default();
        let viewer = file.viewer.unwrap_or_default();

        let data_dir = file
            .data_dir
            .or_else(|| env("DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let host = server.host.or_else(|| env("HOST")).unwrap_or(defaults.host);

        let port = server
            .port
            .or_else(|| parse_setting("PORT", env("PORT")))
            .unwrap_or(defaults.port);

        let layout = parse_setting("layout", viewer.layout.or_else(|| env("CARD_LAYOUT")))
            .unwrap_or(defaults.layout);

        let default_mode = parse_setting("default_mode", viewer.default_mode.or_else(|| env("CARD_MODE")))
            .unwrap_or(defaults.default_mode);

        let random_step = parse_setting("random_step", viewer.random_step.or_else(|| env("RANDOM_STEP")))
            .unwrap_or(defaults.random_step);

        let session_expiry_hours = viewer
            .session_expiry_hours
            .or_else(|| parse_setting("SESSION_EXPIRY_HOURS", env("SESSION_EXPIRY_HOURS")))
            .and_then(checked_expiry_hours)
            .unwrap_or(defaults.session_expiry_hours);

        Self {
            data_dir,
            host,
            port,
            layout,
            default_mode,
            random_step,
            session_expiry_hours,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_config_file(path: &Path) -> FileConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return FileConfig::default();
    };

    match toml::from_str(&contents) {
        Ok(config) => {
            tracing::info!("Using configuration from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

fn checked_expiry_hours(hours: i64) -> Option<i64> {
    if (1..=MAX_SESSION_EXPIRY_HOURS).contains(&hours) {
        Some(hours)
    } else {
        tracing::warn!(
            "session_expiry_hours {} outside 1..={}, using default",
            hours,
            MAX_SESSION_EXPIRY_HOURS
        );
        None
    }
}

fn parse_setting<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Invalid value {:?} for {}, using default: {}", raw, name, e);
            None
        }
    }
}
