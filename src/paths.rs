//! Project path constants - single source of truth for file locations.
//!
//! The data directory itself is configurable (see `config.rs`); everything
//! here is relative to it or to the working directory.

/// Manifest file name inside the data directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Default data directory when neither config.toml nor DATA_DIR set one
pub const DEFAULT_DATA_DIR: &str = "data";

/// Static assets (JS, CSS), served under `/static`
pub const STATIC_DIR: &str = "static";

/// Optional configuration file in the working directory
pub const CONFIG_FILE: &str = "config.toml";
