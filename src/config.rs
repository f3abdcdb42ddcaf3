//! Search configuration
//!
//! A [`SearchConfig`] is built once before the search, checked with
//! [`SearchConfig::validate`], and shared read-only by every worker.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shapes::ShapeCategory;
use crate::version::Version;

/// Largest distance from the origin accepted for radius and center.
pub const WORLD_LIMIT: i32 = 30_000_000;

pub const MIN_MAX_Y: i32 = 48;
pub const DEFAULT_MAX_Y: i32 = 255;
pub const MAX_THREADS: usize = 10_000;

/// Parameters of one search run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_version")]
    pub version: Version,
    /// World seed (required).
    pub seed: i64,
    /// Placement salt. Ignored, and stored as 0, for versions before 1.16.1.
    #[serde(default)]
    pub salt: Option<i32>,
    #[serde(default = "default_shape")]
    pub shape: ShapeCategory,
    /// Highest crossroad floor accepted.
    #[serde(default = "default_max_y")]
    pub max_y: i32,
    /// Search radius in blocks (required).
    pub search_radius: i32,
    #[serde(default)]
    pub center_x: i32,
    #[serde(default)]
    pub center_z: i32,
    #[serde(default = "default_threads")]
    pub thread_count: usize,
    /// Stop every worker once any match is found.
    #[serde(default)]
    pub stop_on_first: bool,
}

fn default_version() -> Version {
    Version::V1_16_1
}

fn default_shape() -> ShapeCategory {
    ShapeCategory::QuadSquare
}

fn default_max_y() -> i32 {
    DEFAULT_MAX_Y
}

fn default_threads() -> usize {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            seed: 0,
            salt: None,
            shape: default_shape(),
            max_y: DEFAULT_MAX_Y,
            search_radius: 0,
            center_x: 0,
            center_z: 0,
            thread_count: default_threads(),
            stop_on_first: false,
        }
    }
}

impl SearchConfig {
    /// Salt handed to the generator: the given or default salt for salted
    /// versions, 0 otherwise.
    pub fn effective_salt(&self) -> i32 {
        if self.version.uses_salt() {
            self.salt.unwrap_or_else(|| self.version.default_salt())
        } else {
            0
        }
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max_y", self.max_y as i64, MIN_MAX_Y as i64, i32::MAX as i64)?;
        check_range("search_radius", self.search_radius as i64, 0, WORLD_LIMIT as i64)?;
        check_range(
            "center_x",
            self.center_x as i64,
            -(WORLD_LIMIT as i64),
            WORLD_LIMIT as i64,
        )?;
        check_range(
            "center_z",
            self.center_z as i64,
            -(WORLD_LIMIT as i64),
            WORLD_LIMIT as i64,
        )?;
        check_range("thread_count", self.thread_count as i64, 1, MAX_THREADS as i64)?;
        Ok(())
    }

    /// Load a config from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: SearchConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

/// Errors that stop a search before any region is processed.
#[derive(Debug)]
pub enum ConfigError {
    /// A parameter lies outside its accepted range
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// A required parameter was not given
    MissingField(&'static str),
    /// The generator reported a region size the bounds cannot be built from
    InvalidRegionSize(i32),
    /// Config file could not be read or written
    Io(std::io::Error),
    /// Config file is not valid JSON for a search config
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::OutOfRange { field, value, min, max } => {
                write!(f, "{} = {} is outside {}..={}", field, value, min, max)
            }
            ConfigError::MissingField(field) => write!(f, "Missing required parameter: {}", field),
            ConfigError::InvalidRegionSize(size) => write!(f, "Invalid region size: {}", size),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
