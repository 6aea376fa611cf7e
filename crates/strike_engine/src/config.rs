//! Simulation configuration
//!
//! Loaded from TOML; every field has a default so a partial file (or no
//! file at all) yields a runnable configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{utils, Vec3};
use crate::visibility::Camera;

/// Raised when a configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file contents are not valid TOML for [`SimConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Initial camera placement and lens parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position in world space
    pub position: [f32; 3],
    /// Look-at target in world space
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 30.0, 30.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl CameraConfig {
    /// Build the runtime camera this config describes
    pub fn to_camera(&self) -> Camera {
        Camera {
            position: Vec3::from(self.position),
            target: Vec3::from(self.target),
            up: Vec3::y(),
            fov_y: utils::deg_to_rad(self.fov_degrees),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        }
    }
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Spatial grid cell size in world units
    pub cell_size: f32,
    /// Upper bound on per-tick delta time in seconds
    pub max_delta_time: f32,
    /// Cap on concurrently live projectile entities
    pub max_projectiles: usize,
    /// Seed for the gameplay RNG; fixed seed gives reproducible runs
    pub seed: u64,
    /// Distance projectiles spawn ahead of the muzzle, in world units
    pub projectile_standoff: f32,
    /// Extra slack added to visibility sphere tests, in world units
    pub visibility_margin: f32,
    /// Initial camera
    pub camera: CameraConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 4.0,
            max_delta_time: 0.25,
            max_projectiles: 256,
            seed: 42,
            projectile_standoff: 1.0,
            visibility_margin: 2.0,
            camera: CameraConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file; missing fields take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
