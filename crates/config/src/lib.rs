//! Shared configuration for the mesh sculptor
//!
//! This crate provides the single source of truth for the brush calibration
//! constants and the normal transform policy shared by the mesh and
//! sculpting crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum `dot(world_normal, hit_normal)` for a vertex to be displaced
pub const DEFAULT_BACKFACE_DOT_THRESHOLD: f32 = 0.2;

/// Maps the UI strength range to a per-stroke displacement
pub const DEFAULT_DISPLACE_SCALE_FACTOR: f32 = 1.0 / 2000.0;

/// Maps the UI strength range to a Taubin step size
pub const DEFAULT_SMOOTH_STRENGTH_SCALE_FACTOR: f32 = 1.0 / 10.0;

/// Blend weight reached at 100% paint opacity
pub const DEFAULT_PAINT_OPACITY_SCALE_FACTOR: f32 = 0.3;

/// Default number of undo snapshots kept before the oldest is evicted
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 20;

/// How local normals are carried into world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalTransformPolicy {
    /// Rotate and scale like any other vector, without renormalizing
    Vector,
    /// Rotate only, ignoring scale
    RotationOnly,
    /// Inverse-transpose of the linear part, renormalized
    #[default]
    InverseTranspose,
}

/// Errors produced while loading or validating a [`BrushConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse brush config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Brush calibration shared by all operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Displace skips vertices whose world normal faces away from the hit normal
    pub backface_dot_threshold: f32,
    pub displace_scale_factor: f32,
    pub smooth_strength_scale_factor: f32,
    pub paint_opacity_scale_factor: f32,
    /// Normal policy used when refreshing the world cache
    pub normal_transform: NormalTransformPolicy,
    /// Undo depth, 0 keeps every snapshot
    pub max_history_depth: usize,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            backface_dot_threshold: DEFAULT_BACKFACE_DOT_THRESHOLD,
            displace_scale_factor: DEFAULT_DISPLACE_SCALE_FACTOR,
            smooth_strength_scale_factor: DEFAULT_SMOOTH_STRENGTH_SCALE_FACTOR,
            paint_opacity_scale_factor: DEFAULT_PAINT_OPACITY_SCALE_FACTOR,
            normal_transform: NormalTransformPolicy::default(),
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl BrushConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every numeric field is usable by the operators
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dot = self.backface_dot_threshold;
        if !dot.is_finite() || !(-1.0..=1.0).contains(&dot) {
            return Err(ConfigError::OutOfRange {
                field: "backface_dot_threshold",
                value: dot,
            });
        }

        let factors = [
            ("displace_scale_factor", self.displace_scale_factor),
            ("smooth_strength_scale_factor", self.smooth_strength_scale_factor),
            ("paint_opacity_scale_factor", self.paint_opacity_scale_factor),
        ];
        for (field, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        // Blend weights above 1 would overshoot the brush color
        if self.paint_opacity_scale_factor > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "paint_opacity_scale_factor",
                value: self.paint_opacity_scale_factor,
            });
        }

        Ok(())
    }

    /// Whether the undo stack grows without bound
    pub fn history_unbounded(&self) -> bool {
        self.max_history_depth == 0
    }
}
