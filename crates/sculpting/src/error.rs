//! Error type shared by the brush operators and the session.

use sculptor_config::ConfigError;
use sculptor_mesh::MeshError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SculptError {
    /// Rejected before any mutation; the mesh is unchanged
    #[error("Invalid brush parameter `{name}`: {reason}")]
    InvalidBrushParameter {
        name: &'static str,
        reason: &'static str,
    },
    #[error("Transform has non-finite components")]
    InvalidTransform,
    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

impl SculptError {
    pub(crate) fn brush(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidBrushParameter { name, reason }
    }

    /// Whether this is an operator input error rather than a mesh/config error
    pub fn is_brush_parameter(&self) -> bool {
        matches!(self, Self::InvalidBrushParameter { .. })
    }
}
