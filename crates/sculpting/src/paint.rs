//! Vertex color painting.

use glam::{Vec3, Vec4};
use sculptor_config::BrushConfig;
use sculptor_mesh::{AdjacencyMesh, MeshError};
use tracing::trace;

use crate::brush::{MutationResult, PaintParams};
use crate::error::SculptError;
use crate::selection::SelectionFilter;

/// Blend weight for a paint stroke at `opacity` percent.
pub fn paint_blend_factor(opacity: f32, config: &BrushConfig) -> f32 {
    (opacity / 100.0).clamp(0.0, 1.0) * config.paint_opacity_scale_factor
}

/// Blend the color of every vertex under the brush toward `params.color`.
///
/// All channels, alpha included, move by the same factor; there is no
/// distance falloff.
pub fn paint(
    mesh: &AdjacencyMesh,
    colors: &[Vec4],
    params: &PaintParams,
    config: &BrushConfig,
) -> Result<MutationResult, SculptError> {
    if colors.len() != mesh.vertex_count() {
        return Err(MeshError::AttributeLengthMismatch {
            attribute: "colors",
            expected: mesh.vertex_count(),
            actual: colors.len(),
        }
        .into());
    }

    let selection = SelectionFilter::new(params.hit_point, params.radius).select(mesh);

    trace!("paint: {} vertices selected", selection.len());
    if selection.is_empty() {
        return Ok(MutationResult::NoOp);
    }

    let strength = paint_blend_factor(params.opacity, config);
    let complement = 1.0 - strength;

    let mut painted = colors.to_vec();
    for &v in &selection.indices {
        let old = painted[v.index()];
        painted[v.index()] = old * complement + params.color * strength;
    }

    Ok(MutationResult::Colors(painted))
}

/// Debug coloring by dominant normal axis: X red, Y blue, otherwise green.
pub fn normal_axis_colors(normals: &[Vec3]) -> Vec<Vec4> {
    const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
    const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

    normals
        .iter()
        .map(|n| {
            let a = n.abs();
            if a.x > a.y && a.x > a.z {
                RED
            } else if a.y > a.x && a.y > a.z {
                BLUE
            } else {
                GREEN
            }
        })
        .collect()
}
