//! Vertex deformation operators.
//!
//! Both operators read the mesh without modifying it and return the full
//! replacement position array. Committing the result (and recording undo)
//! is the caller's job, see [`crate::session::SculptSession`].

use glam::Vec3;
use sculptor_config::BrushConfig;
use sculptor_mesh::AdjacencyMesh;
use tracing::trace;

use crate::brush::{DisplaceParams, FalloffCurve, MutationResult, SmoothParams};
use crate::error::SculptError;
use crate::selection::SelectionFilter;

/// Push or pull vertices along the average local normal under the brush.
///
/// Vertices whose world normal faces away from `hit_normal` (dot below
/// `config.backface_dot_threshold`) are skipped so thin geometry is not
/// sculpted through from the far side. Each selected vertex moves by
/// `avg_normal * weight * strength * displace_scale_factor * direction`.
pub fn displace(
    mesh: &AdjacencyMesh,
    params: &DisplaceParams,
    falloff: &FalloffCurve,
    config: &BrushConfig,
) -> Result<MutationResult, SculptError> {
    let world_normals = mesh.world_normals();
    let hit_normal = params.hit_normal;
    let threshold = config.backface_dot_threshold;

    let selection = SelectionFilter::new(params.hit_point, params.radius)
        .with_predicate(|v| world_normals[v.index()].dot(hit_normal) >= threshold)
        .with_falloff(falloff)
        .select(mesh);

    trace!("displace: {} vertices selected", selection.len());
    if selection.is_empty() {
        return Ok(MutationResult::NoOp);
    }

    let normals = mesh.normals();
    let avg_normal = selection
        .indices
        .iter()
        .map(|v| normals[v.index()])
        .sum::<Vec3>()
        / selection.len() as f32;

    let step = params.strength * config.displace_scale_factor * params.direction.sign();
    let mut positions = mesh.positions().to_vec();
    for (v, weight) in selection.iter() {
        positions[v.index()] += avg_normal * weight * step;
    }

    Ok(MutationResult::Positions(positions))
}

/// Taubin shrink/inflate smoothing of the vertices under the brush.
///
/// Every selected vertex gets weight 1.0; no falloff is applied. With
/// `k = strength * smooth_strength_scale_factor`:
///
/// 1. shrink: `q[i] = p[i] + (avg(p, neighbors(i)) - p[i]) * k`
/// 2. inflate: `r[i] = q[i] - (avg(q, neighbors(i)) - q[i]) * k`
///
/// Each pass reads neighbor positions from a single snapshot, so the result
/// does not depend on visiting order. Vertices outside the selection, and
/// vertices without neighbors, keep their position.
pub fn taubin_smooth(
    mesh: &AdjacencyMesh,
    params: &SmoothParams,
    config: &BrushConfig,
) -> Result<MutationResult, SculptError> {
    let selection = SelectionFilter::new(params.hit_point, params.radius).select(mesh);

    trace!("taubin_smooth: {} vertices selected", selection.len());
    if selection.is_empty() {
        return Ok(MutationResult::NoOp);
    }

    let k = params.strength * config.smooth_strength_scale_factor;
    let positions = mesh.positions();

    // Shrink
    let mut intermediate = positions.to_vec();
    for &v in &selection.indices {
        if let Some(avg) = mesh.neighbor_average(v, positions) {
            let p = positions[v.index()];
            intermediate[v.index()] = p + (avg - p) * k;
        }
    }

    // Inflate
    let mut smoothed = intermediate.clone();
    for &v in &selection.indices {
        if let Some(avg) = mesh.neighbor_average(v, &intermediate) {
            let q = intermediate[v.index()];
            smoothed[v.index()] = q - (avg - q) * k;
        }
    }

    Ok(MutationResult::Positions(smoothed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::StrokeDirection;
    use sculptor_mesh::VertexId;

    /// 5x5 grid on z = 0, vertex `x + 5y` at `(x, y, 0)`, with a bump at the center.
    fn bumpy_grid() -> AdjacencyMesh {
        let mut positions: Vec<Vec3> = (0..25)
            .map(|i| Vec3::new((i % 5) as f32, (i / 5) as f32, 0.0))
            .collect();
        positions[12].z = 1.0;
        let mut indices = Vec::new();
        for y in 0..4u32 {
            for x in 0..4u32 {
                let v = x + 5 * y;
                indices.extend_from_slice(&[v, v + 1, v + 5, v + 1, v + 6, v + 5]);
            }
        }
        AdjacencyMesh::build(positions, vec![Vec3::Z; 25], &indices).unwrap()
    }

    fn displace_params(direction: StrokeDirection) -> DisplaceParams {
        DisplaceParams {
            hit_point: Vec3::new(2.0, 2.0, 0.0),
            hit_normal: Vec3::Z,
            direction,
            radius: 1.5,
            strength: 100.0,
            falloff: None,
        }
    }

    fn positions(result: MutationResult) -> Vec<Vec3> {
        match result {
            MutationResult::Positions(p) => p,
            other => panic!("expected positions, got {other:?}"),
        }
    }

    #[test]
    fn test_displace_moves_along_average_normal() {
        let mesh = bumpy_grid();
        let config = BrushConfig::default();
        let result = displace(
            &mesh,
            &displace_params(StrokeDirection::Raise),
            &FalloffCurve::Constant,
            &config,
        )
        .unwrap();
        let new = positions(result);

        // 100 * (1 / 2000) along +Z for the 3x3 block around the center
        let moved = Vec3::new(1.0, 1.0, 0.05);
        assert!((new[6] - moved).length() < 1e-6);
        // Distance from (2,2,0) to the bump vertex (2,2,1) is 1.0 < 1.5
        assert!((new[12].z - 1.05).abs() < 1e-6);
        // Outside the radius
        assert_eq!(new[0], mesh.positions()[0]);
    }

    #[test]
    fn test_displace_uses_falloff() {
        let mesh = bumpy_grid();
        let config = BrushConfig::default();
        let params = DisplaceParams {
            radius: 2.0,
            ..displace_params(StrokeDirection::Raise)
        };
        let new = positions(displace(&mesh, &params, &FalloffCurve::Linear, &config).unwrap());

        // Vertex 7 is 1.0 from the hit point: weight 0.5
        assert!((new[7].z - 0.025).abs() < 1e-6);
        // Vertex 12 is 1.0 away (bump height): weight 0.5
        assert!((new[12].z - 1.025).abs() < 1e-6);
    }

    #[test]
    fn test_displace_skips_back_facing() {
        let mesh = bumpy_grid();
        let config = BrushConfig::default();
        let params = DisplaceParams {
            hit_normal: Vec3::NEG_Z,
            ..displace_params(StrokeDirection::Raise)
        };
        let result = displace(&mesh, &params, &FalloffCurve::Constant, &config).unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn test_displace_averages_normals() {
        let mut normals = vec![Vec3::Z; 25];
        normals[7] = Vec3::X;
        normals[12] = Vec3::X;
        let mut mesh = bumpy_grid();
        mesh.set_normals(normals).unwrap();
        mesh.refresh_world_cache();

        let config = BrushConfig::default();
        let params = DisplaceParams {
            hit_normal: Vec3::new(1.0, 0.0, 1.0).normalize(),
            ..displace_params(StrokeDirection::Lower)
        };
        let new = positions(displace(&mesh, &params, &FalloffCurve::Constant, &config).unwrap());

        // 9 selected: 7 with +Z, 2 with +X
        let avg = Vec3::new(2.0, 0.0, 7.0) / 9.0;
        let expected = mesh.positions()[6] - avg * 0.05;
        assert!((new[6] - expected).length() < 1e-6);
    }

    #[test]
    fn test_smooth_flattens_bump() {
        let mesh = bumpy_grid();
        let config = BrushConfig::default();
        let params = SmoothParams {
            hit_point: Vec3::new(2.0, 2.0, 1.0),
            radius: 0.5,
            strength: 5.0,
        };
        let new = positions(taubin_smooth(&mesh, &params, &config).unwrap());

        // Only the bump vertex is selected. k = 0.5, neighbors are all flat
        // shrink: 1 + (0 - 1) * 0.5 = 0.5; inflate: 0.5 - (0 - 0.5) * 0.5 = 0.75
        assert!((new[12].z - 0.75).abs() < 1e-6);
        for (i, p) in new.iter().enumerate() {
            if i != 12 {
                assert_eq!(*p, mesh.positions()[i]);
            }
        }
    }

    #[test]
    fn test_smooth_second_pass_reads_intermediate() {
        let mesh = bumpy_grid();
        let config = BrushConfig::default();
        // Select the bump and its immediate neighbor 13 only
        let params = SmoothParams {
            hit_point: Vec3::new(2.5, 2.0, 0.5),
            radius: 0.75,
            strength: 5.0,
        };
        let selection = SelectionFilter::new(params.hit_point, params.radius).select(&mesh);
        assert_eq!(selection.indices, vec![VertexId(12), VertexId(13)]);

        let new = positions(taubin_smooth(&mesh, &params, &config).unwrap());
        let p = mesh.positions();
        let k = 0.5;

        let mut q = p.to_vec();
        for v in [12usize, 13] {
            let avg = mesh.neighbor_average(VertexId(v as u32), p).unwrap();
            q[v] = p[v] + (avg - p[v]) * k;
        }
        for v in [12usize, 13] {
            let avg = mesh.neighbor_average(VertexId(v as u32), &q).unwrap();
            let expected = q[v] - (avg - q[v]) * k;
            assert!((new[v] - expected).length() < 1e-6);
        }
        // Vertex 13 moved up in the shrink pass because vertex 12 is raised
        assert!(q[13].z > 0.0);
    }

    #[test]
    fn test_smooth_empty_selection() {
        let mesh = bumpy_grid();
        let params = SmoothParams {
            hit_point: Vec3::splat(50.0),
            radius: 1.0,
            strength: 1.0,
        };
        let result = taubin_smooth(&mesh, &params, &BrushConfig::default()).unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn test_smooth_ignores_isolated_vertex() {
        let mesh = AdjacencyMesh::build(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::splat(3.0)],
            vec![Vec3::Z; 4],
            &[0, 1, 2],
        )
        .unwrap();
        let params = SmoothParams {
            hit_point: Vec3::splat(3.0),
            radius: 0.5,
            strength: 1.0,
        };
        let new = positions(taubin_smooth(&mesh, &params, &BrushConfig::default()).unwrap());
        assert_eq!(new[3], Vec3::splat(3.0));
        assert!(new.iter().all(|p| p.is_finite()));
    }
}
