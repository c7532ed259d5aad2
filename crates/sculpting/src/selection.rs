//! Brush vertex selection.
//!
//! Picks every vertex whose world position lies strictly inside the brush
//! sphere, optionally filtered by a per-vertex predicate and weighted by a
//! falloff curve. Results are always in increasing vertex order.

use glam::Vec3;
use sculptor_mesh::{AdjacencyMesh, VertexId};

use crate::brush::FalloffCurve;

/// Vertices affected by one brush application, with a parallel weight per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub indices: Vec<VertexId>,
    pub weights: Vec<f32>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Iterate `(vertex, weight)` pairs in vertex order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f32)> + '_ {
        self.indices.iter().copied().zip(self.weights.iter().copied())
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.indices.binary_search(&id).is_ok()
    }
}

/// Brush sphere plus optional filtering and weighting.
pub struct SelectionFilter<'a> {
    pub hit_point: Vec3,
    pub radius: f32,
    predicate: Option<Box<dyn Fn(VertexId) -> bool + 'a>>,
    falloff: Option<&'a FalloffCurve>,
}

impl<'a> SelectionFilter<'a> {
    pub fn new(hit_point: Vec3, radius: f32) -> Self {
        Self {
            hit_point,
            radius,
            predicate: None,
            falloff: None,
        }
    }

    /// Only keep vertices for which `predicate` holds.
    pub fn with_predicate(mut self, predicate: impl Fn(VertexId) -> bool + 'a) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Weight vertices by `falloff(1 - distance / radius)` instead of 1.0.
    pub fn with_falloff(mut self, falloff: &'a FalloffCurve) -> Self {
        self.falloff = Some(falloff);
        self
    }

    /// Run the filter against the mesh world cache.
    ///
    /// Returns an empty selection, never an error, when nothing qualifies.
    pub fn select(&self, mesh: &AdjacencyMesh) -> Selection {
        let mut selection = Selection::default();

        for (i, &world) in mesh.world_positions().iter().enumerate() {
            let distance = world.distance(self.hit_point);
            if !(distance < self.radius) {
                continue;
            }

            let id = VertexId(i as u32);
            if let Some(predicate) = &self.predicate {
                if !predicate(id) {
                    continue;
                }
            }

            let weight = match self.falloff {
                Some(curve) => curve.weight_at(distance / self.radius),
                None => 1.0,
            };

            selection.indices.push(id);
            selection.weights.push(weight);
        }

        selection
    }
}

impl std::fmt::Debug for SelectionFilter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionFilter")
            .field("hit_point", &self.hit_point)
            .field("radius", &self.radius)
            .field("has_predicate", &self.predicate.is_some())
            .field("falloff", &self.falloff)
            .finish()
    }
}

/// One-shot form of [`SelectionFilter`].
pub fn select(
    mesh: &AdjacencyMesh,
    hit_point: Vec3,
    radius: f32,
    predicate: Option<&dyn Fn(VertexId) -> bool>,
    falloff: Option<&FalloffCurve>,
) -> Selection {
    let mut filter = SelectionFilter::new(hit_point, radius);
    if let Some(predicate) = predicate {
        filter = filter.with_predicate(predicate);
    }
    if let Some(falloff) = falloff {
        filter = filter.with_falloff(falloff);
    }
    filter.select(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sculptor_config::NormalTransformPolicy;
    use sculptor_mesh::Transform;

    /// 3x3 grid on z = 0, vertex `x + 3y` at `(x, y, 0)`.
    fn grid() -> AdjacencyMesh {
        let positions = (0..9)
            .map(|i| Vec3::new((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        let mut indices = Vec::new();
        for y in 0..2u32 {
            for x in 0..2u32 {
                let v = x + 3 * y;
                indices.extend_from_slice(&[v, v + 1, v + 3, v + 1, v + 4, v + 3]);
            }
        }
        AdjacencyMesh::build(positions, vec![Vec3::Z; 9], &indices).unwrap()
    }

    #[test]
    fn test_grid_center_selects_plus_shape() {
        let mesh = grid();
        let selection = SelectionFilter::new(Vec3::new(1.0, 1.0, 0.0), 1.1).select(&mesh);
        let ids: Vec<u32> = selection.indices.iter().map(|v| v.0).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 7]);
        assert!(selection.weights.iter().all(|&w| w == 1.0));
        for corner in [0, 2, 6, 8] {
            assert!(!selection.contains(VertexId(corner)));
        }
    }

    #[test]
    fn test_radius_is_exclusive() {
        let mesh = grid();
        let selection = SelectionFilter::new(Vec3::new(1.0, 1.0, 0.0), 1.0).select(&mesh);
        assert_eq!(selection.indices, vec![VertexId(4)]);
    }

    #[test]
    fn test_empty_selection() {
        let mesh = grid();
        assert!(SelectionFilter::new(Vec3::ZERO, 0.0).select(&mesh).is_empty());
        assert!(SelectionFilter::new(Vec3::splat(100.0), 1.0).select(&mesh).is_empty());
        assert!(SelectionFilter::new(Vec3::ZERO, f32::NAN).select(&mesh).is_empty());
    }

    #[test]
    fn test_predicate_filters() {
        let mesh = grid();
        let selection = SelectionFilter::new(Vec3::new(1.0, 1.0, 0.0), 1.1)
            .with_predicate(|v| v.0 % 2 == 1)
            .select(&mesh);
        assert_eq!(
            selection.indices,
            vec![VertexId(1), VertexId(3), VertexId(5), VertexId(7)]
        );
    }

    #[test]
    fn test_falloff_weights() {
        let mesh = grid();
        let curve = FalloffCurve::Linear;
        let selection = SelectionFilter::new(Vec3::new(1.0, 1.0, 0.0), 2.0)
            .with_falloff(&curve)
            .select(&mesh);

        let weight = |id: u32| {
            selection
                .iter()
                .find(|(v, _)| v.0 == id)
                .map(|(_, w)| w)
                .unwrap()
        };
        assert_eq!(weight(4), 1.0);
        assert!((weight(1) - 0.5).abs() < 1e-6);
        assert!((weight(0) - (1.0 - 2f32.sqrt() / 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_uses_world_positions() {
        let mut mesh = grid();
        mesh.update_world_cache(
            &Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)),
            NormalTransformPolicy::default(),
        );
        let hit = Vec3::new(11.0, 1.0, 0.0);
        assert_eq!(SelectionFilter::new(hit, 1.1).select(&mesh).len(), 5);
        assert!(SelectionFilter::new(Vec3::new(1.0, 1.0, 0.0), 1.1)
            .select(&mesh)
            .is_empty());
    }

    #[test]
    fn test_free_function_matches_filter() {
        let mesh = grid();
        let curve = FalloffCurve::Smooth;
        let predicate = |v: VertexId| v.0 != 4;
        let a = select(&mesh, Vec3::ONE, 1.5, Some(&predicate), Some(&curve));
        let b = SelectionFilter::new(Vec3::ONE, 1.5)
            .with_predicate(predicate)
            .with_falloff(&curve)
            .select(&mesh);
        assert_eq!(a, b);
    }
}
