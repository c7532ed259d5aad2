//! World-space caches for AdjacencyMesh.

use sculptor_config::NormalTransformPolicy;

use super::transform::Transform;
use super::AdjacencyMesh;

impl AdjacencyMesh {
    /// Recompute world positions and normals for every vertex.
    ///
    /// Must be called after the host transform changes and before any
    /// operator reads world-space data. The transform and policy are
    /// remembered for [`refresh_world_cache`](Self::refresh_world_cache).
    pub fn update_world_cache(&mut self, transform: &Transform, policy: NormalTransformPolicy) {
        self.transform = *transform;
        self.normal_policy = policy;
        self.refresh_world_cache();
    }

    /// Re-apply the last transform, e.g. after local positions were committed.
    pub fn refresh_world_cache(&mut self) {
        let transform = self.transform;
        let policy = self.normal_policy;

        self.world_positions.clear();
        self.world_positions
            .extend(self.positions.iter().map(|&p| transform.transform_point(p)));

        self.world_normals.clear();
        self.world_normals.extend(
            self.normals
                .iter()
                .map(|&n| transform.transform_normal(n, policy)),
        );

        tracing::trace!(
            "refresh_world_cache: {} vertices, translation={:?}",
            self.world_positions.len(),
            transform.translation
        );
    }

    /// Transform last written into the world caches
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Normal policy last used for the world caches
    pub fn normal_policy(&self) -> NormalTransformPolicy {
        self.normal_policy
    }
}

#[cfg(test)]
mod tests {
    use crate::{AdjacencyMesh, Transform, VertexId};
    use glam::{Quat, Vec3};
    use sculptor_config::NormalTransformPolicy;

    fn triangle() -> AdjacencyMesh {
        AdjacencyMesh::build(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            &[0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_initial_cache_is_identity() {
        let mesh = triangle();
        assert_eq!(mesh.world_positions(), mesh.positions());
        assert_eq!(mesh.world_normals(), mesh.normals());
    }

    #[test]
    fn test_update_world_cache() {
        let mut mesh = triangle();
        let transform = Transform::new(
            Vec3::new(0.0, 0.0, 5.0),
            Quat::from_rotation_x(std::f32::consts::PI),
            Vec3::splat(2.0),
        );
        mesh.update_world_cache(&transform, NormalTransformPolicy::InverseTranspose);

        let world = mesh.vertex(VertexId(2)).unwrap().world_position;
        assert!((world - Vec3::new(0.0, -2.0, 5.0)).length() < 1e-5);

        let normal = mesh.world_normals()[0];
        assert!((normal - Vec3::NEG_Z).length() < 1e-5);
        // Local data is untouched
        assert_eq!(mesh.positions()[2], Vec3::Y);
    }

    #[test]
    fn test_cache_is_not_recomputed_on_position_change() {
        let mut mesh = triangle();
        mesh.update_world_cache(
            &Transform::from_translation(Vec3::X),
            NormalTransformPolicy::default(),
        );
        mesh.set_positions(vec![Vec3::ONE; 3]).unwrap();
        assert_eq!(mesh.world_positions()[0], Vec3::X);

        mesh.refresh_world_cache();
        assert_eq!(mesh.world_positions()[0], Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(mesh.transform().translation, Vec3::X);
    }
}
