//! Vertex normal recomputation from face geometry.

use glam::Vec3;

use super::AdjacencyMesh;

impl AdjacencyMesh {
    /// Area-weighted vertex normals from the current local positions.
    ///
    /// Each vertex sums the unnormalized cross products of its incident
    /// faces, so larger triangles weigh more. Vertices without faces keep a
    /// zero normal.
    pub fn compute_vertex_normals(&self) -> Vec<Vec3> {
        let face_areas: Vec<Vec3> = self
            .faces
            .iter()
            .map(|face| {
                let [a, b, c] = face.vertices.map(|v| self.positions[v.index()]);
                (b - a).cross(c - b)
            })
            .collect();

        self.adjacency
            .iter()
            .map(|adjacency| {
                adjacency
                    .faces
                    .iter()
                    .map(|f| face_areas[f.index()])
                    .sum::<Vec3>()
                    .normalize_or_zero()
            })
            .collect()
    }

    /// Replace the local normals with [`compute_vertex_normals`](Self::compute_vertex_normals)
    /// and refresh the world cache.
    ///
    /// Hosts that recompute normals themselves can use
    /// [`set_normals`](Self::set_normals) instead.
    pub fn recompute_normals(&mut self) {
        self.normals = self.compute_vertex_normals();
        self.refresh_world_cache();
    }
}
