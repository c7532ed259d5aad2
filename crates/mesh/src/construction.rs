//! Construction methods for AdjacencyMesh.

use glam::Vec3;
use sculptor_config::NormalTransformPolicy;
use std::collections::HashSet;

use super::transform::Transform;
use super::types::{Face, FaceId, MeshError, VertexAdjacency, VertexId};
use super::AdjacencyMesh;

impl AdjacencyMesh {
    /// Build adjacency from a triangle soup.
    ///
    /// `indices` holds one `[a, b, c]` triple per face. Fails without
    /// producing a partial mesh if the index count is not a multiple of 3,
    /// an index is out of range, or `normals` and `positions` differ in
    /// length. World caches start out as the identity transform.
    pub fn build(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: &[u32],
    ) -> Result<Self, MeshError> {
        let vertex_count = positions.len();

        if normals.len() != vertex_count {
            return Err(MeshError::AttributeLengthMismatch {
                attribute: "normals",
                expected: vertex_count,
                actual: normals.len(),
            });
        }

        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles { len: indices.len() });
        }

        let face_count = indices.len() / 3;
        let mut faces: Vec<Face> = Vec::with_capacity(face_count);
        let mut neighbor_sets: Vec<HashSet<VertexId>> = vec![HashSet::new(); vertex_count];
        let mut face_lists: Vec<Vec<FaceId>> = vec![Vec::new(); vertex_count];

        for (face_idx, tri) in indices.chunks_exact(3).enumerate() {
            let mut corners = [VertexId(0); 3];
            for (corner, &index) in corners.iter_mut().zip(tri) {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfBounds {
                        face: face_idx,
                        index,
                        vertex_count,
                    });
                }
                *corner = VertexId(index);
            }

            let face_id = FaceId(face_idx as u32);
            faces.push(Face {
                id: face_id,
                vertices: corners,
            });

            for (i, &v) in corners.iter().enumerate() {
                // Faces arrive in increasing order, so a repeated corner can
                // only collide with the most recent entry
                let incident = &mut face_lists[v.index()];
                if incident.last() != Some(&face_id) {
                    incident.push(face_id);
                }

                for &other in &corners[i + 1..] {
                    if other != v {
                        neighbor_sets[v.index()].insert(other);
                        neighbor_sets[other.index()].insert(v);
                    }
                }
            }
        }

        // Freeze into sorted slices so iteration order does not depend on hasher state
        let adjacency: Vec<VertexAdjacency> = neighbor_sets
            .into_iter()
            .zip(face_lists)
            .map(|(neighbors, faces)| {
                let mut neighbors: Vec<VertexId> = neighbors.into_iter().collect();
                neighbors.sort_unstable();
                VertexAdjacency {
                    neighbors: neighbors.into_boxed_slice(),
                    faces: faces.into_boxed_slice(),
                }
            })
            .collect();

        let isolated = adjacency.iter().filter(|a| a.faces.is_empty()).count();
        tracing::debug!(
            "AdjacencyMesh::build: {} vertices, {} faces, {} isolated vertices",
            vertex_count,
            face_count,
            isolated
        );

        Ok(Self {
            world_positions: positions.clone(),
            world_normals: normals.clone(),
            positions,
            normals,
            faces,
            adjacency,
            transform: Transform::IDENTITY,
            normal_policy: NormalTransformPolicy::default(),
        })
    }

    /// Build from flat `[f32; 3]` arrays as handed over by most render APIs.
    pub fn from_arrays(
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        indices: &[u32],
    ) -> Result<Self, MeshError> {
        Self::build(
            positions.iter().copied().map(Vec3::from_array).collect(),
            normals.iter().copied().map(Vec3::from_array).collect(),
            indices,
        )
    }
}
