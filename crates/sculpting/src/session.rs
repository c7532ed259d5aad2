//! Editing session: one mesh, its colors, and the undo history.
//!
//! The session owns the only mutable copy of the vertex attributes. Every
//! operator computes a full replacement array from a read-only view, then
//! [`SculptSession`] pushes the previous array onto the [`EditHistory`] and
//! swaps the new one in. Normals are left to the host unless
//! [`SculptSession::recompute_normals`] is called.

use glam::{Vec3, Vec4};
use sculptor_config::BrushConfig;
use sculptor_mesh::{AdjacencyMesh, MeshError, Transform};
use tracing::debug;

use crate::brush::{
    BrushContext, BrushStroke, DisplaceParams, FalloffCurve, MutationResult, PaintParams,
    SmoothParams,
};
use crate::error::SculptError;
use crate::history::{EditHistory, Snapshot};
use crate::paint::normal_axis_colors;
use crate::types::{MeshData, Rgba8};

/// Opaque black used by [`SculptSession::reset_vertex_colors`]
const RESET_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Attributes as they were imported, for [`SculptSession::reset_mesh`]
#[derive(Debug, Clone)]
struct ImportedAttributes {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    colors: Vec<Vec4>,
}

/// A mesh being sculpted and painted.
#[derive(Debug, Clone)]
pub struct SculptSession {
    mesh: AdjacencyMesh,
    colors: Vec<Vec4>,
    history: EditHistory,
    config: BrushConfig,
    falloff: FalloffCurve,
    imported: ImportedAttributes,
}

impl SculptSession {
    /// Build the adjacency mesh and an identity world cache.
    ///
    /// Empty `colors` are filled with opaque white. The config is validated
    /// first so a bad config never produces a session.
    pub fn new(data: MeshData, config: BrushConfig) -> Result<Self, SculptError> {
        config.validate()?;

        let MeshData {
            positions,
            normals,
            colors,
            indices,
        } = data;

        let vertex_count = positions.len();
        let colors = if colors.is_empty() {
            vec![Vec4::ONE; vertex_count]
        } else if colors.len() != vertex_count {
            return Err(MeshError::AttributeLengthMismatch {
                attribute: "colors",
                expected: vertex_count,
                actual: colors.len(),
            }
            .into());
        } else {
            colors
        };

        let imported = ImportedAttributes {
            positions: positions.clone(),
            normals: normals.clone(),
            colors: colors.clone(),
        };

        let mut mesh = AdjacencyMesh::build(positions, normals, &indices)?;
        mesh.update_world_cache(&Transform::IDENTITY, config.normal_transform);

        debug!(
            "SculptSession: {} vertices, {} faces, history depth {}",
            mesh.vertex_count(),
            mesh.face_count(),
            config.max_history_depth
        );

        Ok(Self {
            mesh,
            colors,
            history: EditHistory::new(config.max_history_depth),
            config,
            falloff: FalloffCurve::default(),
            imported,
        })
    }

    // ========================================================================
    // Host Inputs
    // ========================================================================

    /// Refresh the world cache for a new host transform.
    ///
    /// Non-finite transforms are rejected and the previous cache is kept.
    pub fn update_transform(&mut self, transform: &Transform) -> Result<(), SculptError> {
        if !transform.is_finite() {
            return Err(SculptError::InvalidTransform);
        }
        self.mesh
            .update_world_cache(transform, self.config.normal_transform);
        debug!(
            "update_transform: translation={:?} scale={:?}",
            transform.translation, transform.scale
        );
        Ok(())
    }

    /// Replace the brush config. The history cap applies immediately and a
    /// changed normal policy refreshes the world cache.
    pub fn set_config(&mut self, config: BrushConfig) -> Result<(), SculptError> {
        config.validate()?;
        self.history.set_max_depth(config.max_history_depth);
        if config.normal_transform != self.config.normal_transform {
            let transform = *self.mesh.transform();
            self.mesh
                .update_world_cache(&transform, config.normal_transform);
        }
        self.config = config;
        Ok(())
    }

    /// Falloff used by displace strokes that do not carry their own
    pub fn set_falloff(&mut self, falloff: FalloffCurve) {
        self.falloff = falloff;
    }

    // ========================================================================
    // Brush Strokes
    // ========================================================================

    /// Run one stroke and commit its result.
    ///
    /// Returns `Ok(false)` when nothing was selected; in that case no
    /// history entry is pushed and the attributes are untouched.
    pub fn apply(&mut self, stroke: &BrushStroke) -> Result<bool, SculptError> {
        let ctx = BrushContext {
            mesh: &self.mesh,
            colors: &self.colors,
            config: &self.config,
            falloff: &self.falloff,
        };
        let result = stroke.apply(&ctx)?;
        self.commit(result)
    }

    pub fn displace(&mut self, params: DisplaceParams) -> Result<bool, SculptError> {
        self.apply(&BrushStroke::Displace(params))
    }

    pub fn smooth(&mut self, params: SmoothParams) -> Result<bool, SculptError> {
        self.apply(&BrushStroke::Smooth(params))
    }

    pub fn paint(&mut self, params: PaintParams) -> Result<bool, SculptError> {
        self.apply(&BrushStroke::Paint(params))
    }

    fn commit(&mut self, result: MutationResult) -> Result<bool, SculptError> {
        match result {
            MutationResult::Positions(positions) => {
                let previous = self.mesh.set_positions(positions)?;
                self.history.push(Snapshot::Positions(previous));
                self.mesh.refresh_world_cache();
                debug!("commit: positions (history {})", self.history.len());
                Ok(true)
            }
            MutationResult::Colors(colors) => {
                self.commit_colors(colors)?;
                Ok(true)
            }
            MutationResult::NoOp => Ok(false),
        }
    }

    fn commit_colors(&mut self, colors: Vec<Vec4>) -> Result<(), SculptError> {
        if colors.len() != self.mesh.vertex_count() {
            return Err(MeshError::AttributeLengthMismatch {
                attribute: "colors",
                expected: self.mesh.vertex_count(),
                actual: colors.len(),
            }
            .into());
        }
        let previous = std::mem::replace(&mut self.colors, colors);
        self.history.push(Snapshot::Colors(previous));
        debug!("commit: colors (history {})", self.history.len());
        Ok(())
    }

    // ========================================================================
    // Whole-Mesh Edits
    // ========================================================================

    /// Set every vertex to `color`. Undoable.
    pub fn fill_color(&mut self, color: Vec4) -> Result<(), SculptError> {
        if !color.is_finite() {
            return Err(SculptError::brush("color", "must be finite"));
        }
        self.commit_colors(vec![color; self.mesh.vertex_count()])
    }

    /// Set every vertex to opaque black. Undoable.
    pub fn reset_vertex_colors(&mut self) -> Result<(), SculptError> {
        self.fill_color(RESET_COLOR)
    }

    /// Color each vertex by the dominant axis of its local normal. Undoable.
    pub fn colorize_by_normal_axis(&mut self) -> Result<(), SculptError> {
        self.commit_colors(normal_axis_colors(self.mesh.normals()))
    }

    /// Restore the imported positions, normals and colors. Undoable.
    pub fn reset_mesh(&mut self) -> Result<(), SculptError> {
        let imported = self.imported.clone();
        let positions = self.mesh.set_positions(imported.positions)?;
        let normals = self.mesh.set_normals(imported.normals)?;
        let colors = std::mem::replace(&mut self.colors, imported.colors);

        self.history.push(Snapshot::Mesh {
            positions,
            normals,
            colors,
        });
        self.mesh.refresh_world_cache();
        debug!("reset_mesh: restored {} vertices", self.mesh.vertex_count());
        Ok(())
    }

    /// Recompute area-weighted normals from the current positions.
    ///
    /// Not recorded in the history; undoing a later stroke restores
    /// positions only.
    pub fn recompute_normals(&mut self) {
        self.mesh.recompute_normals();
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Restore the newest snapshot.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, SculptError> {
        let Some(snapshot) = self.history.pop() else {
            debug!("undo: history empty");
            return Ok(false);
        };

        match snapshot {
            Snapshot::Positions(positions) => {
                self.mesh.set_positions(positions)?;
                self.mesh.refresh_world_cache();
            }
            Snapshot::Colors(colors) => {
                self.colors = colors;
            }
            Snapshot::Mesh {
                positions,
                normals,
                colors,
            } => {
                self.mesh.set_positions(positions)?;
                self.mesh.set_normals(normals)?;
                self.colors = colors;
                self.mesh.refresh_world_cache();
            }
        }

        debug!("undo: {} entries left", self.history.len());
        Ok(true)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn mesh(&self) -> &AdjacencyMesh {
        &self.mesh
    }

    pub fn positions(&self) -> &[Vec3] {
        self.mesh.positions()
    }

    pub fn normals(&self) -> &[Vec3] {
        self.mesh.normals()
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Colors quantized for upload
    pub fn colors_rgba8(&self) -> Vec<Rgba8> {
        self.colors.iter().map(|&c| Rgba8::from_vec4(c)).collect()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    pub fn falloff(&self) -> &FalloffCurve {
        &self.falloff
    }
}
