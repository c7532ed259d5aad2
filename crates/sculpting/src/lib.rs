//! Brush-based sculpting and vertex painting.
//!
//! This crate provides the brush operators that run on a
//! [`sculptor_mesh::AdjacencyMesh`]:
//! - Displacement along the average normal under the brush
//! - Taubin shrink/inflate smoothing
//! - Vertex color painting
//!
//! # Architecture
//!
//! Operators never mutate the mesh. Each one selects vertices from the
//! world-space cache, computes a complete replacement array and returns it
//! as a [`MutationResult`]. [`SculptSession`] commits results, records the
//! previous array in the [`EditHistory`] and keeps the world cache current.
//!
//! ## Key Components
//!
//! - **Selection**: Vertices strictly inside the brush sphere, with weights
//! - **Brush**: Falloff curves, stroke parameters and dispatch
//! - **Deformation**: Displace and Taubin smooth
//! - **Paint**: Color blending
//! - **History**: Bounded LIFO of attribute snapshots
//! - **Session**: Host-facing editing state

pub mod brush;
pub mod deformation;
pub mod error;
pub mod history;
pub mod paint;
pub mod selection;
pub mod session;
pub mod types;

pub use brush::{
    BrushContext, BrushStroke, CurveKey, DisplaceParams, FalloffCurve, MutationResult,
    PaintParams, PiecewiseCurve, SmoothParams, StrokeDirection,
};
pub use error::SculptError;
pub use history::{EditHistory, Snapshot};
pub use selection::{Selection, SelectionFilter};
pub use session::SculptSession;
pub use types::{BrushMode, MeshData, Rgba8};

pub use sculptor_config::{BrushConfig, ConfigError, NormalTransformPolicy};
pub use sculptor_mesh::{AdjacencyMesh, MeshError, Transform, VertexId};
