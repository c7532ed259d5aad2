//! Core sculpting types.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Brush mode selected by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BrushMode {
    /// Move vertices along the average normal under the brush
    #[default]
    Displace = 0,
    /// Taubin shrink/inflate smoothing
    Smooth = 1,
    /// Blend vertex colors toward the brush color
    Paint = 2,
}

/// 8-bit RGBA vertex color, laid out for direct GPU upload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize a float color, clamping each channel to [0, 1].
    pub fn from_vec4(color: Vec4) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(color.x), q(color.y), q(color.z), q(color.w))
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32,
            self.g as f32,
            self.b as f32,
            self.a as f32,
        ) / 255.0
    }
}

impl From<Vec4> for Rgba8 {
    fn from(color: Vec4) -> Self {
        Self::from_vec4(color)
    }
}

impl From<Rgba8> for Vec4 {
    fn from(color: Rgba8) -> Self {
        color.to_vec4()
    }
}

/// Raw mesh handed over by the host.
///
/// `indices` holds one `[a, b, c]` triple per triangle. `colors` may be
/// empty, in which case every vertex starts opaque white.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            colors: Vec::new(),
            indices,
        }
    }

    pub fn with_colors(mut self, colors: Vec<Vec4>) -> Self {
        self.colors = colors;
        self
    }

    /// Attach 8-bit colors, converted to floats.
    pub fn with_rgba8_colors(mut self, colors: &[Rgba8]) -> Self {
        self.colors = colors.iter().map(|c| c.to_vec4()).collect();
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
