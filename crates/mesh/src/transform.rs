//! Host transform applied to local vertex data.

use glam::{Mat4, Quat, Vec3};
use sculptor_config::NormalTransformPolicy;
use serde::{Deserialize, Serialize};

/// Translation, rotation and (possibly non-uniform) scale of the edited object.
///
/// Applied in scale → rotate → translate order, matching
/// [`Mat4::from_scale_rotation_translation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn uniform_scale(scale: f32) -> Self {
        Self::from_scale(Vec3::splat(scale))
    }

    /// Decompose an affine matrix. Shear is not representable and is dropped.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// Map a local point to world space (translation included).
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (self.scale * point) + self.translation
    }

    /// Map a local direction to world space (translation excluded).
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * (self.scale * vector)
    }

    /// Map a local normal to world space according to `policy`.
    pub fn transform_normal(&self, normal: Vec3, policy: NormalTransformPolicy) -> Vec3 {
        match policy {
            NormalTransformPolicy::Vector => self.transform_vector(normal),
            NormalTransformPolicy::RotationOnly => self.rotation * normal,
            NormalTransformPolicy::InverseTranspose => {
                // (R S)^-T = R S^-1 for a diagonal S; flattened axes contribute nothing
                let inverse_scale =
                    Vec3::select(self.scale.cmpeq(Vec3::ZERO), Vec3::ZERO, self.scale.recip());
                (self.rotation * (inverse_scale * normal)).normalize_or_zero()
            }
        }
    }
}
