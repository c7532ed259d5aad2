//! Brush falloff, stroke parameters and operator dispatch.
//!
//! A [`BrushStroke`] is one application of a brush at a hit point. It is
//! validated up front, then dispatched to the matching operator in
//! [`crate::deformation`] or [`crate::paint`], which returns a
//! [`MutationResult`] holding the complete new attribute array.

use glam::{Vec3, Vec4};
use sculptor_config::BrushConfig;
use sculptor_mesh::AdjacencyMesh;
use serde::{Deserialize, Serialize};

use crate::deformation::{displace, taubin_smooth};
use crate::error::SculptError;
use crate::paint::paint;
use crate::types::BrushMode;

/// One keyframe of a [`PiecewiseCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Linearly interpolated keyframe curve, constant beyond its first and last key.
///
/// Keys are kept sorted by time; non-finite keys are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct PiecewiseCurve {
    keys: Vec<CurveKey>,
}

impl From<Vec<CurveKey>> for PiecewiseCurve {
    fn from(mut keys: Vec<CurveKey>) -> Self {
        keys.retain(|k| k.time.is_finite() && k.value.is_finite());
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }
}

impl From<PiecewiseCurve> for Vec<CurveKey> {
    fn from(curve: PiecewiseCurve) -> Self {
        curve.keys
    }
}

impl PiecewiseCurve {
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Evaluate at `t`. An empty curve evaluates to 0.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; both neighbors exist because of the checks above
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        a.value + (b.value - a.value) * ((t - a.time) / span)
    }
}

/// Falloff curve for brush influence.
///
/// Sampled with the normalized closeness to the brush center,
/// `t = 1 - distance / radius` (1.0 = center, 0.0 = edge). Input and output
/// are both clamped to [0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum FalloffCurve {
    /// weight = t
    #[default]
    Linear,
    /// Hermite smoothstep: 3t² - 2t³
    Smooth,
    /// Quadratic: t²
    Sharp,
    /// Full strength within radius
    Constant,
    /// Spherical profile: sqrt(1 - (1 - t)²)
    Sphere,
    /// Arbitrary keyframed profile
    Piecewise(PiecewiseCurve),
}

impl FalloffCurve {
    /// Build a keyframed curve from `(time, value)` pairs in any order.
    pub fn piecewise(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let keys: Vec<CurveKey> = keys
            .into_iter()
            .map(|(time, value)| CurveKey::new(time, value))
            .collect();
        Self::Piecewise(keys.into())
    }

    /// Sample the curve at closeness `t`.
    pub fn sample(&self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }
        let t = t.clamp(0.0, 1.0);
        let value = match self {
            FalloffCurve::Linear => t,
            FalloffCurve::Smooth => t * t * (3.0 - 2.0 * t),
            FalloffCurve::Sharp => t * t,
            FalloffCurve::Constant => 1.0,
            FalloffCurve::Sphere => {
                let d = 1.0 - t;
                (1.0 - d * d).max(0.0).sqrt()
            }
            FalloffCurve::Piecewise(curve) => curve.evaluate(t),
        };
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Weight for a vertex at `normalized_distance` (0.0 = center, 1.0 = edge).
    pub fn weight_at(&self, normalized_distance: f32) -> f32 {
        self.sample(1.0 - normalized_distance)
    }
}

/// Sign of a displacement stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeDirection {
    /// Move along the average normal (+1)
    #[default]
    Raise,
    /// Move against the average normal (-1)
    Lower,
}

impl StrokeDirection {
    pub fn sign(self) -> f32 {
        match self {
            StrokeDirection::Raise => 1.0,
            StrokeDirection::Lower => -1.0,
        }
    }

    /// Interpret a signed host value: positive raises, negative lowers.
    pub fn from_sign(sign: f32) -> Result<Self, SculptError> {
        if sign > 0.0 {
            Ok(StrokeDirection::Raise)
        } else if sign < 0.0 {
            Ok(StrokeDirection::Lower)
        } else {
            Err(SculptError::brush("direction", "must be positive or negative"))
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            StrokeDirection::Raise => StrokeDirection::Lower,
            StrokeDirection::Lower => StrokeDirection::Raise,
        }
    }
}

/// Parameters for a displacement stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaceParams {
    /// World-space brush center
    pub hit_point: Vec3,
    /// World-space surface normal at the hit point
    pub hit_normal: Vec3,
    pub direction: StrokeDirection,
    pub radius: f32,
    pub strength: f32,
    /// Overrides the session falloff when set
    pub falloff: Option<FalloffCurve>,
}

/// Parameters for a Taubin smoothing stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothParams {
    pub hit_point: Vec3,
    pub radius: f32,
    pub strength: f32,
}

/// Parameters for a vertex paint stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintParams {
    pub hit_point: Vec3,
    /// Carried for host symmetry; paint selects by distance only
    pub hit_normal: Vec3,
    pub radius: f32,
    /// RGBA in [0, 1]
    pub color: Vec4,
    /// Percentage in [0, 100]; values outside are clamped
    pub opacity: f32,
}

/// A single brush application, tagged by mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrushStroke {
    Displace(DisplaceParams),
    Smooth(SmoothParams),
    Paint(PaintParams),
}

/// Everything an operator reads.
///
/// The mesh world cache must be current for the host transform.
#[derive(Debug, Clone, Copy)]
pub struct BrushContext<'a> {
    pub mesh: &'a AdjacencyMesh,
    /// Current vertex colors, parallel to the mesh vertices
    pub colors: &'a [Vec4],
    pub config: &'a BrushConfig,
    /// Default falloff for strokes that use one
    pub falloff: &'a FalloffCurve,
}

/// Complete replacement array produced by an operator.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    Positions(Vec<Vec3>),
    Colors(Vec<Vec4>),
    /// Nothing was selected; commit nothing
    NoOp,
}

impl MutationResult {
    pub fn is_noop(&self) -> bool {
        matches!(self, MutationResult::NoOp)
    }
}

impl BrushStroke {
    pub fn mode(&self) -> BrushMode {
        match self {
            BrushStroke::Displace(_) => BrushMode::Displace,
            BrushStroke::Smooth(_) => BrushMode::Smooth,
            BrushStroke::Paint(_) => BrushMode::Paint,
        }
    }

    pub fn hit_point(&self) -> Vec3 {
        match self {
            BrushStroke::Displace(p) => p.hit_point,
            BrushStroke::Smooth(p) => p.hit_point,
            BrushStroke::Paint(p) => p.hit_point,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            BrushStroke::Displace(p) => p.radius,
            BrushStroke::Smooth(p) => p.radius,
            BrushStroke::Paint(p) => p.radius,
        }
    }

    /// Reject non-finite or out-of-range inputs before anything is computed.
    pub fn validate(&self) -> Result<(), SculptError> {
        check_vec3("hit_point", self.hit_point())?;
        check_radius(self.radius())?;
        match self {
            BrushStroke::Displace(p) => {
                check_vec3("hit_normal", p.hit_normal)?;
                check_scalar("strength", p.strength)?;
            }
            BrushStroke::Smooth(p) => {
                check_scalar("strength", p.strength)?;
            }
            BrushStroke::Paint(p) => {
                check_vec3("hit_normal", p.hit_normal)?;
                check_scalar("opacity", p.opacity)?;
                if !p.color.is_finite() {
                    return Err(SculptError::brush("color", "must be finite"));
                }
            }
        }
        Ok(())
    }

    /// Validate and run the operator for this stroke.
    pub fn apply(&self, ctx: &BrushContext<'_>) -> Result<MutationResult, SculptError> {
        self.validate()?;
        match self {
            BrushStroke::Displace(p) => {
                let falloff = p.falloff.as_ref().unwrap_or(ctx.falloff);
                displace(ctx.mesh, p, falloff, ctx.config)
            }
            BrushStroke::Smooth(p) => taubin_smooth(ctx.mesh, p, ctx.config),
            BrushStroke::Paint(p) => paint(ctx.mesh, ctx.colors, p, ctx.config),
        }
    }
}

fn check_vec3(name: &'static str, v: Vec3) -> Result<(), SculptError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SculptError::brush(name, "must be finite"))
    }
}

fn check_scalar(name: &'static str, v: f32) -> Result<(), SculptError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SculptError::brush(name, "must be finite"))
    }
}

fn check_radius(radius: f32) -> Result<(), SculptError> {
    if !radius.is_finite() {
        return Err(SculptError::brush("radius", "must be finite"));
    }
    if radius < 0.0 {
        return Err(SculptError::brush("radius", "must not be negative"));
    }
    Ok(())
}
