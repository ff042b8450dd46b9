use glam::DVec3;

use super::surface::ParametricSurface;
use crate::error::{MeshError, Result};

/// Angular perturbation (degrees) used for finite-difference tangents.
pub const DEFAULT_EPSILON: f64 = 0.0001;

/// How tangent vectors are formed from the perturbed samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifferenceScheme {
    /// `(p0 - p_perturbed) / ε`, a first-order backward difference.
    #[default]
    BackwardDifference,
    /// `p0 - p_perturbed / ε`. Only the perturbed sample is scaled, so the
    /// result is not a derivative. Kept to reproduce the shading of older
    /// renders of this surface.
    Legacy,
}

impl DifferenceScheme {
    fn tangent(self, p0: DVec3, perturbed: DVec3, epsilon: f64) -> DVec3 {
        match self {
            Self::BackwardDifference => (p0 - perturbed) / epsilon,
            Self::Legacy => p0 - perturbed / epsilon,
        }
    }
}

/// Rejects a perturbation that is zero, negative or not finite.
pub fn check_epsilon(epsilon: f64) -> Result<()> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(MeshError::InvalidEpsilon(epsilon));
    }
    Ok(())
}

/// Unit direction of `v`, or zero. Divides by the largest component first so
/// squaring cannot underflow or overflow for tiny or huge shape constants.
fn direction(v: DVec3) -> DVec3 {
    if !v.is_finite() {
        return DVec3::ZERO;
    }
    let scale = v.abs().max_element();
    if scale == 0.0 {
        return DVec3::ZERO;
    }
    (v / scale).normalize_or_zero()
}

/// Result of a normal estimate at one parameter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalEstimate {
    Unit(DVec3),
    /// The tangent cross product vanished (poles, the `u = 0` seam) or was
    /// not finite. Callers substitute [`NormalEstimate::FALLBACK`].
    Degenerate,
}

impl NormalEstimate {
    pub const FALLBACK: DVec3 = DVec3::ZERO;

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }

    /// The unit normal, or the zero-vector fallback.
    pub fn vector(self) -> DVec3 {
        match self {
            Self::Unit(n) => n,
            Self::Degenerate => Self::FALLBACK,
        }
    }
}

/// Approximates the surface normal at `(u, v)` from two perturbed samples.
///
/// Independent of any triangulation: the surface is re-evaluated at
/// `(u + ε, v)` and `(u, v + ε)`, and the normal is the normalised cross
/// product of the two difference vectors. Tangents are reduced to unit
/// directions first, so the result does not depend on the surface's scale.
pub fn estimate_normal<S>(
    surface: &S,
    u: f64,
    v: f64,
    epsilon: f64,
    scheme: DifferenceScheme,
) -> NormalEstimate
where
    S: ParametricSurface + ?Sized,
{
    let p0 = surface.evaluate(u, v);
    let pu = surface.evaluate(u + epsilon, v);
    let pv = surface.evaluate(u, v + epsilon);

    let delta_u = direction(scheme.tangent(p0, pu, epsilon));
    let delta_v = direction(scheme.tangent(p0, pv, epsilon));

    match delta_u.cross(delta_v).try_normalize() {
        Some(n) => NormalEstimate::Unit(n),
        None => NormalEstimate::Degenerate,
    }
}
