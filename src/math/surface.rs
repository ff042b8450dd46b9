use glam::DVec3;

use crate::error::{MeshError, Result};

/// The three scale factors of the spiral surface equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConstants {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ShapeConstants {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Rejects NaN and infinite constants. Any finite value is accepted.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("A", self.a), ("B", self.b), ("C", self.c)] {
            if !value.is_finite() {
                return Err(MeshError::NonFiniteConstant { name, value });
            }
        }
        Ok(())
    }
}

impl Default for ShapeConstants {
    fn default() -> Self {
        Self::new(0.3, 0.3, 0.15)
    }
}

/// A surface given as a map from two angle parameters (degrees) into 3D space.
///
/// Implementations must be deterministic and free of side effects, otherwise
/// finite-difference normals are meaningless.
pub trait ParametricSurface {
    fn evaluate(&self, u: f64, v: f64) -> DVec3;
}

impl<F> ParametricSurface for F
where
    F: Fn(f64, f64) -> DVec3,
{
    fn evaluate(&self, u: f64, v: f64) -> DVec3 {
        self(u, v)
    }
}

/// Spiral shell: at parameter `u` the meridian is an ellipse of radius
/// proportional to `u`, rotated by `u` around the z axis.
///
/// ```text
/// x =  A * u * sin(u) * cos(v)
/// y =  B * u * cos(u) * cos(v)
/// z = -C * u * sin(v)
/// ```
/// with `u` and `v` converted from degrees to radians first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpiralSurface {
    pub constants: ShapeConstants,
}

impl SpiralSurface {
    pub const fn new(constants: ShapeConstants) -> Self {
        Self { constants }
    }
}

impl ParametricSurface for SpiralSurface {
    fn evaluate(&self, u: f64, v: f64) -> DVec3 {
        let ShapeConstants { a, b, c } = self.constants;
        let u = u.to_radians();
        let v = v.to_radians();
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_v, cos_v) = v.sin_cos();

        DVec3::new(
            a * u * sin_u * cos_v,
            b * u * cos_u * cos_v,
            -c * u * sin_v,
        )
    }
}
