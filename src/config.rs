use crate::error::Result;
use crate::math::grid::GridDomain;
use crate::math::normals::{DEFAULT_EPSILON, DifferenceScheme, check_epsilon};
use crate::math::surface::ShapeConstants;

/// Everything one generation pass reads. `Copy`, so a pass always works on
/// its own snapshot even if the caller keeps editing theirs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    pub constants: ShapeConstants,
    pub domain: GridDomain,
    pub scheme: DifferenceScheme,
    pub epsilon: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            constants: ShapeConstants::default(),
            domain: GridDomain::default(),
            scheme: DifferenceScheme::default(),
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SurfaceConfig {
    pub fn with_constants(mut self, constants: ShapeConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.domain.step = step;
        self
    }

    pub fn with_domain(mut self, domain: GridDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_scheme(mut self, scheme: DifferenceScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.domain.layout()?;
        self.constants.validate()?;
        check_epsilon(self.epsilon)
    }
}
