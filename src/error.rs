use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeshError>;

/// Structural failures that abort a generation pass.
///
/// Per-vertex numerical trouble (degenerate normals) is not represented here;
/// it is resolved locally and reported on the produced mesh instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("grid step must be finite and > 0, got {0}")]
    InvalidStep(f64),

    #[error("invalid {axis} domain [{min}, {max}]: bounds must be finite with min < max")]
    InvalidDomain {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("grid of {cells} cells exceeds the limit of {limit}")]
    TooManyCells { cells: u64, limit: u64 },

    #[error("shape constant {name} must be finite, got {value}")]
    NonFiniteConstant { name: &'static str, value: f64 },

    #[error("finite-difference epsilon must be finite and > 0, got {0}")]
    InvalidEpsilon(f64),

    #[error("mesh engine worker has stopped")]
    EngineStopped,
}
