//! Turns the spiral shell equation into a triangle list with per-vertex
//! normals, ready to be handed to a renderer as two parallel `f32` buffers.
//!
//! ```no_run
//! use spiralmesh::{SurfaceConfig, generate};
//!
//! let surface = generate(SurfaceConfig::default())?;
//! assert_eq!(surface.mesh.vertex_count(), 72 * 72 * 6);
//! # Ok::<(), spiralmesh::MeshError>(())
//! ```

pub mod config;
pub mod error;
pub mod math;

pub use config::SurfaceConfig;
pub use error::{MeshError, Result};
pub use math::*;
