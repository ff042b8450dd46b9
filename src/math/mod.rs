pub mod engine;
pub mod generator;
pub mod grid;
pub mod mesh;
pub mod normals;
pub mod presets;
pub mod surface;

pub use engine::{MeshEngine, MeshResult};
pub use generator::{generate, generate_with};
pub use grid::GridDomain;
pub use mesh::{Bounds, IndexedMesh, SurfaceMesh, TriangleMesh};
pub use normals::{DifferenceScheme, NormalEstimate, estimate_normal};
pub use presets::{SHAPE_PRESETS, find_preset};
pub use surface::{ParametricSurface, ShapeConstants, SpiralSurface};
