use glam::DVec3;

use super::grid::GridDomain;
use super::mesh::{Bounds, SurfaceMesh, TriangleMesh};
use super::normals::{DifferenceScheme, NormalEstimate, check_epsilon, estimate_normal};
use super::surface::{ParametricSurface, SpiralSurface};
use crate::config::SurfaceConfig;
use crate::error::Result;

/// Vertices emitted per cell: two triangles, corners not shared.
pub const VERTICES_PER_CELL: usize = 6;

struct Corner {
    position: DVec3,
    normal: NormalEstimate,
}

/// Samples `surface` on the grid and triangulates every cell.
///
/// Each cell `[u0, u1] x [v0, v1]` yields the triangles
/// `(p00, p10, p01)` and `(p01, p10, p11)`, with normals taken from
/// [`estimate_normal`] at the same parameter pairs.
pub fn generate_with<S>(
    surface: &S,
    domain: &GridDomain,
    epsilon: f64,
    scheme: DifferenceScheme,
) -> Result<SurfaceMesh>
where
    S: ParametricSurface + ?Sized,
{
    let layout = domain.layout()?;
    check_epsilon(epsilon)?;
    log::debug!(
        "sampling {}x{} cells, step {}, u {:?}, v {:?}",
        layout.cells_u(),
        layout.cells_v(),
        domain.step,
        domain.u_range,
        domain.v_range
    );

    let corner = |u: f64, v: f64| Corner {
        position: surface.evaluate(u, v),
        normal: estimate_normal(surface, u, v, epsilon, scheme),
    };

    let mut mesh = TriangleMesh::with_capacity(layout.cell_count() * VERTICES_PER_CELL);
    let mut degenerate_normals = 0;

    for cell in layout.cells() {
        let p00 = corner(cell.u0, cell.v0);
        let p10 = corner(cell.u1, cell.v0);
        let p01 = corner(cell.u0, cell.v1);
        let p11 = corner(cell.u1, cell.v1);

        for c in [&p00, &p10, &p01, &p01, &p10, &p11] {
            if c.normal.is_degenerate() {
                degenerate_normals += 1;
            }
            mesh.push_vertex(c.position.as_vec3(), c.normal.vector().as_vec3());
        }
    }

    if degenerate_normals > 0 {
        log::warn!(
            "{} of {} vertices had a degenerate normal, substituted {:?}",
            degenerate_normals,
            mesh.vertex_count(),
            NormalEstimate::FALLBACK
        );
    }

    Ok(SurfaceMesh {
        bounds: Bounds::from_points(mesh.positions()),
        mesh,
        degenerate_normals,
        cells_u: layout.cells_u(),
        cells_v: layout.cells_v(),
    })
}

/// Builds the spiral surface mesh for one configuration snapshot.
pub fn generate(config: SurfaceConfig) -> Result<SurfaceMesh> {
    config.validate()?;
    let surface = SpiralSurface::new(config.constants);
    generate_with(&surface, &config.domain, config.epsilon, config.scheme)
}
