use std::collections::HashMap;

use glam::Vec3;

/// Non-indexed triangle list: every three consecutive vertices form one
/// triangle, and `normals` is parallel to `vertices` entry for entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
        }
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.vertices.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.chunks_exact(3).map(Vec3::from_slice)
    }

    pub fn normal_vectors(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.normals.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Position buffer as raw bytes, ready for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Welds vertices whose position and normal are bit-identical.
    ///
    /// Corners shared by neighbouring cells are evaluated at the same
    /// parameters, so they collapse; the non-indexed buffers are untouched.
    pub fn to_indexed(&self) -> IndexedMesh {
        let mut lookup: HashMap<([u32; 3], [u32; 3]), u32> = HashMap::new();
        let mut out = IndexedMesh::default();

        for (position, normal) in self.positions().zip(self.normal_vectors()) {
            let key = (
                position.to_array().map(f32::to_bits),
                normal.to_array().map(f32::to_bits),
            );
            let next = out.vertex_count() as u32;
            let index = *lookup.entry(key).or_insert_with(|| {
                out.vertices.extend_from_slice(&position.to_array());
                out.normals.extend_from_slice(&normal.to_array());
                next
            });
            out.indices.push(index);
        }

        out
    }
}

/// Shared-vertex form of a [`TriangleMesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Axis-aligned box around a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            Self {
                min: first,
                max: first,
            },
            |b, p| Self {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        ))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A generated surface together with what the generator learned about it.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub mesh: TriangleMesh,
    pub bounds: Option<Bounds>,
    /// Vertices whose normal fell back to the zero vector.
    pub degenerate_normals: usize,
    pub cells_u: usize,
    pub cells_v: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        let up = Vec3::Z;
        for p in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ] {
            mesh.push_vertex(p, up);
        }
        mesh
    }

    #[test]
    fn counts_follow_flat_buffers() {
        let mesh = quad();
        assert_eq!(mesh.vertices.len(), 18);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_bytes().len(), 18 * 4);
        assert_eq!(mesh.normal_bytes().len(), mesh.vertex_bytes().len());
    }

    #[test]
    fn indexing_welds_shared_corners() {
        let mesh = quad();
        let indexed = mesh.to_indexed();
        assert_eq!(indexed.vertex_count(), 4);
        assert_eq!(indexed.indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(indexed.triangle_count(), mesh.triangle_count());
        assert_eq!(indexed.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn indexing_keeps_split_normals_apart() {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ONE, Vec3::X);
        mesh.push_vertex(Vec3::ONE, Vec3::Y);
        mesh.push_vertex(Vec3::ONE, Vec3::X);
        let indexed = mesh.to_indexed();
        assert_eq!(indexed.vertex_count(), 2);
        assert_eq!(indexed.indices, vec![0, 1, 0]);
    }

    #[test]
    fn bounds_cover_all_points() {
        let bounds = Bounds::from_points(quad().positions()).unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(bounds.center(), Vec3::new(0.5, 0.5, 0.0));
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }
}
