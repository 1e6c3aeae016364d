//! Regular quad-grid tessellation.
//!
//! The same builder produces both surfaces the renderer draws: the terrain
//! (a dense grid displaced by a heightmap in the vertex shader) and the
//! water plane (the degenerate 2x2 case, a single quad).

use crate::{Error, Result};

/// A regular triangulated grid over the unit square.
///
/// Vertices are row-major 2D positions in [0,1]²; each cell is split into
/// two counter-clockwise triangles. Built once per resolution and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    rows: u32,
    cols: u32,
    vertices: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl GridMesh {
    /// Build a `rows` x `cols` grid.
    ///
    /// Deterministic: the same resolution always yields identical vertex and
    /// index sequences. Fails only when either dimension is below 2.
    pub fn build(rows: u32, cols: u32) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(Error::InvalidResolution { rows, cols });
        }

        let mut vertices = Vec::with_capacity((rows * cols) as usize);
        for j in 0..rows {
            for i in 0..cols {
                vertices.push([
                    i as f32 / (cols - 1) as f32,
                    j as f32 / (rows - 1) as f32,
                ]);
            }
        }

        let mut indices = Vec::with_capacity((6 * (rows - 1) * (cols - 1)) as usize);
        for j in 0..rows - 1 {
            for i in 0..cols - 1 {
                let i0 = i + j * cols;
                let i1 = (i + 1) + j * cols;
                let i2 = i + (j + 1) * cols;
                let i3 = (i + 1) + (j + 1) * cols;

                indices.extend_from_slice(&[i0, i1, i2]);
                indices.extend_from_slice(&[i2, i1, i3]);
            }
        }

        Ok(Self { rows, cols, vertices, indices })
    }

    /// The single-quad grid used for the water surface.
    pub fn unit_quad() -> Self {
        // 2x2 cannot fail the resolution check.
        Self::build(2, 2).unwrap()
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn vertices(&self) -> &[[f32; 2]] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_z(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
        (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
    }

    #[test]
    fn counts_match_resolution() {
        for (rows, cols) in [(2u32, 2u32), (2, 7), (5, 3), (100, 100)] {
            let mesh = GridMesh::build(rows, cols).unwrap();
            assert_eq!(mesh.vertex_count(), (rows * cols) as usize);
            assert_eq!(mesh.index_count(), (6 * (rows - 1) * (cols - 1)) as usize);
        }
    }

    #[test]
    fn indices_in_bounds() {
        let mesh = GridMesh::build(9, 4).unwrap();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < n));
    }

    #[test]
    fn deterministic() {
        let a = GridMesh::build(17, 23).unwrap();
        let b = GridMesh::build(17, 23).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unit_quad_is_two_triangles_over_the_corners() {
        let mesh = GridMesh::unit_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices().len(), 6);
        assert_eq!(
            mesh.vertices(),
            &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
        );
    }

    #[test]
    fn vertices_cover_unit_square_row_major() {
        let mesh = GridMesh::build(3, 3).unwrap();
        assert_eq!(mesh.vertices()[0], [0.0, 0.0]);
        assert_eq!(mesh.vertices()[2], [1.0, 0.0]);
        assert_eq!(mesh.vertices()[4], [0.5, 0.5]);
        assert_eq!(mesh.vertices()[8], [1.0, 1.0]);
    }

    #[test]
    fn winding_is_uniform_and_non_degenerate() {
        let mesh = GridMesh::build(12, 8).unwrap();
        let verts = mesh.vertices();
        let mut reference_sign = 0.0f32;
        for tri in mesh.indices().chunks_exact(3) {
            let z = cross_z(
                verts[tri[0] as usize],
                verts[tri[1] as usize],
                verts[tri[2] as usize],
            );
            assert!(z != 0.0, "collinear triangle {:?}", tri);
            if reference_sign == 0.0 {
                reference_sign = z.signum();
            }
            assert_eq!(z.signum(), reference_sign, "inconsistent winding {:?}", tri);
        }
    }

    #[test]
    fn rejects_degenerate_resolutions() {
        for (rows, cols) in [(0u32, 0u32), (1, 10), (10, 1), (1, 1)] {
            assert!(matches!(
                GridMesh::build(rows, cols),
                Err(Error::InvalidResolution { .. })
            ));
        }
    }
}
