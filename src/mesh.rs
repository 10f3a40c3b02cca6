use tracing::debug;

use crate::{
    error::Result,
    field::{ColorField, ScalarField, ensure_same_shape},
    interp::linspace,
    types::{Rgb, Value, Vector},
};

/// Renderer-agnostic vertex data for a heightmap surface.
///
/// Four index-aligned, row-major sequences of length `rows × cols`: for each grid row
/// (y) every column (x) in turn.
///
/// ```text
///  i = row * cols + col
///  (x[i], y[i], z[i]) = (col / (cols-1), row / (rows-1), elevation[row, col] * z_scale)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshVertexSet {
    /// Grid rows (`H`).
    pub rows: usize,
    /// Grid columns (`W`).
    pub cols: usize,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    pub z: Vec<Value>,
    pub colors: Vec<Rgb>,
}

impl MeshVertexSet {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Zips the three coordinate sequences into `[x, y, z]` points.
    pub fn positions(&self) -> Vec<[Value; 3]> {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| [x, y, z])
            .collect()
    }

    /// Two triangles per grid quad, counter-clockwise seen from +z.
    ///
    /// ```text
    ///  i+cols ---- i+cols+1
    ///    |  \          |
    ///    |     \       |
    ///    i ---------- i+1
    ///
    ///  [i, i+1, i+cols], [i+1, i+cols+1, i+cols]
    /// ```
    ///
    /// Empty when the grid is a single row or column.
    pub fn triangle_indices(&self) -> Vec<u32> {
        if self.rows < 2 || self.cols < 2 {
            return Vec::new();
        }
        let cols = self.cols as u32;
        let mut indices = Vec::with_capacity((self.rows - 1) * (self.cols - 1) * 6);
        for r in 0..(self.rows as u32 - 1) {
            for c in 0..(cols - 1) {
                let i = r * cols + c;
                indices.extend_from_slice(&[i, i + 1, i + cols, i + 1, i + cols + 1, i + cols]);
            }
        }
        indices
    }

    /// Area-weighted per-vertex normals over [`triangle_indices`](MeshVertexSet::triangle_indices).
    ///
    /// Vertices touching no non-degenerate triangle get `[0, 0, 1]`.
    pub fn vertex_normals(&self) -> Vec<[Value; 3]> {
        let positions: Vec<Vector> = self
            .positions()
            .into_iter()
            .map(|[x, y, z]| Vector::new(x, y, z))
            .collect();
        let mut sums = vec![Vector::zeros(); positions.len()];

        for tri in self.triangle_indices().chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            // Unnormalized cross product: length is twice the triangle area.
            let face = (positions[b] - positions[a]).cross(&(positions[c] - positions[b]));
            sums[a] += face;
            sums[b] += face;
            sums[c] += face;
        }

        sums.into_iter()
            .map(|n| {
                let norm = n.norm();
                if norm == 0.0 {
                    [0.0, 0.0, 1.0]
                } else {
                    let n = n / norm;
                    [n.x, n.y, n.z]
                }
            })
            .collect()
    }
}

/// Flattens an elevation grid and its colors into [`MeshVertexSet`] sequences.
///
/// Returns [`TerrainError::ShapeMismatch`](crate::error::TerrainError::ShapeMismatch) if
/// `field` and `colors` differ in shape.
pub fn build_mesh(field: &ScalarField, colors: &ColorField, z_scale: Value) -> Result<MeshVertexSet> {
    ensure_same_shape(field.shape(), colors.shape())?;
    let (rows, cols) = field.shape();
    let xs = linspace(0.0, 1.0, cols);
    let ys = linspace(0.0, 1.0, rows);

    let count = rows * cols;
    let mut x = Vec::with_capacity(count);
    let mut y = Vec::with_capacity(count);
    for &yv in &ys {
        x.extend_from_slice(&xs);
        y.extend(std::iter::repeat_n(yv, cols));
    }

    // ndarray iterates in logical row-major order.
    let z: Vec<Value> = field.iter().map(|&v| v * z_scale).collect();
    let colors: Vec<Rgb> = colors.view().iter().copied().collect();

    debug!(rows, cols, vertices = count, z_scale, "built mesh vertex set");

    Ok(MeshVertexSet {
        rows,
        cols,
        x,
        y,
        z,
        colors,
    })
}
