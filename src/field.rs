use ndarray::{Array2, ArrayView2};

use crate::{
    error::{Result, TerrainError},
    types::{Rgb, Value},
};

/// A 2D grid of scalar values with shape `(rows, cols)`, both at least 1.
///
/// Used for raw elevation, normalized elevation and steepness.
/// Values are stored row-major as `values[[row, col]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    values: Array2<Value>,
}

impl ScalarField {
    /// Wraps an existing array.
    ///
    /// Returns [`TerrainError::EmptyField`] if either dimension is zero.
    pub fn new(values: Array2<Value>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows == 0 || cols == 0 {
            return Err(TerrainError::EmptyField);
        }
        Ok(Self { values })
    }

    /// Builds a field from row-major `values`.
    ///
    /// Returns [`TerrainError::Layout`] if `values.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<Value>) -> Result<Self> {
        Self::new(Array2::from_shape_vec((rows, cols), values)?)
    }

    /// Wraps an array derived cell-for-cell from an existing field.
    ///
    /// # Panics
    /// Panics (in debug) if either dimension is zero.
    pub(crate) fn from_same_shape(values: Array2<Value>) -> Self {
        debug_assert!(values.nrows() > 0 && values.ncols() > 0);
        Self { values }
    }

    /// Applies `f` to every cell, keeping the shape.
    pub fn map(&self, f: impl Fn(Value) -> Value) -> Self {
        Self::from_same_shape(self.values.mapv(f))
    }

    /// Builds a field where every cell equals `value`.
    pub fn constant(rows: usize, cols: usize, value: Value) -> Result<Self> {
        Self::new(Array2::from_elem((rows, cols), value))
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Value {
        self.values[[row, col]]
    }

    pub fn view(&self) -> ArrayView2<'_, Value> {
        self.values.view()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Smallest and largest value in the field.
    pub fn min_max(&self) -> (Value, Value) {
        self.values
            .iter()
            .fold((Value::INFINITY, Value::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Position of the first NaN or infinite cell, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.values
            .indexed_iter()
            .find(|(_, v)| !v.is_finite())
            .map(|(idx, _)| idx)
    }

    pub fn into_inner(self) -> Array2<Value> {
        self.values
    }
}

/// One [`Rgb`] color per elevation cell, shape `(rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorField {
    colors: Array2<Rgb>,
}

impl ColorField {
    pub fn new(colors: Array2<Rgb>) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.colors.dim()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.colors[[row, col]]
    }

    pub fn view(&self) -> ArrayView2<'_, Rgb> {
        self.colors.view()
    }

    pub fn into_inner(self) -> Array2<Rgb> {
        self.colors
    }
}

/// Returns [`TerrainError::ShapeMismatch`] unless both shapes agree.
pub(crate) fn ensure_same_shape(expected: (usize, usize), found: (usize, usize)) -> Result<()> {
    if expected != found {
        return Err(TerrainError::ShapeMismatch { expected, found });
    }
    Ok(())
}
