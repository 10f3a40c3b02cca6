use ndarray::Zip;
use tracing::debug;

use crate::{
    error::{Result, TerrainError},
    field::{ColorField, ScalarField, ensure_same_shape},
    interp::lut_index,
    lut::LookupImage,
    types::{Axis, Rgb, Value},
};

/// Which coordinates address the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// Row from elevation, column from scaled steepness.
    #[default]
    TwoAxis,
    /// Only one scalar drives the lookup; the other index stays at 0.
    SingleAxis(Axis),
}

/// Colors a grid by looking up `(elevation, steepness)` in a [`LookupImage`].
///
/// ```text
/// col = clamp(round(steepness * steepness_scale * (LW - 1)), 0, LW - 1)
/// row = clamp(round(elevation * (LH - 1)),                    0, LH - 1)
/// color = lut[row, col]
/// ```
///
/// Steepness is never clamped before lookup; the index clamp is the only bound, so an
/// amplified slope saturates at the last column.
#[derive(Debug, Clone, Copy)]
pub struct LutSampler<'a> {
    lut: &'a LookupImage,
    mode: SampleMode,
    steepness_scale: Value,
}

impl<'a> LutSampler<'a> {
    pub fn new(lut: &'a LookupImage) -> Self {
        Self {
            lut,
            mode: SampleMode::default(),
            steepness_scale: 1.0,
        }
    }

    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Multiplies steepness before it is mapped to a column.
    pub fn with_steepness_scale(mut self, steepness_scale: Value) -> Self {
        self.steepness_scale = steepness_scale;
        self
    }

    /// Returns the `(row, col)` texel for a single cell.
    ///
    /// # Panics
    /// Panics if the lookup image is empty; [`sample`](LutSampler::sample) checks this first.
    #[inline]
    pub fn texel_index(&self, elevation: Value, steepness: Value) -> (usize, usize) {
        let (lut_rows, lut_cols) = self.lut.shape();
        let row = || lut_index(elevation, lut_rows);
        let col = || lut_index(steepness * self.steepness_scale, lut_cols);
        match self.mode {
            SampleMode::TwoAxis => (row(), col()),
            SampleMode::SingleAxis(Axis::Elevation) => (row(), 0),
            SampleMode::SingleAxis(Axis::Steepness) => (0, col()),
        }
    }

    /// Looks up one color per cell of `field`.
    ///
    /// # Errors
    /// - [`TerrainError::InvalidLut`] if the lookup image has no rows or no columns.
    /// - [`TerrainError::ShapeMismatch`] if `field` and `steepness` differ in shape.
    pub fn sample(&self, field: &ScalarField, steepness: &ScalarField) -> Result<ColorField> {
        let (lut_rows, lut_cols) = self.lut.shape();
        if lut_rows == 0 || lut_cols == 0 {
            return Err(TerrainError::InvalidLut {
                rows: lut_rows,
                cols: lut_cols,
            });
        }
        ensure_same_shape(field.shape(), steepness.shape())?;

        debug!(
            rows = field.rows(),
            cols = field.cols(),
            lut_rows,
            lut_cols,
            mode = ?self.mode,
            steepness_scale = self.steepness_scale,
            "sampling lookup image"
        );

        let texels = self.lut.view();
        let colors = Zip::from(field.view())
            .and(steepness.view())
            .par_map_collect(|&elevation, &slope| -> Rgb {
                let (row, col) = self.texel_index(elevation, slope);
                texels[[row, col]]
            });

        Ok(ColorField::new(colors))
    }
}

/// Two-axis lookup of every cell in `field`.
///
/// Shorthand for `LutSampler::new(lut).with_steepness_scale(steepness_scale).sample(..)`.
pub fn sample(
    field: &ScalarField,
    steepness: &ScalarField,
    lut: &LookupImage,
    steepness_scale: Value,
) -> Result<ColorField> {
    LutSampler::new(lut)
        .with_steepness_scale(steepness_scale)
        .sample(field, steepness)
}
