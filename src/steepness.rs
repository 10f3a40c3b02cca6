use ndarray::{ArrayView2, Zip};
use tracing::debug;

use crate::{
    blur::GaussianBlur,
    error::Result,
    field::ScalarField,
    normalize::rescale_unit,
    types::Value,
};

/// Largest gradient magnitude of a `[0, 1]` field when both per-axis differences are 1.
pub const THEORETICAL_MAX_GRADIENT: Value = std::f32::consts::SQRT_2;

/// How the raw gradient magnitude is brought into a `[0, 1]`-ish range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteepnessNormalization {
    /// Divide by [`THEORETICAL_MAX_GRADIENT`]. Results are not clamped and may exceed 1.
    #[default]
    TheoreticalMax,
    /// Rescale by the field's own min and max gradient. A flat field gives all zeros.
    MinMax,
}

/// Configurable steepness estimation.
///
/// The default divides by `√2` with no smoothing, which is what [`compute_steepness`] does.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteepnessEstimator {
    pub normalization: SteepnessNormalization,
    /// Sigma of an optional Gaussian blur applied to the normalized steepness.
    pub smoothing: Option<Value>,
}

impl SteepnessEstimator {
    pub fn with_normalization(mut self, normalization: SteepnessNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Blurs the steepness field with `sigma` after normalization.
    pub fn with_smoothing(mut self, sigma: Value) -> Self {
        self.smoothing = Some(sigma);
        self
    }

    /// Computes the steepness field of an elevation field already normalized to `[0, 1]`.
    pub fn estimate(&self, field: &ScalarField) -> Result<ScalarField> {
        let magnitude = gradient_magnitude(field);

        let normalized = match self.normalization {
            SteepnessNormalization::TheoreticalMax => magnitude.map(|m| m / THEORETICAL_MAX_GRADIENT),
            SteepnessNormalization::MinMax => {
                let (lo, hi) = magnitude.min_max();
                if hi == lo {
                    magnitude.map(|_| 0.0)
                } else {
                    rescale_unit(&magnitude)?
                }
            }
        };

        let steepness = match self.smoothing {
            Some(sigma) => GaussianBlur::new(sigma)?.apply(&normalized)?,
            None => normalized,
        };

        let (lo, hi) = steepness.min_max();
        debug!(
            rows = field.rows(),
            cols = field.cols(),
            lo,
            hi,
            normalization = ?self.normalization,
            "computed steepness"
        );
        Ok(steepness)
    }
}

/// Per-cell gradient magnitude divided by `√2`.
///
/// Central differences in the interior, one-sided differences on the boundary rows and
/// columns. An axis of length 1 contributes no gradient. Values are not clamped.
pub fn compute_steepness(field: &ScalarField) -> ScalarField {
    gradient_magnitude(field).map(|m| m / THEORETICAL_MAX_GRADIENT)
}

/// Returns the raw gradient magnitude `sqrt(gx² + gy²)` of every cell.
///
/// Cells are independent, so the work is spread over the rayon pool.
pub fn gradient_magnitude(field: &ScalarField) -> ScalarField {
    let view = field.view();
    let values = Zip::indexed(view).par_map_collect(|(r, c), _| cell_magnitude(&view, r, c));
    ScalarField::from_same_shape(values)
}

/// Returns `(d/dx, d/dy)` at `(row, col)`, where x runs along columns and y along rows.
pub fn gradient_at(field: &ScalarField, row: usize, col: usize) -> (Value, Value) {
    let view = field.view();
    (
        axis_difference(|i| view[[row, i]], col, field.cols()),
        axis_difference(|i| view[[i, col]], row, field.rows()),
    )
}

#[inline]
fn cell_magnitude(view: &ArrayView2<'_, Value>, r: usize, c: usize) -> Value {
    let (rows, cols) = view.dim();
    let gx = axis_difference(|i| view[[r, i]], c, cols);
    let gy = axis_difference(|i| view[[i, c]], r, rows);
    gx.hypot(gy)
}

/// Unit-spacing finite difference at index `i` of an axis with `len` samples.
///
/// ```text
/// i == 0        : f[1] - f[0]
/// i == len - 1  : f[len-1] - f[len-2]
/// otherwise     : (f[i+1] - f[i-1]) / 2
/// ```
#[inline]
fn axis_difference(f: impl Fn(usize) -> Value, i: usize, len: usize) -> Value {
    if len < 2 {
        0.0
    } else if i == 0 {
        f(1) - f(0)
    } else if i == len - 1 {
        f(i) - f(i - 1)
    } else {
        (f(i + 1) - f(i - 1)) / 2.0
    }
}
