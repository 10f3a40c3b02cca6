use tracing::debug;

use crate::{
    blur::GaussianBlur,
    error::{Result, TerrainError},
    field::ScalarField,
    types::Value,
};

/// Rescales `field` to `[0, 1]`, optionally blurring it first.
///
/// ```text
/// smooth == true:  field → GaussianBlur(sigma) → (v - min) / (max - min)
/// smooth == false: field →                       (v - min) / (max - min)
/// ```
///
/// `sigma` is only read when `smooth` is set.
///
/// # Errors
/// - [`TerrainError::NonFiniteValue`] if the input holds NaN or infinity.
/// - [`TerrainError::InvalidSigma`] if smoothing with a sigma outside `(0, MAX_SIGMA]`
///   (see [`crate::blur::MAX_SIGMA`]).
/// - [`TerrainError::DegenerateField`] if every (smoothed) cell has the same value.
pub fn normalize(field: &ScalarField, smooth: bool, sigma: Value) -> Result<ScalarField> {
    if let Some((row, col)) = field.first_non_finite() {
        return Err(TerrainError::NonFiniteValue { row, col });
    }

    let smoothed;
    let source = if smooth {
        smoothed = GaussianBlur::new(sigma)?.apply(field)?;
        &smoothed
    } else {
        field
    };

    rescale_unit(source)
}

/// Min-max rescale into `[0, 1]` without smoothing.
///
/// The span is taken in `f64`: `max - min` of two finite `f32`s can overflow to infinity.
pub(crate) fn rescale_unit(field: &ScalarField) -> Result<ScalarField> {
    let (lo, hi) = field.min_max();
    if hi == lo {
        return Err(TerrainError::DegenerateField { value: lo });
    }
    debug!(rows = field.rows(), cols = field.cols(), lo, hi, "normalizing field");

    let (lo, span) = (f64::from(lo), f64::from(hi) - f64::from(lo));
    Ok(field.map(|v| ((f64::from(v) - lo) / span) as Value))
}
