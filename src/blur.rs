use ndarray::Array2;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    error::{Result, TerrainError},
    field::ScalarField,
    types::Value,
};

/// The kernel extends this many standard deviations on each side of the center tap.
pub const TRUNCATE: Value = 4.0;

/// Largest accepted standard deviation; the kernel then has `2 * 16384 + 1` taps.
pub const MAX_SIGMA: Value = 4096.0;

/// How samples beyond the grid edge are produced.
///
/// ```text
///  Nearest:  a a a | a b c d | d d d
///  Reflect:  c b a | a b c d | d c b
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    #[default]
    Nearest,
    Reflect,
}

impl Boundary {
    /// Resolves a possibly out-of-range index `i` on an axis of length `len`.
    #[inline]
    fn resolve(self, i: isize, len: usize) -> usize {
        let n = len as isize;
        match self {
            Boundary::Nearest => i.clamp(0, n - 1) as usize,
            Boundary::Reflect => {
                // Half-sample symmetric reflection has period 2n.
                let period = 2 * n;
                let m = i.rem_euclid(period);
                if m < n { m as usize } else { (period - 1 - m) as usize }
            }
        }
    }
}

/// Isotropic Gaussian blur applied as two separable 1D passes (rows, then columns).
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBlur {
    sigma: Value,
    boundary: Boundary,
    weights: Vec<Value>,
}

impl GaussianBlur {
    /// Builds the normalized kernel for standard deviation `sigma`.
    ///
    /// Returns [`TerrainError::InvalidSigma`] unless `sigma` is in `(0, MAX_SIGMA]`.
    pub fn new(sigma: Value) -> Result<Self> {
        if sigma.is_nan() || sigma <= 0.0 || sigma > MAX_SIGMA {
            return Err(TerrainError::InvalidSigma { sigma });
        }
        Ok(Self {
            sigma,
            boundary: Boundary::default(),
            weights: gaussian_weights(sigma),
        })
    }

    /// Sets the edge-extension policy.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn sigma(&self) -> Value {
        self.sigma
    }

    /// Number of taps on each side of the center.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Normalized kernel weights, length `2 * radius + 1`.
    pub fn weights(&self) -> &[Value] {
        &self.weights
    }

    /// Returns a blurred copy of `field`.
    pub fn apply(&self, field: &ScalarField) -> Result<ScalarField> {
        let (rows, cols) = field.shape();
        let src = field.view();
        let radius = self.radius() as isize;

        // Horizontal pass, parallel over rows.
        let horizontal: Vec<Value> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|r| {
                let src = &src;
                (0..cols).map(move |c| {
                    self.weights
                        .iter()
                        .enumerate()
                        .map(|(k, w)| {
                            let cc = self.boundary.resolve(c as isize + k as isize - radius, cols);
                            w * src[[r, cc]]
                        })
                        .sum::<Value>()
                })
            })
            .collect();
        let horizontal = Array2::from_shape_vec((rows, cols), horizontal)?;

        // Vertical pass, parallel over rows of the output.
        let vertical: Vec<Value> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|r| {
                let horizontal = &horizontal;
                (0..cols).map(move |c| {
                    self.weights
                        .iter()
                        .enumerate()
                        .map(|(k, w)| {
                            let rr = self.boundary.resolve(r as isize + k as isize - radius, rows);
                            w * horizontal[[rr, c]]
                        })
                        .sum::<Value>()
                })
            })
            .collect();

        ScalarField::from_vec(rows, cols, vertical)
    }
}

/// Computes `exp(-i² / 2σ²)` for `i` in `[-radius, radius]`, normalized to sum to 1.
///
/// `radius = round(TRUNCATE * sigma)`.
fn gaussian_weights(sigma: Value) -> Vec<Value> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let raw: Vec<Value> = (-radius..=radius)
        .map(|i| (-((i * i) as Value) / two_sigma_sq).exp())
        .collect();
    let sum: Value = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}
