use ndarray::{Array2, ArrayView2};

use crate::{
    error::{Result, TerrainError},
    types::{Rgb, Value},
};

/// An RGB image used as a 2D color table.
///
/// ```text
///            steepness →
///          col 0 ........ col LW-1
///  row 0     +-------------+
///  elev ↓    |             |
///  row LH-1  +-------------+
/// ```
///
/// An empty image can be constructed; [`LutSampler`](crate::sampler::LutSampler) rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupImage {
    texels: Array2<Rgb>,
}

impl LookupImage {
    pub fn new(texels: Array2<Rgb>) -> Self {
        Self { texels }
    }

    /// Builds an image from packed 8-bit RGB rows, top row first.
    ///
    /// Channels are scaled from `0..=255` to `[0, 1]`.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        Self::from_packed(width, height, bytes, 3)
    }

    /// Like [`from_rgb8`](LookupImage::from_rgb8) for RGBA data. Alpha is dropped.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        Self::from_packed(width, height, bytes, 4)
    }

    fn from_packed(width: usize, height: usize, bytes: &[u8], stride: usize) -> Result<Self> {
        if bytes.len() != width * height * stride {
            return Err(TerrainError::ShapeMismatch {
                expected: (height, width * stride),
                found: (height, bytes.len() / height.max(1)),
            });
        }
        let texels: Vec<Rgb> = bytes
            .chunks_exact(stride)
            .map(|px| {
                [
                    px[0] as Value / 255.0,
                    px[1] as Value / 255.0,
                    px[2] as Value / 255.0,
                ]
            })
            .collect();
        Ok(Self::new(Array2::from_shape_vec((height, width), texels)?))
    }

    /// Builds an image by evaluating `f(row, col)` for every texel.
    pub fn from_fn(rows: usize, cols: usize, f: impl FnMut((usize, usize)) -> Rgb) -> Self {
        Self::new(Array2::from_shape_fn((rows, cols), f))
    }

    /// Returns `(LH, LW)`: rows follow elevation, columns follow steepness.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.texels.dim()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.texels[[row, col]]
    }

    pub fn view(&self) -> ArrayView2<'_, Rgb> {
        self.texels.view()
    }
}
