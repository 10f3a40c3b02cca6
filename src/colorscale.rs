//! Piecewise-linear colorscales that can be baked into a one-row or one-column
//! [`LookupImage`], so single-axis coloring goes through the same sampler as the
//! two-axis table.

use crate::{
    error::{Result, TerrainError},
    interp::{lerp_rgb, linspace, remap},
    lut::LookupImage,
    types::{Axis, Rgb, Value},
};

/// Texel count of a baked colorscale; one texel per 8-bit level.
pub const DEFAULT_RESOLUTION: usize = 256;

/// A color pinned at a position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: Value,
    pub rgb: Rgb,
}

impl ColorStop {
    pub fn new(position: Value, rgb: Rgb) -> Self {
        Self { position, rgb }
    }

    /// Builds a stop from 8-bit channels.
    pub fn rgb8(position: Value, r: u8, g: u8, b: u8) -> Self {
        Self::new(position, [r as Value / 255.0, g as Value / 255.0, b as Value / 255.0])
    }
}

/// Ordered color stops spanning `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorscale {
    stops: Vec<ColorStop>,
}

impl Colorscale {
    /// Validates and wraps `stops`.
    ///
    /// Requires at least two stops with finite, non-decreasing positions that start at 0 and
    /// end at 1.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        let invalid = |reason: &'static str| Err(TerrainError::InvalidColorscale { reason });
        if stops.len() < 2 {
            return invalid("at least two stops are required");
        }
        if stops.iter().any(|s| !s.position.is_finite()) {
            return invalid("stop positions must be finite");
        }
        if stops.windows(2).any(|w| w[1].position < w[0].position) {
            return invalid("stop positions must be non-decreasing");
        }
        if stops[0].position != 0.0 || stops[stops.len() - 1].position != 1.0 {
            return invalid("stops must start at 0 and end at 1");
        }
        Ok(Self { stops })
    }

    /// Perceptually uniform scale used for plain elevation coloring.
    pub fn viridis() -> Self {
        const HEX: [(u8, u8, u8); 10] = [
            (0x44, 0x01, 0x54),
            (0x48, 0x28, 0x78),
            (0x3e, 0x49, 0x89),
            (0x31, 0x68, 0x8e),
            (0x26, 0x82, 0x8e),
            (0x1f, 0x9e, 0x89),
            (0x35, 0xb7, 0x79),
            (0x6e, 0xce, 0x58),
            (0xb5, 0xde, 0x2b),
            (0xfd, 0xe7, 0x25),
        ];
        let positions = linspace(0.0, 1.0, HEX.len());
        let stops = HEX
            .iter()
            .zip(positions)
            .map(|(&(r, g, b), p)| ColorStop::rgb8(p, r, g, b))
            .collect();
        Self { stops }
    }

    /// Green on gentle ground, brown on moderate slopes, slate grey from 0.3 upward.
    pub fn slope() -> Self {
        Self {
            stops: vec![
                ColorStop::rgb8(0.0, 15, 150, 50),
                ColorStop::rgb8(0.1, 100, 60, 50),
                ColorStop::rgb8(0.3, 50, 50, 60),
                ColorStop::rgb8(1.0, 50, 50, 60),
            ],
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at `t`, clamped into `[0, 1]`. NaN maps to the first stop.
    pub fn sample(&self, t: Value) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        // First stop strictly past t; t == 1 falls through to the last stop.
        let upper = self.stops.iter().position(|s| s.position > t);
        match upper {
            None => self.stops[self.stops.len() - 1].rgb,
            Some(0) => self.stops[0].rgb,
            Some(i) => {
                let (a, b) = (self.stops[i - 1], self.stops[i]);
                let f = remap(t, [a.position, b.position], [0.0, 1.0]);
                lerp_rgb(a.rgb, b.rgb, f)
            }
        }
    }

    /// Bakes the scale into a lookup image laid out along `axis`.
    ///
    /// `Axis::Elevation` gives `resolution` rows and one column, `Axis::Steepness` one row
    /// and `resolution` columns. Resolutions below 2 are raised to 2.
    pub fn to_lut(&self, resolution: usize, axis: Axis) -> LookupImage {
        let resolution = resolution.max(2);
        let colors: Vec<Rgb> = linspace(0.0, 1.0, resolution)
            .into_iter()
            .map(|t| self.sample(t))
            .collect();
        match axis {
            Axis::Elevation => LookupImage::from_fn(resolution, 1, |(r, _)| colors[r]),
            Axis::Steepness => LookupImage::from_fn(1, resolution, |(_, c)| colors[c]),
        }
    }
}
