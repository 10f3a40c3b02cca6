use tracing::{debug, debug_span};

use crate::{
    error::Result,
    field::{ColorField, ScalarField},
    lut::LookupImage,
    mesh::{MeshVertexSet, build_mesh},
    normalize::normalize,
    sampler::{LutSampler, SampleMode},
    steepness::SteepnessEstimator,
    types::Value,
};

/// Every knob of a pipeline run.
///
/// ```rust,ignore
/// let config = TerrainConfig::default()
///     .with_smoothing(3.0)
///     .with_steepness_scale(150.0)
///     .with_z_scale(0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    /// Blur the raw elevation before normalizing.
    pub smooth: bool,
    /// Blur standard deviation, in cells. Read only when `smooth` is set.
    pub sigma: Value,
    pub steepness: SteepnessEstimator,
    /// Amplifies steepness before it selects a lookup column.
    pub steepness_scale: Value,
    /// Multiplies normalized elevation into mesh heights.
    pub z_scale: Value,
    pub mode: SampleMode,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            smooth: false,
            sigma: 1.0,
            steepness: SteepnessEstimator::default(),
            steepness_scale: 1.0,
            z_scale: 1.0,
            mode: SampleMode::TwoAxis,
        }
    }
}

impl TerrainConfig {
    /// Enables Gaussian pre-smoothing with standard deviation `sigma`.
    pub fn with_smoothing(mut self, sigma: Value) -> Self {
        self.smooth = true;
        self.sigma = sigma;
        self
    }

    pub fn with_steepness(mut self, steepness: SteepnessEstimator) -> Self {
        self.steepness = steepness;
        self
    }

    pub fn with_steepness_scale(mut self, steepness_scale: Value) -> Self {
        self.steepness_scale = steepness_scale;
        self
    }

    pub fn with_z_scale(mut self, z_scale: Value) -> Self {
        self.z_scale = z_scale;
        self
    }

    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSurfaceData {
    /// Elevation rescaled to `[0, 1]`.
    pub elevation: ScalarField,
    pub steepness: ScalarField,
    pub colors: ColorField,
    pub mesh: MeshVertexSet,
}

/// Runs normalize → steepness → lookup → mesh with a fixed [`TerrainConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainPipeline {
    pub config: TerrainConfig,
}

impl TerrainPipeline {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// Turns a raw heightmap and a lookup image into a colored vertex set.
    ///
    /// The first failing stage ends the run; its error is returned unchanged.
    pub fn run(&self, raw: &ScalarField, lut: &LookupImage) -> Result<TerrainSurfaceData> {
        let config = &self.config;
        let (rows, cols) = raw.shape();
        let _span = debug_span!("terrain_pipeline", rows, cols).entered();

        let elevation = normalize(raw, config.smooth, config.sigma)?;
        let steepness = config.steepness.estimate(&elevation)?;
        let colors = LutSampler::new(lut)
            .with_mode(config.mode)
            .with_steepness_scale(config.steepness_scale)
            .sample(&elevation, &steepness)?;
        let mesh = build_mesh(&elevation, &colors, config.z_scale)?;

        debug!(vertices = mesh.len(), "terrain pipeline finished");

        Ok(TerrainSurfaceData {
            elevation,
            steepness,
            colors,
            mesh,
        })
    }
}
