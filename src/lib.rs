pub mod blur;
pub mod colorscale;
pub mod error;
pub mod field;
pub mod interp;
pub mod loader;
pub mod lut;
pub mod mesh;
pub mod normalize;
pub mod pipeline;
pub mod sampler;
pub mod steepness;
pub mod types;

#[cfg(feature = "bevy")]
pub mod plugin;
#[cfg(feature = "bevy")]
pub mod surface;

pub use mesh::build_mesh;
pub use normalize::normalize;
pub use sampler::sample;
pub use steepness::compute_steepness;

#[cfg(feature = "bevy")]
pub use plugin::TerrainSurfacePlugin;
