use std::sync::Arc;

use bevy::prelude::*;

use crate::{
    field::ScalarField,
    lut::LookupImage,
    pipeline::{TerrainConfig, TerrainSurfaceData},
    types::Value,
};

/// A heightmap waiting to be turned into a vertex-colored Bevy mesh.
///
/// The parametric `[0, 1] × [0, 1]` grid is centered on the entity origin in the XZ plane
/// and scaled by [`size`](TerrainSurface::size); normalized elevation times
/// [`TerrainConfig::z_scale`] becomes height along +Y, scaled by the same factor.
///
/// `elevation` and `lut` are wrapped in [`Arc`] so the async generation task can hold them
/// without copying, and several surfaces can share one lookup image.
#[derive(Component, Clone)]
#[require(Transform)]
pub struct TerrainSurface {
    /// Raw, un-normalized elevation.
    pub elevation: Arc<ScalarField>,
    pub lut: Arc<LookupImage>,
    pub config: TerrainConfig,
    /// World-space edge length of the surface.
    pub size: Value,
}

impl TerrainSurface {
    pub fn new(elevation: Arc<ScalarField>, lut: Arc<LookupImage>) -> Self {
        Self {
            elevation,
            lut,
            config: TerrainConfig::default(),
            size: 1.,
        }
    }

    pub fn with_config(mut self, config: TerrainConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the world-space edge length.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Mesh buffers produced from a [`TerrainSurface`], already in Bevy's Y-up frame.
///
/// Inserted by [`TerrainSurfaceSet::Generate`](crate::plugin::TerrainSurfaceSet::Generate)
/// and consumed by [`TerrainSurfaceSet::Upload`](crate::plugin::TerrainSurfaceSet::Upload).
/// Systems ordered between the two can read it, e.g. to build a heightfield collider.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct GeneratedSurface {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl GeneratedSurface {
    /// Converts pipeline output into Y-up mesh buffers.
    ///
    /// ```text
    ///  pipeline (x, y, z)  →  bevy ((x - 0.5) * size, z * size, (y - 0.5) * size)
    /// ```
    ///
    /// Swapping y and z mirrors the mesh, so each triangle's winding is reversed to keep
    /// the front faces pointing up.
    pub fn from_data(data: &TerrainSurfaceData, size: Value) -> Self {
        let mesh = &data.mesh;

        let positions = mesh
            .positions()
            .into_iter()
            .map(|[x, y, z]| [(x - 0.5) * size, z * size, (y - 0.5) * size])
            .collect();

        let normals = mesh
            .vertex_normals()
            .into_iter()
            .map(|[nx, ny, nz]| [nx, nz, ny])
            .collect();

        let colors = mesh.colors.iter().map(|&[r, g, b]| [r, g, b, 1.0]).collect();

        let mut indices = mesh.triangle_indices();
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }

        Self {
            positions,
            normals,
            colors,
            indices,
        }
    }
}
