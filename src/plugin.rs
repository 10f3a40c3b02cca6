use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
    tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future},
};

use crate::{
    error::Result,
    pipeline::TerrainPipeline,
    surface::{GeneratedSurface, TerrainSurface},
};

/// System sets for the terrain surface pipeline.
///
/// Use these to order your own systems relative to mesh generation:
///
/// ```rust,ignore
/// // Run after the buffers exist but before they're uploaded, e.g. for a heightfield collider:
/// app.add_systems(Update, build_collider.after(TerrainSurfaceSet::Generate)
///                                       .before(TerrainSurfaceSet::Upload));
/// ```
///
/// ```text
/// TerrainSurfaceSet::Spawn  →  [async compute]  →  TerrainSurfaceSet::Generate  →  [your systems]  →  TerrainSurfaceSet::Upload
/// ```
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerrainSurfaceSet {
    /// Spawns an async compute task for each queued surface.
    Spawn,
    /// Polls async tasks and inserts [`GeneratedSurface`] on completion.
    Generate,
    /// Uploads [`GeneratedSurface`] data into a Bevy [`Mesh3d`] and removes [`GeneratedSurface`].
    Upload,
}

/// Marker component added to [`TerrainSurface`] entities that are waiting to be processed.
///
/// Removed once the mesh has been uploaded, or once generation has failed.
#[derive(Component)]
pub struct QueuedSurface;

/// Holds the in-flight pipeline run for a [`TerrainSurface`].
#[derive(Component)]
pub struct ComputeTask(Task<Result<GeneratedSurface>>);

/// Runtime configuration for surface generation.
///
/// Inserted as a resource by [`TerrainSurfacePlugin`]. Modify it at any time:
///
/// ```rust,ignore
/// fn my_system(mut config: ResMut<TerrainSurfaceConfig>) {
///     config.max_tasks_per_frame = 1;
/// }
/// ```
#[derive(Resource)]
pub struct TerrainSurfaceConfig {
    /// Maximum number of async pipeline runs spawned per frame. Default: `4`.
    pub max_tasks_per_frame: usize,
}

impl Default for TerrainSurfaceConfig {
    fn default() -> Self {
        Self {
            max_tasks_per_frame: 4,
        }
    }
}

/// Bevy plugin that turns [`TerrainSurface`] components into vertex-colored meshes.
///
/// With the `auto_queue` feature, any added or modified [`TerrainSurface`] is processed on
/// Bevy's `AsyncComputeTaskPool`:
///
/// ```text
/// TerrainSurface added / changed
///   → QueuedSurface inserted        (queue_changed_surfaces)
///   → ComputeTask spawned           (TerrainSurfaceSet::Spawn)
///   → [normalize → steepness → lookup → mesh]
///   → GeneratedSurface inserted     (TerrainSurfaceSet::Generate)
///   → Mesh3d inserted               (TerrainSurfaceSet::Upload)
///   → QueuedSurface + GeneratedSurface removed
/// ```
///
/// The plugin only builds meshes. Pair each surface with a `MeshMaterial3d`; a default
/// [`StandardMaterial`] picks up the per-vertex colors.
pub struct TerrainSurfacePlugin {
    /// Initial value for [`TerrainSurfaceConfig::max_tasks_per_frame`].
    pub max_tasks_per_frame: usize,
}

impl Default for TerrainSurfacePlugin {
    fn default() -> Self {
        Self {
            max_tasks_per_frame: TerrainSurfaceConfig::default().max_tasks_per_frame,
        }
    }
}

impl Plugin for TerrainSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TerrainSurfaceConfig {
            max_tasks_per_frame: self.max_tasks_per_frame,
        });

        #[cfg(feature = "auto_queue")]
        app.configure_sets(
            Update,
            (
                TerrainSurfaceSet::Spawn,
                TerrainSurfaceSet::Generate,
                TerrainSurfaceSet::Upload,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                queue_changed_surfaces.before(TerrainSurfaceSet::Spawn),
                spawn_surface_tasks.in_set(TerrainSurfaceSet::Spawn),
                poll_surface_tasks.in_set(TerrainSurfaceSet::Generate),
                upload_surface.in_set(TerrainSurfaceSet::Upload),
            ),
        );
    }
}

/// Inserts [`QueuedSurface`] on every added or modified [`TerrainSurface`].
///
/// A surface edited mid-generation drops its stale [`ComputeTask`] (which cancels it) and any
/// [`GeneratedSurface`] still waiting for upload, so the next spawn uses the new data.
fn queue_changed_surfaces(
    mut commands: Commands,
    query: Query<Entity, Changed<TerrainSurface>>,
) {
    for entity in query.iter() {
        commands
            .entity(entity)
            .remove::<(ComputeTask, GeneratedSurface)>()
            .insert(QueuedSurface);
    }
}

/// Spawns pipeline runs for [`QueuedSurface`]s, up to [`TerrainSurfaceConfig::max_tasks_per_frame`] per frame.
fn spawn_surface_tasks(
    mut commands: Commands,
    config: Res<TerrainSurfaceConfig>,
    query: Query<(Entity, &TerrainSurface), (With<QueuedSurface>, Without<ComputeTask>)>,
) {
    let task_pool = AsyncComputeTaskPool::get();

    for (entity, surface) in query.iter().take(config.max_tasks_per_frame) {
        // Cloning bumps the two Arcs; the grids themselves stay shared.
        let surface = surface.clone();

        let task = task_pool.spawn(async move {
            TerrainPipeline::new(surface.config)
                .run(&surface.elevation, &surface.lut)
                .map(|data| GeneratedSurface::from_data(&data, surface.size))
        });

        commands.entity(entity).insert(ComputeTask(task));
    }
}

/// Polls in-flight [`ComputeTask`]s and inserts [`GeneratedSurface`] on success.
///
/// Non-blocking: unfinished tasks are retried next frame. A failed run is logged and the
/// surface is dequeued; it is retried only when the [`TerrainSurface`] changes again.
fn poll_surface_tasks(mut commands: Commands, mut query: Query<(Entity, &mut ComputeTask)>) {
    for (entity, mut compute_task) in query.iter_mut() {
        let Some(result) = block_on(future::poll_once(&mut compute_task.0)) else {
            continue;
        };

        let mut entity_commands = commands.entity(entity);
        entity_commands.remove::<ComputeTask>();
        match result {
            Ok(generated) => {
                entity_commands.insert(generated);
            }
            Err(err) => {
                warn!("terrain surface {entity} failed to generate: {err}");
                entity_commands.remove::<QueuedSurface>();
            }
        }
    }
}

/// Uploads a [`GeneratedSurface`] into a Bevy [`Mesh3d`], then removes it and [`QueuedSurface`].
fn upload_surface(
    mut commands: Commands,
    query: Query<(Entity, &GeneratedSurface), With<QueuedSurface>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for (entity, generated) in query.iter() {
        let mut bevy_mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        );

        bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, generated.positions.clone());
        bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, generated.normals.clone());
        bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, generated.colors.clone());
        bevy_mesh.insert_indices(Indices::U32(generated.indices.clone()));

        commands
            .entity(entity)
            .insert(Mesh3d(meshes.add(bevy_mesh)))
            .remove::<(GeneratedSurface, QueuedSurface)>();
    }
}
