use std::sync::Arc;

use bevy::prelude::*;
use bevy_infinite_grid::{InfiniteGridBundle, InfiniteGridPlugin, InfiniteGridSettings};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use bevy_terrain_lut::{
    TerrainSurfacePlugin,
    colorscale::{Colorscale, DEFAULT_RESOLUTION},
    field::ScalarField,
    interp::lerp_rgb,
    lut::LookupImage,
    pipeline::TerrainConfig,
    sampler::SampleMode,
    surface::TerrainSurface,
    types::Axis,
};
use noiz::prelude::*;

const MAP_SIZE: usize = 256;
const WORLD_SIZE: f32 = 100.0;

/// Lookup images the demo cycles through with the space bar.
#[derive(Resource)]
struct Palettes {
    slope: Arc<LookupImage>,
    viridis: Arc<LookupImage>,
    two_axis: bool,
}

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            TerrainSurfacePlugin::default(),
            PanOrbitCameraPlugin,
            InfiniteGridPlugin,
        ))
        .add_systems(Startup, setup)
        .add_systems(Update, toggle_palette)
        .run();
}

fn setup(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    bevy::log::info!("Terrain LUT demo: press Space to switch palettes");

    commands.spawn(InfiniteGridBundle {
        settings: InfiniteGridSettings {
            fadeout_distance: 1000.0,
            ..Default::default()
        },
        ..Default::default()
    });

    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            ..default()
        },
        Transform::from_xyz(80., 70., 80.).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: light_consts::lux::FULL_DAYLIGHT,
            ..Default::default()
        },
        Transform::default().with_rotation(Quat::from_rotation_x(-45.0_f32.to_radians())),
    ));

    let palettes = Palettes {
        slope: Arc::new(slope_lut()),
        viridis: Arc::new(Colorscale::viridis().to_lut(DEFAULT_RESOLUTION, Axis::Elevation)),
        two_axis: true,
    };

    let config = TerrainConfig::default()
        .with_smoothing(3.0)
        .with_steepness_scale(150.0)
        .with_z_scale(0.25);

    commands.spawn((
        TerrainSurface::new(Arc::new(noise_heightmap()), Arc::clone(&palettes.slope))
            .with_config(config)
            .with_size(WORLD_SIZE),
        MeshMaterial3d(materials.add(StandardMaterial {
            perceptual_roughness: 0.9,
            ..Default::default()
        })),
    ));

    commands.insert_resource(palettes);
}

/// Fractal noise heightmap, stand-in for an eroded terrain export.
fn noise_heightmap() -> ScalarField {
    let mut noise = Noise::<
        LayeredNoise<
            Normed<f32>,
            Persistence,
            Octave<MixCellGradients<OrthoGrid, Smoothstep, QuickGradients>>,
        >,
    >::default();
    noise.set_frequency(0.02);

    let values = (0..MAP_SIZE * MAP_SIZE)
        .map(|i| {
            let (row, col) = (i / MAP_SIZE, i % MAP_SIZE);
            let h: f32 = noise.sample_for(Vec2::new(col as f32, row as f32));
            h
        })
        .collect();

    ScalarField::from_vec(MAP_SIZE, MAP_SIZE, values).expect("heightmap is MAP_SIZE x MAP_SIZE")
}

/// 64×64 table: grass to snow down the elevation rows, blended toward rock across the
/// steepness columns.
fn slope_lut() -> LookupImage {
    const N: usize = 64;
    let grass = [0.18, 0.45, 0.15];
    let snow = [0.95, 0.95, 0.97];
    let rock = [0.35, 0.32, 0.30];
    LookupImage::from_fn(N, N, |(row, col)| {
        let elevation = row as f32 / (N - 1) as f32;
        let steepness = col as f32 / (N - 1) as f32;
        let ground = lerp_rgb(grass, snow, elevation.powf(2.0));
        lerp_rgb(ground, rock, steepness.sqrt())
    })
}

fn toggle_palette(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut palettes: ResMut<Palettes>,
    mut query: Query<&mut TerrainSurface>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }
    palettes.two_axis = !palettes.two_axis;

    for mut surface in query.iter_mut() {
        if palettes.two_axis {
            surface.lut = Arc::clone(&palettes.slope);
            surface.config.mode = SampleMode::TwoAxis;
        } else {
            surface.lut = Arc::clone(&palettes.viridis);
            surface.config.mode = SampleMode::SingleAxis(Axis::Elevation);
        }
    }
}
