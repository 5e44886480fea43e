use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::configuration::config::VisualizationConfig;
use crate::simulation::states::Trajectory;

pub const TITLE: &str = "2-body system using RK4 Integration";

/// Window side length in logical pixels
const WINDOW_PX: f32 = 1000.0;

/// Fraction of the half-window the orbit is fitted into
const FILL: f32 = 0.9;

/// Radii of the fallback circles when no image is configured
const CENTRAL_RADIUS_PX: f32 = 24.0;
const BODY_RADIUS_PX: f32 = 6.0;

#[derive(Component)]
struct CentralBody;

#[derive(Component)]
struct OrbitingBody;

/// Finished trajectory in screen space plus the animation cursor
#[derive(Resource)]
struct OrbitPlayback {
    points: Vec<Vec2>,
    frame: usize,
    timer: Timer,
}

#[derive(Resource)]
struct ViewerSettings(VisualizationConfig);

/// Open a window with the static orbit and the body animated along it,
/// one sample per `frame_interval_ms`, looping
pub fn run_orbit_2d(trajectory: &Trajectory, settings: &VisualizationConfig) {
    if trajectory.is_empty() {
        println!("run_orbit_2d: empty trajectory, nothing to show");
        return;
    }
    println!("run_orbit_2d: starting Bevy 2D viewer with {} samples", trajectory.len());

    let scale = fit_scale(trajectory, FILL * WINDOW_PX * 0.5);
    let interval = Duration::from_millis(settings.frame_interval_ms.max(1));

    let playback = OrbitPlayback {
        points: to_screen(trajectory, scale),
        frame: 0,
        timer: Timer::new(interval, TimerMode::Repeating),
    };

    App::new()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(playback)
        .insert_resource(ViewerSettings(settings.clone()))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: TITLE.into(),
                        resolution: (WINDOW_PX, WINDOW_PX).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: settings.assets_dir.to_string_lossy().into_owned(),
                    ..default()
                }),
        )
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (advance_frame, sync_orbiting_body, draw_orbit).chain())
        .run();
}

/// Metres -> pixels factor that fits every sample inside `half_extent_px`
pub fn fit_scale(trajectory: &Trajectory, half_extent_px: f32) -> f32 {
    let extent = trajectory
        .iter()
        .map(|s| s.x.abs().max(s.y.abs()))
        .fold(0.0_f64, f64::max);

    if extent > 0.0 && extent.is_finite() {
        (half_extent_px as f64 / extent) as f32
    } else {
        1.0
    }
}

pub fn to_screen(trajectory: &Trajectory, scale: f32) -> Vec<Vec2> {
    trajectory
        .iter()
        .map(|s| Vec2::new(s.x as f32 * scale, s.y as f32 * scale))
        .collect()
}

fn setup_scene(
    mut commands: Commands,
    playback: Res<OrbitPlayback>,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let cfg = &settings.0;
    let start = playback.points.first().copied().unwrap_or(Vec2::ZERO);

    // central body, fixed at the origin
    let origin = Transform::from_xyz(0.0, 0.0, 1.0);
    match &cfg.central_image {
        Some(name) => {
            commands.spawn((
                SpriteBundle {
                    texture: asset_server.load(name.clone()),
                    transform: origin.with_scale(Vec3::splat(cfg.central_zoom)),
                    ..default()
                },
                CentralBody,
            ));
        }
        None => {
            commands.spawn((
                MaterialMesh2dBundle {
                    mesh: Mesh2dHandle(meshes.add(Circle::new(CENTRAL_RADIUS_PX))),
                    material: materials.add(ColorMaterial::from(Color::srgb(0.3, 0.5, 1.0))),
                    transform: origin,
                    ..default()
                },
                CentralBody,
            ));
        }
    }

    // orbiting body, moved every frame by `sync_orbiting_body`
    let at_start = Transform::from_xyz(start.x, start.y, 2.0);
    match &cfg.body_image {
        Some(name) => {
            commands.spawn((
                SpriteBundle {
                    texture: asset_server.load(name.clone()),
                    transform: at_start.with_scale(Vec3::splat(cfg.body_zoom)),
                    ..default()
                },
                OrbitingBody,
            ));
        }
        None => {
            commands.spawn((
                MaterialMesh2dBundle {
                    mesh: Mesh2dHandle(meshes.add(Circle::new(BODY_RADIUS_PX))),
                    material: materials.add(ColorMaterial::from(Color::srgb(0.8, 0.2, 0.2))),
                    transform: at_start,
                    ..default()
                },
                OrbitingBody,
            ));
        }
    }

    info!("orbit viewer ready: {} frames", playback.points.len());
}

fn advance_frame(time: Res<Time>, mut playback: ResMut<OrbitPlayback>) {
    playback.timer.tick(time.delta());
    let ticks = playback.timer.times_finished_this_tick() as usize;
    if ticks > 0 {
        let len = playback.points.len();
        playback.frame = (playback.frame + ticks) % len;
    }
}

fn sync_orbiting_body(playback: Res<OrbitPlayback>, mut query: Query<&mut Transform, With<OrbitingBody>>) {
    let Some(p) = playback.points.get(playback.frame) else {
        return;
    };
    for mut transform in &mut query {
        transform.translation.x = p.x;
        transform.translation.y = p.y;
    }
}

fn draw_orbit(mut gizmos: Gizmos, playback: Res<OrbitPlayback>) {
    // x / y axes through the central body
    let half = WINDOW_PX * 0.5;
    let axis = Color::srgb(0.85, 0.85, 0.85);
    gizmos.line_2d(Vec2::new(-half, 0.0), Vec2::new(half, 0.0), axis);
    gizmos.line_2d(Vec2::new(0.0, -half), Vec2::new(0.0, half), axis);

    gizmos.linestrip_2d(playback.points.iter().copied(), Color::BLACK);
}
