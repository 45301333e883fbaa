//! World setup systems for camera, lighting, ground, and signal heads

use bevy::prelude::*;

use super::components::{Ground, MainCamera, SignalBulb, StatusText};
use crate::simulation::{LaneGroup, LightColor, STOP_LINE_DISTANCE};

const ROAD_WIDTH: f32 = 8.0;
const ROAD_LENGTH: f32 = 260.0;

/// System to setup the world environment (ground, road, signals, camera)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Elevated oblique view of the intersection
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(40.0, 50.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50.0, 100.0, -20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(300.0, 300.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.08, 0.10, 0.08))),
        Transform::from_xyz(0.0, -0.05, 0.0),
    ));

    // Asphalt cross
    let asphalt = materials.add(Color::srgb(0.15, 0.15, 0.15));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ROAD_WIDTH, 0.1, ROAD_LENGTH))),
        MeshMaterial3d(asphalt.clone()),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ROAD_LENGTH, 0.1, ROAD_WIDTH))),
        MeshMaterial3d(asphalt),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Stop lines just outside the conflict area on each approach
    let line = materials.add(Color::srgb(0.9, 0.9, 0.9));
    let line_offset = STOP_LINE_DISTANCE - 1.0;
    for (x, z, width, length) in [
        (0.0, -line_offset, ROAD_WIDTH, 1.0),
        (0.0, line_offset, ROAD_WIDTH, 1.0),
        (line_offset, 0.0, 1.0, ROAD_WIDTH),
        (-line_offset, 0.0, 1.0, ROAD_WIDTH),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(width, 0.12, length))),
            MeshMaterial3d(line.clone()),
            Transform::from_xyz(x, 0.01, z),
        ));
    }

    // Four signal heads, each facing its approach
    for (x, z, group) in [
        (-8.0, 12.0, LaneGroup::NorthSouth),
        (8.0, -12.0, LaneGroup::NorthSouth),
        (12.0, 8.0, LaneGroup::EastWest),
        (-12.0, -8.0, LaneGroup::EastWest),
    ] {
        spawn_signal_head(
            &mut commands,
            &mut meshes,
            &mut materials,
            Vec3::new(x, 0.0, z),
            group,
        );
    }

    // HUD status line
    commands.spawn((
        StatusText,
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

/// Spawn one signal head: pole, housing, and three bulbs
fn spawn_signal_head(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    base: Vec3,
    group: LaneGroup,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(0.15, 8.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.05, 0.05, 0.05))),
        Transform::from_translation(base + Vec3::new(0.0, 4.0, 0.0)),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.8, 2.2, 0.5))),
        MeshMaterial3d(materials.add(Color::srgb(0.1, 0.1, 0.1))),
        Transform::from_translation(base + Vec3::new(0.0, 7.0, 0.0)),
    ));

    // Bulbs top to bottom: red, yellow, green. Each gets its own material
    // instance so the sync system can light them independently.
    for (height, color) in [
        (7.6, LightColor::Red),
        (7.0, LightColor::Yellow),
        (6.4, LightColor::Green),
    ] {
        commands.spawn((
            SignalBulb { group, color },
            Mesh3d(meshes.add(Sphere::new(0.25))),
            MeshMaterial3d(materials.add(Color::srgb(0.08, 0.08, 0.08))),
            Transform::from_translation(base + Vec3::new(0.0, height, 0.3)),
        ));
    }
}
