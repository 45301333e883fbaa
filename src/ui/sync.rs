//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    EntityMappings, SignalBulb, SimSynced, SimWorldResource, StatusText, VehicleLink,
};
use crate::simulation::{LightColor, VehicleId, VehicleKind};

/// System to advance the simulation with the real frame delta
///
/// The engine owns elapsed-time accumulation and delta clamping; this just
/// feeds it the raw wall-clock delta each frame.
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.advance_tick(time.delta_secs());
}

/// System to sync vehicle visuals from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(Entity, &VehicleLink, &mut Transform)>,
) {
    let world = &sim_world.0;

    // Update existing vehicles and track which ones still exist
    let mut live_ids: HashSet<VehicleId> = HashSet::new();

    for (entity, link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = world.vehicle(link.0) {
            live_ids.insert(link.0);
            transform.translation = Vec3::new(vehicle.position.x, 0.4, vehicle.position.z);
            transform.rotation = Quat::from_rotation_y(vehicle.heading.x.atan2(vehicle.heading.z));
        } else {
            // Vehicle no longer exists in simulation, despawn
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
        }
    }

    // Spawn new vehicles
    for vehicle in world.vehicles() {
        if !live_ids.contains(&vehicle.id) {
            let (size, color) = match vehicle.kind {
                VehicleKind::Ordinary => (
                    Vec3::new(1.8, 0.6, 3.8),
                    Color::hsl(
                        vehicle.color.hue,
                        vehicle.color.saturation / 100.0,
                        vehicle.color.lightness / 100.0,
                    ),
                ),
                VehicleKind::Emergency => (Vec3::new(1.8, 0.9, 4.0), Color::srgb(1.0, 1.0, 1.0)),
            };

            let entity = commands
                .spawn((
                    SimSynced,
                    VehicleLink(vehicle.id),
                    Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                    MeshMaterial3d(materials.add(color)),
                    Transform::from_translation(Vec3::new(
                        vehicle.position.x,
                        0.4,
                        vehicle.position.z,
                    ))
                    .with_rotation(Quat::from_rotation_y(
                        vehicle.heading.x.atan2(vehicle.heading.z),
                    )),
                ))
                .id();
            mappings.vehicles.insert(vehicle.id, entity);
        }
    }
}

/// System to light the active signal bulbs
pub fn update_signal_bulbs(
    sim_world: Res<SimWorldResource>,
    bulb_query: Query<(&SignalBulb, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let lights = sim_world.0.lights();

    for (bulb, material_handle) in bulb_query.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            let active = lights.for_group(bulb.group) == bulb.color;
            material.base_color = if active {
                match bulb.color {
                    LightColor::Red => Color::srgb(1.0, 0.1, 0.1),
                    LightColor::Yellow => Color::srgb(1.0, 0.7, 0.0),
                    LightColor::Green => Color::srgb(0.1, 1.0, 0.3),
                }
            } else {
                Color::srgb(0.08, 0.08, 0.08)
            };
        }
    }
}

/// System to update the HUD status text
pub fn update_status_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    let world = &sim_world.0;
    for mut text in text_query.iter_mut() {
        **text = format!(
            "Policy: {:?} ({}x)   NS: {:?}  EW: {:?}   Active: {}   {}",
            world.policy(),
            world.time_scale(),
            world.lights().ns,
            world.lights().ew,
            world.vehicles().len(),
            world.stats.summary()
        );
    }
}
