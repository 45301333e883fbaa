//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization and host input - all simulation
//! logic is in the `simulation` module. The UI reads the post-tick snapshot
//! from `SimWorld`, renders it with Bevy's 3D graphics, and feeds the
//! policy/time-scale selections back to the engine.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::SimWorldResource;

use components::EntityMappings;
use input::handle_input;
use sync::{sync_vehicles, tick_simulation, update_signal_bulbs, update_status_text};
use world::setup_world;

/// Plugin to register all UI systems
pub struct FluxSimUIPlugin;

impl Plugin for FluxSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .add_systems(Startup, setup_world)
            .add_systems(
                Update,
                (
                    tick_simulation,
                    sync_vehicles.after(tick_simulation),
                    update_signal_bulbs.after(tick_simulation),
                    update_status_text.after(tick_simulation),
                    handle_input,
                ),
            );
    }
}
