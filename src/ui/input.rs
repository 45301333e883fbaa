//! Input handling systems

use bevy::prelude::*;

use super::components::SimWorldResource;
use crate::simulation::Policy;

/// Handle keyboard input: policy selection, slow motion, exit
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
    if keyboard.just_pressed(KeyCode::Digit1) {
        sim_world.0.set_policy(Policy::FixedTimer);
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        sim_world.0.set_policy(Policy::Adaptive);
    }
    if keyboard.just_pressed(KeyCode::KeyS) {
        let slowed = sim_world.0.time_scale() < 1.0;
        sim_world.0.set_time_scale(if slowed { 1.0 } else { 0.1 });
    }
}
