//! Standalone intersection simulation module
//!
//! This module contains all the core simulation logic: the signal phase
//! controller, vehicle spawning, kinematics and stop-line decisions, the
//! following guard, and the per-tick orchestrator. It runs independently
//! of the Bevy game engine and can be exercised from the console without
//! booting up the full UI.

mod lights;
mod spawner;
mod stats;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use lights::{phase_colors, LightState, ADAPTIVE_CYCLE_SECS, FIXED_CYCLE_SECS};
#[allow(unused_imports)]
pub use spawner::{spawn_blocked, try_spawn, SpawnOutcome};
pub use stats::SimStats;
#[allow(unused_imports)]
pub use types::{
    Lane, LaneGroup, LightColor, Policy, Vec2, VehicleColor, VehicleId, VehicleKind,
    BASE_ACCELERATION, BASE_BRAKING, BASE_SPAWN_RATE, COMMIT_SPEED, DESPAWN_DISTANCE,
    DETECTION_ZONE, EMERGENCY_PROBABILITY, EMERGENCY_SPEED, FOLLOW_GAP, LANE_OFFSET,
    MAX_TICK_DELTA, ORDINARY_SPEED, ORDINARY_SPEED_FAST, POINT_OF_NO_RETURN,
    REFERENCE_FRAME_TIME, SPAWN_CLEARANCE, SPAWN_DISTANCE, STOP_LINE_DISTANCE,
};
pub use vehicle::SimVehicle;
pub use world::SimWorld;
