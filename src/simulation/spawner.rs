//! Stochastic vehicle spawning
//!
//! One spawn attempt per tick, rolled against the pre-tick vehicle set.
//! Generic over the RNG so seeded runs and tests stay deterministic.

use rand::Rng;

use super::types::{
    Lane, Vec2, VehicleColor, VehicleId, VehicleKind, BASE_SPAWN_RATE, EMERGENCY_PROBABILITY,
    SPAWN_CLEARANCE,
};
use super::vehicle::SimVehicle;

/// Result of a spawn roll
#[derive(Debug, Clone)]
pub enum SpawnOutcome {
    /// The per-tick probability roll failed; nothing happened
    NoAttempt,
    /// A candidate was rolled but rejected by the clearance guard
    Blocked,
    /// A vehicle was created
    Spawned(SimVehicle),
}

/// Roll a single spawn attempt for this tick.
///
/// The roll probability couples to the time scale directly rather than to
/// the integration delta, so spawn density tracks tick rate. Known
/// approximation, kept for behavioral fidelity with slow-motion playback
/// (fewer spawns while traffic moves slower).
pub fn try_spawn<R: Rng>(
    rng: &mut R,
    vehicles: &[SimVehicle],
    time_scale: f32,
    id: VehicleId,
) -> SpawnOutcome {
    if rng.random_range(0.0..1.0) >= BASE_SPAWN_RATE * time_scale {
        return SpawnOutcome::NoAttempt;
    }

    let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
    let kind = if rng.random_range(0.0..1.0) < EMERGENCY_PROBABILITY {
        VehicleKind::Emergency
    } else {
        VehicleKind::Ordinary
    };

    let position = lane.spawn_position();
    if spawn_blocked(vehicles, &position) {
        return SpawnOutcome::Blocked;
    }

    let color = match kind {
        VehicleKind::Emergency => VehicleColor::WHITE,
        VehicleKind::Ordinary => VehicleColor {
            hue: 200.0 + rng.random_range(0.0..40.0),
            saturation: 70.0 + rng.random_range(0.0..20.0),
            lightness: 50.0 + rng.random_range(0.0..20.0),
        },
    };

    SpawnOutcome::Spawned(SimVehicle {
        id,
        kind,
        lane,
        position,
        heading: lane.heading(),
        speed: 0.0,
        speed_variance: rng.random_range(0.9..1.1),
        color,
    })
}

/// True when any active vehicle sits within the clearance radius of the
/// candidate spawn point. Deliberately lane-agnostic: traffic on a crossing
/// lane near the spawn point also blocks the spawn.
pub fn spawn_blocked(vehicles: &[SimVehicle], point: &Vec2) -> bool {
    vehicles
        .iter()
        .any(|vehicle| vehicle.position.distance(point) < SPAWN_CLEARANCE)
}
