//! Engine behavior tests: kinematics, stop logic, spawning, despawning,
//! and the time-scale/clock decoupling.

use rand::rngs::StdRng;
use rand::SeedableRng;

use flux_sim::simulation::{
    spawn_blocked, try_spawn, Lane, LaneGroup, LightColor, LightState, Policy, SimVehicle,
    SimWorld, SpawnOutcome, Vec2, VehicleColor, VehicleId, VehicleKind, EMERGENCY_SPEED,
    ORDINARY_SPEED, ORDINARY_SPEED_FAST,
};

fn test_vehicle(id: usize, lane: Lane, position: Vec2, speed: f32) -> SimVehicle {
    SimVehicle {
        id: VehicleId(id),
        kind: VehicleKind::Ordinary,
        lane,
        position,
        heading: lane.heading(),
        speed,
        speed_variance: 1.0,
        color: VehicleColor::WHITE,
    }
}

const RED_FOR_NS: LightState = LightState {
    ns: LightColor::Red,
    ew: LightColor::Green,
};

#[test]
fn test_stopped_vehicle_at_red_stays_stopped() {
    let mut world = SimWorld::new_with_seed(1);
    world.set_policy(Policy::FixedTimer);

    // 18 units out, inside the detection zone, facing the center
    let id = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -18.0),
        0.0,
    );

    // elapsed lands at 8s: NS red under the fixed timer
    world.advance_tick(8.0);

    let vehicle = world.vehicle(id).expect("vehicle still active");
    assert!(vehicle.must_stop_for_light(&world.lights()));
    assert_eq!(vehicle.speed, 0.0);
    assert_eq!(vehicle.position.z, -18.0);
}

#[test]
fn test_speed_never_negative_while_braking() {
    let mut world = SimWorld::new_with_seed(2);
    world.set_policy(Policy::FixedTimer);
    let id = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -18.0),
        0.0,
    );

    // First tick lands in the red window; the rest stay inside it
    world.advance_tick(7.2);
    for _ in 0..50 {
        world.advance_tick(0.05);
        let vehicle = world.vehicle(id).expect("vehicle still active");
        assert!(vehicle.speed >= 0.0);
    }
}

#[test]
fn test_committed_vehicle_runs_the_red() {
    let mut world = SimWorld::new_with_seed(3);
    world.set_policy(Policy::FixedTimer);

    // Inside the point of no return with speed above the commit threshold
    let id = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -13.0),
        0.15,
    );

    let vehicle = world.vehicle(id).expect("vehicle present");
    assert!(!vehicle.must_stop_for_light(&RED_FOR_NS));

    world.advance_tick(8.0);
    let vehicle = world.vehicle(id).expect("vehicle still active");
    assert!(vehicle.speed > 0.15, "committed vehicle keeps accelerating");
    assert!(vehicle.position.z > -13.0, "committed vehicle keeps moving");
}

#[test]
fn test_acceleration_clamps_at_target_speed() {
    let mut world = SimWorld::new_with_seed(4);
    world.set_policy(Policy::FixedTimer);

    // Far outside the detection zone, free road ahead
    let id = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -100.0),
        0.24,
    );

    world.advance_tick(0.1);
    let vehicle = world.vehicle(id).expect("vehicle still active");
    assert_eq!(vehicle.speed, ORDINARY_SPEED);
}

#[test]
fn test_yellow_stops_only_before_point_of_no_return() {
    let yellow_for_ns = LightState {
        ns: LightColor::Yellow,
        ew: LightColor::Red,
    };

    // Before the point of no return: stop on yellow
    let vehicle = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, -17.0), 0.05);
    assert!(vehicle.must_stop_for_light(&yellow_for_ns));

    // Past it, yellow: too late to stop safely before the line
    let vehicle = test_vehicle(1, Lane::NorthToSouth, Vec2::new(-2.0, -13.0), 0.05);
    assert!(!vehicle.must_stop_for_light(&yellow_for_ns));

    // Inside the point of no return on red, crawling: holds
    let vehicle = test_vehicle(2, Lane::NorthToSouth, Vec2::new(-2.0, -13.0), 0.05);
    assert!(vehicle.must_stop_for_light(&RED_FOR_NS));
}

#[test]
fn test_outbound_vehicle_ignores_lights() {
    // Past the center, heading out through the far side of the zone
    let vehicle = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, 15.0), 0.3);
    assert!(vehicle.is_moving_away());
    assert!(!vehicle.must_stop_for_light(&RED_FOR_NS));
}

#[test]
fn test_emergency_vehicle_ignores_red_light() {
    let mut world = SimWorld::new_with_seed(5);
    world.set_policy(Policy::FixedTimer);
    let id = world.insert_vehicle(
        VehicleKind::Emergency,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -18.0),
        0.0,
    );

    // NS red; no preemption under the fixed timer, but the vehicle itself
    // never stops for lights
    world.advance_tick(8.0);
    assert_eq!(world.lights().ns, LightColor::Red);

    let vehicle = world.vehicle(id).expect("vehicle still active");
    assert!(vehicle.speed > 0.0);
    assert!(vehicle.position.z > -18.0);
}

#[test]
fn test_emergency_preemption_forces_green() {
    let mut world = SimWorld::new_with_seed(6);
    world.set_policy(Policy::Adaptive);
    world.insert_vehicle(
        VehicleKind::Emergency,
        Lane::EastToWest,
        Vec2::new(120.0, -2.0),
        0.3,
    );

    // 1s into the adaptive cycle would normally be NS green
    world.advance_tick(1.0);
    assert_eq!(world.emergency_active(), Some(LaneGroup::EastWest));
    assert_eq!(world.lights().ns, LightColor::Red);
    assert_eq!(world.lights().ew, LightColor::Green);
}

#[test]
fn test_follow_guard_blocks_close_trailer() {
    let leader = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, -30.0), 0.2);
    let trailer = test_vehicle(1, Lane::NorthToSouth, Vec2::new(-2.0, -36.0), 0.2);
    let vehicles = vec![leader.clone(), trailer.clone()];

    // 6 units ahead: inside the gap
    assert!(trailer.blocked_by_leader(&vehicles));
    // The leader sees the trailer behind it, not ahead
    assert!(!leader.blocked_by_leader(&vehicles));
}

#[test]
fn test_follow_guard_respects_gap_and_lane() {
    let trailer = test_vehicle(1, Lane::NorthToSouth, Vec2::new(-2.0, -39.5), 0.2);

    // 9.5 units ahead: outside the gap
    let far_leader = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, -30.0), 0.2);
    assert!(!trailer.blocked_by_leader(&[far_leader, trailer.clone()]));

    // Same geometry but a different lane does not block
    let cross_leader = test_vehicle(0, Lane::EastToWest, Vec2::new(-2.0, -30.0), 0.2);
    assert!(!trailer.blocked_by_leader(&[cross_leader, trailer.clone()]));
}

#[test]
fn test_spawn_guard_radius() {
    let spawn_point = Lane::NorthToSouth.spawn_position();

    let near = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, -105.1), 0.2);
    assert!(spawn_blocked(&[near], &spawn_point));

    let clear = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, -104.9), 0.2);
    assert!(!spawn_blocked(&[clear], &spawn_point));
}

#[test]
fn test_spawn_guard_is_lane_agnostic() {
    // A vehicle on a crossing lane near the spawn point still blocks it
    let spawn_point = Lane::NorthToSouth.spawn_position();
    let cross = test_vehicle(0, Lane::EastToWest, Vec2::new(-2.0, -110.0), 0.2);
    assert!(spawn_blocked(&[cross], &spawn_point));
}

#[test]
fn test_spawner_creates_stationary_vehicle_at_lane_origin() {
    let mut rng = StdRng::seed_from_u64(7);

    // A time scale of 50 pushes the per-tick probability to 1.0, so the
    // roll always attempts
    match try_spawn(&mut rng, &[], 50.0, VehicleId(0)) {
        SpawnOutcome::Spawned(vehicle) => {
            assert_eq!(vehicle.speed, 0.0);
            assert_eq!(vehicle.position, vehicle.lane.spawn_position());
            assert_eq!(vehicle.heading, vehicle.lane.heading());
            assert!(vehicle.speed_variance >= 0.9 && vehicle.speed_variance < 1.1);
        }
        other => panic!("expected a spawn, got {:?}", other),
    }
}

#[test]
fn test_spawner_rejects_when_all_spawn_points_covered() {
    let mut rng = StdRng::seed_from_u64(8);

    let blockers: Vec<SimVehicle> = Lane::ALL
        .iter()
        .enumerate()
        .map(|(index, lane)| test_vehicle(index, *lane, lane.spawn_position(), 0.0))
        .collect();

    for _ in 0..20 {
        match try_spawn(&mut rng, &blockers, 50.0, VehicleId(99)) {
            SpawnOutcome::Blocked => {}
            other => panic!("expected Blocked, got {:?}", other),
        }
    }
}

#[test]
fn test_despawn_beyond_threshold_when_outbound() {
    let mut world = SimWorld::new_with_seed(9);

    // Outbound past the despawn distance
    let outbound = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, 131.0),
        0.2,
    );
    // Inbound at the same distance stays
    let inbound = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -131.0),
        0.2,
    );

    world.advance_tick(0.05);
    assert!(world.vehicle(outbound).is_none());
    assert!(world.vehicle(inbound).is_some());
    assert!(world.stats.despawned >= 1);
}

#[test]
fn test_lag_spike_is_clamped_to_max_delta() {
    let mut spiked = SimWorld::new_with_seed(10);
    let mut steady = SimWorld::new_with_seed(10);

    // At target speed already, so no acceleration enters the picture
    let a = spiked.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -100.0),
        ORDINARY_SPEED,
    );
    let b = steady.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -100.0),
        ORDINARY_SPEED,
    );

    // A 5-second stall integrates exactly as far as a 0.1-second tick
    spiked.advance_tick(5.0);
    steady.advance_tick(0.1);

    let za = spiked.vehicle(a).expect("active").position.z;
    let zb = steady.vehicle(b).expect("active").position.z;
    assert!((za - zb).abs() < 1e-4);
    assert!(za > -100.0);
}

#[test]
fn test_lights_run_on_wall_clock_while_motion_is_scaled() {
    let mut world = SimWorld::new_with_seed(11);
    world.set_policy(Policy::FixedTimer);
    world.set_time_scale(0.1);

    let id = world.insert_vehicle(
        VehicleKind::Ordinary,
        Lane::NorthToSouth,
        Vec2::new(-2.0, -100.0),
        ORDINARY_SPEED,
    );

    // Signals see the full 8 seconds even though motion runs at 0.1x
    world.advance_tick(8.0);
    assert_eq!(world.lights().ns, LightColor::Red);
    assert_eq!(world.lights().ew, LightColor::Green);

    // Movement integrated over dt = 0.1 * 0.1: a tenth of the normal step
    let z = world.vehicle(id).expect("active").position.z;
    assert!((z - (-99.85)).abs() < 1e-3);
}

#[test]
fn test_adaptive_policy_runs_uniform_speeds() {
    let mut vehicle = test_vehicle(0, Lane::NorthToSouth, Vec2::new(-2.0, -50.0), 0.0);
    vehicle.speed_variance = 0.9;

    // Variance applies under the fixed timer, never under adaptive
    assert!((vehicle.target_speed(Policy::FixedTimer) - ORDINARY_SPEED * 0.9).abs() < 1e-6);
    assert!((vehicle.target_speed(Policy::Adaptive) - ORDINARY_SPEED_FAST).abs() < 1e-6);

    vehicle.kind = VehicleKind::Emergency;
    assert_eq!(vehicle.target_speed(Policy::FixedTimer), EMERGENCY_SPEED);
    assert_eq!(vehicle.target_speed(Policy::Adaptive), EMERGENCY_SPEED);
}

#[test]
fn test_seeded_runs_are_deterministic() {
    let mut first = SimWorld::new_with_seed(42);
    let mut second = SimWorld::new_with_seed(42);
    first.set_policy(Policy::Adaptive);
    second.set_policy(Policy::Adaptive);

    for _ in 0..500 {
        first.advance_tick(0.05);
        second.advance_tick(0.05);
    }

    assert_eq!(first.vehicles(), second.vehicles());
    assert_eq!(first.stats.spawned, second.stats.spawned);
    assert_eq!(first.stats.despawned, second.stats.despawned);
}
