//! Vehicle state and per-tick movement logic
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::lights::LightState;
use super::types::{
    Lane, LightColor, Policy, Vec2, VehicleColor, VehicleId, VehicleKind, BASE_ACCELERATION,
    BASE_BRAKING, COMMIT_SPEED, DESPAWN_DISTANCE, DETECTION_ZONE, EMERGENCY_SPEED, FOLLOW_GAP,
    ORDINARY_SPEED, ORDINARY_SPEED_FAST, POINT_OF_NO_RETURN, STOP_LINE_DISTANCE,
};

/// A vehicle in the intersection simulation
///
/// `lane` and `heading` never change after creation; `speed` stays within
/// `[0, target]` for the active policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub lane: Lane,
    pub position: Vec2,
    pub heading: Vec2,
    pub speed: f32,
    /// Per-vehicle speed factor sampled once at spawn, ~[0.9, 1.1)
    pub speed_variance: f32,
    /// Display attribute for the render collaborator
    pub color: VehicleColor,
}

impl SimVehicle {
    pub fn distance_to_center(&self) -> f32 {
        self.position.length()
    }

    /// True once the vehicle has passed the center and is heading outbound
    pub fn is_moving_away(&self) -> bool {
        self.position.dot(&self.heading) > 0.0
    }

    /// Target cruising speed for this vehicle under the given policy.
    ///
    /// Adaptive control pins ordinary vehicles to a uniform factor so the
    /// short cycle stays synchronized (the green wave); the fixed timer
    /// keeps the per-vehicle variance. Emergency vehicles run a fixed
    /// faster base under either policy.
    pub fn target_speed(&self, policy: Policy) -> f32 {
        match self.kind {
            VehicleKind::Emergency => EMERGENCY_SPEED,
            VehicleKind::Ordinary => match policy {
                Policy::FixedTimer => ORDINARY_SPEED * self.speed_variance,
                Policy::Adaptive => ORDINARY_SPEED_FAST,
            },
        }
    }

    /// Stop-line decision against this vehicle's signal.
    ///
    /// Only evaluated inside the detection zone while inbound. Inside the
    /// point of no return a vehicle still carrying speed commits through
    /// regardless of the signal, and on yellow a vehicle stops only while
    /// it can still do so before that point. Emergency vehicles never stop
    /// for lights.
    pub fn must_stop_for_light(&self, lights: &LightState) -> bool {
        let distance = self.distance_to_center();
        let approaching = distance > STOP_LINE_DISTANCE;
        if !approaching || distance >= DETECTION_ZONE || self.is_moving_away() {
            return false;
        }
        if self.kind == VehicleKind::Emergency {
            return false;
        }

        let past_point = distance < POINT_OF_NO_RETURN;
        if past_point && self.speed > COMMIT_SPEED {
            return false;
        }
        match lights.for_group(self.lane.group()) {
            LightColor::Red => true,
            LightColor::Yellow => !past_point,
            LightColor::Green => false,
        }
    }

    /// Same-lane gap check against the previous tick's positions.
    ///
    /// A vehicle less than `FOLLOW_GAP` units directly ahead (projected
    /// onto this vehicle's heading) forces a stop.
    pub fn blocked_by_leader(&self, others: &[SimVehicle]) -> bool {
        for other in others {
            if other.id == self.id || other.lane != self.lane {
                continue;
            }
            let dx = other.position.x - self.position.x;
            let dz = other.position.z - self.position.z;
            let ahead = dx * self.heading.x + dz * self.heading.z;
            if ahead > 0.0 && ahead < FOLLOW_GAP {
                return true;
            }
        }
        false
    }

    /// Apply one tick of speed integration and movement.
    ///
    /// `follow_blocked` is the follow-guard decision computed against the
    /// pre-tick vehicle set, before any position was committed.
    pub fn advance(
        &mut self,
        follow_blocked: bool,
        lights: &LightState,
        policy: Policy,
        time_scale: f32,
        fps_scale: f32,
    ) {
        let acceleration = BASE_ACCELERATION * time_scale * fps_scale;
        let braking = BASE_BRAKING * time_scale * fps_scale;

        let target = self.target_speed(policy);
        if self.speed < target {
            self.speed = (self.speed + acceleration).min(target);
        }

        let must_stop = self.must_stop_for_light(lights) || follow_blocked;
        if must_stop {
            self.speed = (self.speed - braking).max(0.0);
        }

        let step = self.speed * fps_scale;
        self.position.x += self.heading.x * step;
        self.position.z += self.heading.z * step;
    }

    /// Normal end of life: past the despawn distance and heading outbound
    pub fn should_despawn(&self) -> bool {
        self.distance_to_center() > DESPAWN_DISTANCE && self.is_moving_away()
    }
}
