//! Signal phase logic for the intersection
//!
//! Light colors are a pure function of elapsed wall-clock time, the active
//! policy, and emergency preemption. Nothing here is stateful: the phase is
//! re-evaluated from scratch every tick rather than transitioned.

use super::types::{LaneGroup, LightColor, Policy};

/// Length of the fixed-timer cycle in seconds
pub const FIXED_CYCLE_SECS: f32 = 14.0;

/// Length of the adaptive cycle in seconds
pub const ADAPTIVE_CYCLE_SECS: f32 = 5.0;

/// Light colors for both lane groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub ns: LightColor,
    pub ew: LightColor,
}

impl LightState {
    pub fn for_group(&self, group: LaneGroup) -> LightColor {
        match group {
            LaneGroup::NorthSouth => self.ns,
            LaneGroup::EastWest => self.ew,
        }
    }
}

/// Evaluate the signal phase at the given instant.
///
/// `emergency` carries the lane group of an active emergency vehicle, if
/// any. Preemption applies only under the adaptive policy: the emergency
/// group is forced green and the cross group red, unconditionally, for as
/// long as the vehicle is active. No cycle position is remembered across
/// preemption; the timed cycle simply resumes wherever `elapsed` lands.
pub fn phase_colors(elapsed: f32, policy: Policy, emergency: Option<LaneGroup>) -> LightState {
    use LightColor::{Green, Red, Yellow};

    if policy == Policy::Adaptive {
        if let Some(group) = emergency {
            return match group {
                LaneGroup::NorthSouth => LightState { ns: Green, ew: Red },
                LaneGroup::EastWest => LightState { ns: Red, ew: Green },
            };
        }
    }

    match policy {
        Policy::FixedTimer => {
            let cycle = elapsed % FIXED_CYCLE_SECS;
            if cycle < 6.0 {
                LightState { ns: Green, ew: Red }
            } else if cycle < 7.0 {
                LightState { ns: Yellow, ew: Red }
            } else if cycle < 13.0 {
                LightState { ns: Red, ew: Green }
            } else {
                LightState { ns: Red, ew: Yellow }
            }
        }
        Policy::Adaptive => {
            let cycle = elapsed % ADAPTIVE_CYCLE_SECS;
            if cycle < 2.0 {
                LightState { ns: Green, ew: Red }
            } else if cycle < 2.5 {
                LightState { ns: Yellow, ew: Red }
            } else if cycle < 4.5 {
                LightState { ns: Red, ew: Green }
            } else {
                LightState { ns: Red, ew: Yellow }
            }
        }
    }
}
