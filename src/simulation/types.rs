//! Core types for the intersection simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for vehicles in the simulation
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// Kind of vehicle in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    /// Regular passenger vehicle
    Ordinary,
    /// Emergency vehicle (preempts the adaptive light cycle)
    Emergency,
}

/// The four approach lanes through the intersection
///
/// A vehicle's lane is fixed at spawn; there are no lane changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    NorthToSouth,
    SouthToNorth,
    EastToWest,
    WestToEast,
}

impl Lane {
    pub const ALL: [Lane; 4] = [
        Lane::NorthToSouth,
        Lane::SouthToNorth,
        Lane::EastToWest,
        Lane::WestToEast,
    ];

    /// The lane group sharing this lane's light-color decision
    pub fn group(self) -> LaneGroup {
        match self {
            Lane::NorthToSouth | Lane::SouthToNorth => LaneGroup::NorthSouth,
            Lane::EastToWest | Lane::WestToEast => LaneGroup::EastWest,
        }
    }

    /// Fixed spawn point for this lane, offset to the right-hand side
    pub fn spawn_position(self) -> Vec2 {
        match self {
            Lane::NorthToSouth => Vec2::new(-LANE_OFFSET, -SPAWN_DISTANCE),
            Lane::SouthToNorth => Vec2::new(LANE_OFFSET, SPAWN_DISTANCE),
            Lane::EastToWest => Vec2::new(SPAWN_DISTANCE, -LANE_OFFSET),
            Lane::WestToEast => Vec2::new(-SPAWN_DISTANCE, LANE_OFFSET),
        }
    }

    /// Unit direction of travel for this lane
    pub fn heading(self) -> Vec2 {
        match self {
            Lane::NorthToSouth => Vec2::new(0.0, 1.0),
            Lane::SouthToNorth => Vec2::new(0.0, -1.0),
            Lane::EastToWest => Vec2::new(-1.0, 0.0),
            Lane::WestToEast => Vec2::new(1.0, 0.0),
        }
    }
}

/// Pairing of the two opposing lanes that share one light decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneGroup {
    NorthSouth,
    EastWest,
}

/// State of one light group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Green,
    Yellow,
    Red,
}

/// Traffic light control policy, selected by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Blind 14-second timer cycle
    FixedTimer,
    /// Short 5-second cycle with uniform vehicle speeds and emergency
    /// preemption
    Adaptive,
}

/// A 2D position or direction on the ground plane (x east, z south)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &Vec2) -> f32 {
        self.x * other.x + self.z * other.z
    }

    pub fn distance(&self, other: &Vec2) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Display color for a vehicle, as hue/saturation/lightness
///
/// Purely a render attribute; the engine never reads it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleColor {
    /// Hue in degrees
    pub hue: f32,
    /// Saturation percentage
    pub saturation: f32,
    /// Lightness percentage
    pub lightness: f32,
}

impl VehicleColor {
    /// Emergency vehicles are always white
    pub const WHITE: VehicleColor = VehicleColor {
        hue: 0.0,
        saturation: 0.0,
        lightness: 100.0,
    };
}

/// Distance from center of the stop line
pub const STOP_LINE_DISTANCE: f32 = 12.0;

/// Inside this distance a vehicle still carrying speed commits through
pub const POINT_OF_NO_RETURN: f32 = STOP_LINE_DISTANCE + 2.0;

/// Distance at which stop logic starts being evaluated
pub const DETECTION_ZONE: f32 = STOP_LINE_DISTANCE + 7.0;

/// Speed above which a vehicle inside the point of no return commits
pub const COMMIT_SPEED: f32 = 0.1;

/// Minimum same-lane gap before the follow guard forces braking
pub const FOLLOW_GAP: f32 = 8.0;

/// No spawn succeeds with any vehicle within this radius of the spawn point
pub const SPAWN_CLEARANCE: f32 = 15.0;

/// Distance from center at which vehicles enter the world
pub const SPAWN_DISTANCE: f32 = 120.0;

/// Lateral offset of each lane from the road centerline
pub const LANE_OFFSET: f32 = 2.0;

/// Outbound vehicles past this distance are removed
pub const DESPAWN_DISTANCE: f32 = 130.0;

/// Per-tick spawn probability at time scale 1.0
pub const BASE_SPAWN_RATE: f32 = 0.02;

/// Chance that a spawned vehicle is an emergency vehicle
pub const EMERGENCY_PROBABILITY: f32 = 0.03;

/// Ordinary cruising speed under the fixed-timer policy, units per frame
/// at the reference frame rate
pub const ORDINARY_SPEED: f32 = 0.25;

/// Ordinary cruising speed under the adaptive policy
pub const ORDINARY_SPEED_FAST: f32 = 0.45;

/// Emergency vehicle cruising speed under either policy
pub const EMERGENCY_SPEED: f32 = 0.65;

/// Speed gained per reference frame while below target
pub const BASE_ACCELERATION: f32 = 0.01;

/// Speed lost per reference frame while stopping; stronger than
/// acceleration so queues drain responsively
pub const BASE_BRAKING: f32 = 0.08;

/// Speeds are expressed per frame at 60 updates per second
pub const REFERENCE_FRAME_TIME: f32 = 1.0 / 60.0;

/// Per-tick delta clamp bounding integration error across lag spikes
pub const MAX_TICK_DELTA: f32 = 0.1;
