//! Main simulation world that ties everything together
//!
//! This is the entry point for advancing the simulation one tick at a
//! time, without any Bevy dependencies. The world is the single writer of
//! all simulation state; collaborators read the post-tick snapshot.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::lights::{phase_colors, LightState};
use super::spawner::{try_spawn, SpawnOutcome};
use super::stats::SimStats;
use super::types::{
    Lane, LaneGroup, LightColor, Policy, Vec2, VehicleColor, VehicleId, VehicleKind,
    MAX_TICK_DELTA, REFERENCE_FRAME_TIME,
};
use super::vehicle::SimVehicle;

/// The simulation world for one signalized intersection
pub struct SimWorld {
    /// All active vehicles, updated in place each tick
    vehicles: Vec<SimVehicle>,

    /// Signal state as of the end of the last tick
    lights: LightState,

    /// Lane group of the currently active emergency vehicle, if any
    emergency_active: Option<LaneGroup>,

    /// Unscaled wall-clock seconds since simulation start. Drives the
    /// signal cycle even when motion is time-scaled, so slow-motion
    /// playback does not slow the lights.
    elapsed: f32,

    /// Active light control policy (host input)
    policy: Policy,

    /// Positive multiplier on simulated motion and spawn density (host
    /// input)
    time_scale: f32,

    /// Next vehicle ID to assign
    next_id: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    /// Run counters
    pub stats: SimStats,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(rng: Option<StdRng>) -> Self {
        Self {
            vehicles: Vec::new(),
            lights: LightState {
                ns: LightColor::Red,
                ew: LightColor::Red,
            },
            emergency_active: None,
            elapsed: 0.0,
            policy: Policy::FixedTimer,
            time_scale: 1.0,
            next_id: 0,
            rng,
            stats: SimStats::default(),
        }
    }

    pub fn new() -> Self {
        Self::new_internal(None)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(Some(StdRng::seed_from_u64(seed)))
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Select the light control policy (host input)
    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Select the time scale (host input). Must be positive; the host
    /// validates, the engine only documents the expectation.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        debug_assert!(time_scale > 0.0);
        self.time_scale = time_scale;
    }

    /// Wall-clock seconds since simulation start (unscaled)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The post-tick vehicle snapshot
    pub fn vehicles(&self) -> &[SimVehicle] {
        &self.vehicles
    }

    /// Look up a vehicle by ID
    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// The post-tick signal state
    pub fn lights(&self) -> LightState {
        self.lights
    }

    /// Lane group of the active emergency vehicle, if any
    pub fn emergency_active(&self) -> Option<LaneGroup> {
        self.emergency_active
    }

    /// Place a vehicle directly into the world at a given position and
    /// speed. Normal traffic arrives through the spawner; this exists for
    /// scripted scenarios.
    pub fn insert_vehicle(
        &mut self,
        kind: VehicleKind,
        lane: Lane,
        position: Vec2,
        speed: f32,
    ) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;

        let color = match kind {
            VehicleKind::Emergency => VehicleColor::WHITE,
            VehicleKind::Ordinary => VehicleColor {
                hue: 220.0,
                saturation: 80.0,
                lightness: 60.0,
            },
        };

        self.vehicles.push(SimVehicle {
            id,
            kind,
            lane,
            position,
            heading: lane.heading(),
            speed,
            speed_variance: 1.0,
            color,
        });

        self.stats.spawned += 1;
        if kind == VehicleKind::Emergency {
            self.stats.emergency_spawned += 1;
        }
        id
    }

    /// Lane group of the first active emergency vehicle, if any
    fn active_emergency_group(&self) -> Option<LaneGroup> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.kind == VehicleKind::Emergency)
            .map(|vehicle| vehicle.lane.group())
    }

    /// Advance the simulation by one tick.
    ///
    /// `raw_delta_secs` is the wall-clock time since the previous call.
    /// Motion integrates over `min(raw_delta, MAX_TICK_DELTA) * time_scale`
    /// while the signal cycle reads the unclamped, unscaled elapsed clock.
    /// All stop decisions for the tick are computed against the pre-tick
    /// vehicle positions before any position is committed.
    pub fn advance_tick(&mut self, raw_delta_secs: f32) -> LightState {
        self.elapsed += raw_delta_secs;
        let safe_delta = raw_delta_secs.min(MAX_TICK_DELTA);
        let dt = safe_delta * self.time_scale;
        let fps_scale = dt / REFERENCE_FRAME_TIME;

        // Emergency detection drives adaptive preemption
        let emergency = self.active_emergency_group();
        if emergency != self.emergency_active {
            match emergency {
                Some(group) => debug!("emergency vehicle active on {:?} approach", group),
                None => debug!("emergency vehicle cleared the intersection"),
            }
            self.emergency_active = emergency;
        }

        self.lights = phase_colors(self.elapsed, self.policy, emergency);

        // One spawn attempt, guarded against the pre-tick vehicle set
        let candidate_id = VehicleId(self.next_id);
        let outcome = match &mut self.rng {
            Some(rng) => try_spawn(rng, &self.vehicles, self.time_scale, candidate_id),
            None => try_spawn(&mut rand::rng(), &self.vehicles, self.time_scale, candidate_id),
        };
        match outcome {
            SpawnOutcome::Spawned(vehicle) => {
                debug!(
                    "spawned {:?} {:?} on {:?}",
                    vehicle.kind, vehicle.id, vehicle.lane
                );
                self.next_id += 1;
                self.stats.spawned += 1;
                if vehicle.kind == VehicleKind::Emergency {
                    self.stats.emergency_spawned += 1;
                }
                self.vehicles.push(vehicle);
            }
            SpawnOutcome::Blocked => {
                self.stats.spawn_rejected += 1;
            }
            SpawnOutcome::NoAttempt => {}
        }

        // Follow-guard decisions, all computed before any position moves
        let follow_blocked: Vec<bool> = self
            .vehicles
            .iter()
            .map(|vehicle| vehicle.blocked_by_leader(&self.vehicles))
            .collect();

        let lights = self.lights;
        let policy = self.policy;
        let time_scale = self.time_scale;
        for (vehicle, blocked) in self.vehicles.iter_mut().zip(follow_blocked) {
            vehicle.advance(blocked, &lights, policy, time_scale, fps_scale);
        }

        // Removal pass
        let before = self.vehicles.len();
        self.vehicles.retain(|vehicle| {
            if vehicle.should_despawn() {
                debug!("despawned {:?} from {:?}", vehicle.id, vehicle.lane);
                false
            } else {
                true
            }
        });
        self.stats.despawned += before - self.vehicles.len();
        self.stats.record_active(self.vehicles.len());

        self.lights
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!(
            "Elapsed: {:.2}s, policy: {:?}, time scale: {}x",
            self.elapsed, self.policy, self.time_scale
        );
        let preempted = self.emergency_active.is_some() && self.policy == Policy::Adaptive;
        println!(
            "Lights: NS={:?} EW={:?}{}",
            self.lights.ns,
            self.lights.ew,
            if preempted { " (preempted)" } else { "" }
        );
        println!("Active vehicles: {}", self.vehicles.len());
        println!("Totals: {}", self.stats.summary());

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in &self.vehicles {
                println!(
                    "  {:?} {:?} on {:?}: speed={:.2}, position=({:.1}, {:.1})",
                    vehicle.kind,
                    vehicle.id,
                    vehicle.lane,
                    vehicle.speed,
                    vehicle.position.x,
                    vehicle.position.z
                );
            }
        }
    }

    /// Draw a terminal map of the intersection region
    pub fn draw_map(&self) {
        const HALF_EXTENT: f32 = 64.0;
        const COLS: usize = 65;
        const ROWS: usize = 33;

        let col_scale = (COLS - 1) as f32 / (HALF_EXTENT * 2.0);
        let row_scale = (ROWS - 1) as f32 / (HALF_EXTENT * 2.0);

        let mut grid = vec![vec![' '; COLS]; ROWS];
        let center_col = COLS / 2;
        let center_row = ROWS / 2;
        for row in grid.iter_mut() {
            row[center_col] = '|';
        }
        for cell in grid[center_row].iter_mut() {
            *cell = '-';
        }
        grid[center_row][center_col] = '+';

        for vehicle in &self.vehicles {
            let x = vehicle.position.x;
            let z = vehicle.position.z;
            if x.abs() > HALF_EXTENT || z.abs() > HALF_EXTENT {
                continue;
            }
            let col = (((x + HALF_EXTENT) * col_scale) as usize).min(COLS - 1);
            let row = (((z + HALF_EXTENT) * row_scale) as usize).min(ROWS - 1);
            grid[row][col] = match vehicle.kind {
                VehicleKind::Ordinary => 'c',
                VehicleKind::Emergency => 'E',
            };
        }

        println!("=== Intersection Map ===");
        println!("Legend: c=Vehicle, E=Emergency, +=Center");
        println!("NS: {:?}  EW: {:?}", self.lights.ns, self.lights.ew);
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
    }
}
