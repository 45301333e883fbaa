//! Run statistics for the simulation
//!
//! Engine-side bookkeeping only; any throughput or wait-time figures a host
//! dashboard displays are its own business.

/// Counters accumulated over the life of a simulation run
#[derive(Debug, Clone, Copy, Default)]
pub struct SimStats {
    /// Vehicles created by the spawner
    pub spawned: usize,
    /// Emergency vehicles among them
    pub emergency_spawned: usize,
    /// Spawn attempts rejected by the clearance guard
    pub spawn_rejected: usize,
    /// Vehicles that cleared the intersection and left the world
    pub despawned: usize,
    /// Largest number of simultaneously active vehicles seen
    pub peak_active: usize,
}

impl SimStats {
    /// Track the post-tick active count against the running peak
    pub fn record_active(&mut self, active: usize) {
        if active > self.peak_active {
            self.peak_active = active;
        }
    }

    /// One-line summary for console output
    pub fn summary(&self) -> String {
        format!(
            "spawned={} (emergency={}), cleared={}, rejected spawns={}, peak active={}",
            self.spawned,
            self.emergency_spawned,
            self.despawned,
            self.spawn_rejected,
            self.peak_active
        )
    }
}
