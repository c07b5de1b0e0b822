use serde::{Deserialize, Serialize};

use crate::api::error::{Result, SimulationError};
use crate::core::time::DEFAULT_HISTORY_CAPACITY;

/// Simulation settings supplied by the host, once or on re-configure.
/// Field names are camelCase on the wire to match the host page's settings object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Number of moving particles (static points come on top).
    pub particle_count: usize,
    /// Visible viewport width in world units.
    pub viewport_width: f64,
    /// Visible viewport height in world units.
    pub viewport_height: f64,
    /// Particles closer than this are linked. Also the margin around the viewport
    /// inside which particles wrap.
    pub distance_to_link: f64,
    /// Per-axis velocity bound used when scattering particles.
    pub max_velocity: f64,
    /// Upper radius bound used when scattering particles (lower bound is 0.2).
    pub max_radius: f64,
    /// Whether link pairs are computed at all.
    pub linked_particles_enabled: bool,
    /// Decorative fixed points in normalized viewport coordinates `[x, y]`, each in 0..=1.
    pub static_points: Vec<[f64; 2]>,
    /// Quad-tree leaf capacity (default: 4).
    pub tree_capacity: usize,
    /// Number of tick durations kept for diagnostics (default: 200).
    pub history_capacity: usize,
    /// Seed for the particle layout.
    pub seed: u64,
    /// Advisory flag passed through to the render handoff.
    pub debug: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            viewport_width: 800.0,
            viewport_height: 600.0,
            distance_to_link: 100.0,
            max_velocity: 0.5,
            max_radius: 2.0,
            linked_particles_enabled: true,
            static_points: Vec::new(),
            tree_capacity: 4,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            seed: 42,
            debug: false,
        }
    }
}

impl SimulationConfig {
    /// Parse settings from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Check every field is usable. Called by the simulation on (re)configure.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("viewportWidth", self.viewport_width),
            ("viewportHeight", self.viewport_height),
            ("distanceToLink", self.distance_to_link),
            ("maxVelocity", self.max_velocity),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be a finite value >= 0, got {}", name, value)));
            }
        }
        if !self.max_radius.is_finite() || self.max_radius < 0.2 {
            return Err(invalid(format!("maxRadius must be >= 0.2, got {}", self.max_radius)));
        }
        if self.tree_capacity == 0 {
            return Err(invalid("treeCapacity must be at least 1".to_string()));
        }
        let boundary_w = self.viewport_width + self.distance_to_link * 2.0;
        let boundary_h = self.viewport_height + self.distance_to_link * 2.0;
        if boundary_w <= 0.0 || boundary_h <= 0.0 {
            return Err(invalid(format!(
                "simulation boundary is empty ({}x{}); give the viewport or the link distance a size",
                boundary_w, boundary_h
            )));
        }
        for (i, [x, y]) in self.static_points.iter().enumerate() {
            if !(0.0..=1.0).contains(x) || !(0.0..=1.0).contains(y) {
                return Err(invalid(format!(
                    "staticPoints[{}] = [{}, {}] is outside the normalized range 0..=1",
                    i, x, y
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> SimulationError {
    SimulationError::InvalidConfiguration(msg)
}
