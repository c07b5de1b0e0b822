use crate::core::particle::Particle;
use crate::core::quadtree::IndexStats;
use crate::systems::linking::Link;

/// Everything the external renderer needs for one tick.
///
/// An owned snapshot taken at the end of the tick, so the renderer never
/// observes particles mid-update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    /// Copy of the particle pool, active and static alike.
    pub particles: Vec<Particle>,
    /// Link pairs for this tick (empty when linking is disabled).
    pub links: Vec<Link>,
    /// Recent tick durations in milliseconds, oldest first.
    pub timing_history: Vec<f64>,
    /// Advisory flag from the host, passed through untouched.
    pub debug: bool,
    /// Shape of this tick's quad-tree, present only in debug mode.
    pub index_stats: Option<IndexStats>,
    /// Tick counter at the time the frame was produced.
    pub tick: u64,
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.links.is_empty()
    }
}
