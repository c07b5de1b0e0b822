pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::SimulationConfig;
pub use api::error::{Result, SimulationError};
pub use api::host::{Clock, FrameScheduler, PendingFrame};
pub use api::simulation::{RunState, Simulation};
pub use core::geometry::{Circle, Rectangle, Vector2};
pub use core::particle::{Particle, ParticlePool};
pub use core::quadtree::{IndexStats, ParticleRef, QuadTree, MAX_DEPTH};
pub use core::rng::Rng;
pub use core::time::{SystemClock, TimingHistory, DEFAULT_HISTORY_CAPACITY};
pub use renderer::frame::RenderFrame;
pub use renderer::instance::{LinkInstance, ParticleInstance, RenderBuffer};
pub use systems::linking::{link_particles_brute_force, link_particles_indexed, Link, LinkStrategy};
pub use systems::motion::{advance_particles, step_particle, wrap_position};
