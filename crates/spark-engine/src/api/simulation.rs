use crate::api::config::SimulationConfig;
use crate::api::error::{Result, SimulationError};
use crate::api::host::{Clock, FrameScheduler};
use crate::core::geometry::{Rectangle, Vector2};
use crate::core::particle::{Particle, ParticlePool};
use crate::core::quadtree::QuadTree;
use crate::core::rng::Rng;
use crate::core::time::TimingHistory;
use crate::renderer::frame::RenderFrame;
use crate::systems::linking::{link_particles_brute_force, link_particles_indexed, LinkStrategy};
use crate::systems::motion::advance_particles;

/// Whether the controller asks the host for further frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Simulation controller: owns the particle pool and drives one tick per host frame.
///
/// The host supplies a [`FrameScheduler`] (asked for the next frame while
/// running) and a [`Clock`] (used only to time ticks).
pub struct Simulation<S: FrameScheduler, C: Clock> {
    config: SimulationConfig,
    pool: ParticlePool,
    viewport: Rectangle,
    boundary: Rectangle,
    state: RunState,
    strategy: LinkStrategy,
    history: TimingHistory,
    frame: RenderFrame,
    ticks: u64,
    debug: bool,
    scheduler: S,
    clock: C,
}

impl<S: FrameScheduler, C: Clock> Simulation<S, C> {
    /// Build a stopped simulation from `config`. Call `start()` to begin ticking.
    pub fn new(config: SimulationConfig, scheduler: S, clock: C) -> Result<Self> {
        let mut sim = Self {
            config: SimulationConfig::default(),
            pool: ParticlePool::new(0),
            viewport: Rectangle::default(),
            boundary: Rectangle::default(),
            state: RunState::Stopped,
            strategy: LinkStrategy::default(),
            history: TimingHistory::default(),
            frame: RenderFrame::default(),
            ticks: 0,
            debug: false,
            scheduler,
            clock,
        };
        sim.configure(config)?;
        Ok(sim)
    }

    /// Replace the configuration: re-scatter particles, re-place static
    /// points, recompute the boundary. The run state is kept.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;

        let mut rng = Rng::new(config.seed);
        let mut pool = ParticlePool::with_activity(config.particle_count, true);
        pool.randomize(
            Vector2::new(config.viewport_width, config.viewport_height),
            config.distance_to_link,
            config.max_velocity,
            config.max_radius,
            &mut rng,
        );
        for [nx, ny] in &config.static_points {
            pool.push(Particle::fixed_at(Vector2::new(
                config.viewport_width * nx,
                config.viewport_height * ny,
            )));
        }

        self.pool = pool;
        self.history = TimingHistory::new(config.history_capacity);
        self.debug = config.debug;
        self.frame = RenderFrame::default();
        self.config = config;
        self.set_viewport_size(self.config.viewport_width, self.config.viewport_height)?;

        log::info!(
            "configured {} particles and {} static points",
            self.config.particle_count,
            self.config.static_points.len()
        );
        Ok(())
    }

    /// Resize the visible viewport. The wrap boundary (viewport grown by the
    /// link distance on every side) is recomputed and the next tick indexes
    /// against it.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Result<()> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "viewport size must be finite and non-negative, got {}x{}",
                width, height
            )));
        }
        let viewport = Rectangle::new(0.0, 0.0, width, height);
        let boundary = viewport.expanded(self.config.distance_to_link);
        if boundary.width <= 0.0 || boundary.height <= 0.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "viewport {}x{} with link distance {} leaves no room to simulate",
                width, height, self.config.distance_to_link
            )));
        }

        if width == 0.0 || height == 0.0 {
            log::warn!("viewport {}x{} has no area; particles only wrap within the link margin", width, height);
        }

        self.viewport = viewport;
        self.boundary = boundary;
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        log::debug!(
            "viewport {}x{}, boundary [{}, {}] x [{}, {}]",
            width,
            height,
            boundary.left(),
            boundary.right(),
            boundary.top(),
            boundary.bottom()
        );
        Ok(())
    }

    /// Enter `Running` and request the first frame. No-op if already running.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.state = RunState::Running;
        self.scheduler.request_frame();
        log::info!("simulation started");
    }

    /// Enter `Stopped`. The next frame is no longer requested; a tick already
    /// handed to the host still runs if the host calls it.
    pub fn stop(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }
        self.state = RunState::Stopped;
        log::info!("simulation stopped after {} ticks", self.ticks);
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        self.config.debug = debug;
    }

    pub fn set_link_strategy(&mut self, strategy: LinkStrategy) {
        self.strategy = strategy;
    }

    /// Run one simulation step and publish its render frame.
    ///
    /// Moves and wraps every active particle, rebuilds the quad-tree from
    /// scratch, computes link pairs, records the tick duration and, while
    /// running, requests the next frame. Calling this while stopped performs
    /// a single step without scheduling another.
    pub fn tick(&mut self) -> Result<&RenderFrame> {
        let started = self.clock.now_ms();

        advance_particles(self.pool.as_mut_slice(), &self.boundary);

        let particles = self.pool.as_slice();
        let mut tree = QuadTree::new(self.boundary, self.config.tree_capacity)?;
        for (i, particle) in particles.iter().enumerate().filter(|(_, p)| p.active) {
            let inserted = tree.insert(i, particle);
            debug_assert!(
                inserted,
                "particle {} at {:?} escaped boundary {:?}",
                i, particle.position, self.boundary
            );
        }

        let links = &mut self.frame.links;
        links.clear();
        if self.config.linked_particles_enabled {
            match self.strategy {
                LinkStrategy::Indexed => {
                    link_particles_indexed(particles, &tree, self.config.distance_to_link, links)
                }
                LinkStrategy::BruteForce => {
                    link_particles_brute_force(particles, self.config.distance_to_link, links)
                }
            }
        }
        let index_stats = if self.debug { Some(tree.stats()) } else { None };
        drop(tree);

        self.ticks += 1;
        let elapsed = (self.clock.now_ms() - started).max(0.0);
        self.history.push(elapsed);

        self.frame.particles.clear();
        self.frame.particles.extend_from_slice(particles);
        self.frame.timing_history = self.history.to_vec();
        self.frame.debug = self.debug;
        self.frame.index_stats = index_stats;
        self.frame.tick = self.ticks;

        if self.state == RunState::Running {
            self.scheduler.request_frame();
        }
        Ok(&self.frame)
    }

    /// The frame produced by the most recent tick (empty before the first).
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Rectangle {
        self.viewport
    }

    /// Wrap-around rectangle particles move within.
    pub fn boundary(&self) -> Rectangle {
        self.boundary
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Direct access for one-shot setup (e.g. re-scattering); not for use mid-tick.
    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn timing_history(&self) -> &TimingHistory {
        &self.history
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::host::PendingFrame;
    use std::cell::Cell;

    /// Clock that advances a fixed amount every time it is read.
    struct SteppingClock {
        now: Cell<f64>,
        step: f64,
    }

    impl SteppingClock {
        fn new(step: f64) -> Self {
            Self {
                now: Cell::new(0.0),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now_ms(&self) -> f64 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }
    }

    fn sim(config: SimulationConfig) -> Simulation<PendingFrame, SteppingClock> {
        Simulation::new(config, PendingFrame::new(), SteppingClock::new(2.0)).unwrap()
    }

    fn two_particles(distance_to_link: f64) -> Simulation<PendingFrame, SteppingClock> {
        let mut s = sim(SimulationConfig {
            particle_count: 2,
            viewport_width: 100.0,
            viewport_height: 100.0,
            distance_to_link,
            ..Default::default()
        });
        let pool = s.pool_mut().as_mut_slice();
        pool[0].position = Vector2::new(0.0, 0.0);
        pool[1].position = Vector2::new(3.0, 4.0);
        for p in pool.iter_mut() {
            p.velocity = Vector2::ZERO;
        }
        s
    }

    #[test]
    fn new_simulation_is_stopped_and_populated() {
        let s = sim(SimulationConfig {
            particle_count: 30,
            static_points: vec![[0.5, 0.5]],
            ..Default::default()
        });
        assert_eq!(s.state(), RunState::Stopped);
        assert_eq!(s.pool().len(), 31);
        assert_eq!(s.pool().active_count(), 30);
        let fixed = s.pool().get(30).unwrap();
        assert_eq!(fixed.position, Vector2::new(400.0, 300.0));
        assert!(!fixed.active);
        assert_eq!(fixed.radius, 0.0);
        assert!(!s.scheduler().is_requested());
    }

    #[test]
    fn boundary_is_viewport_grown_by_link_distance() {
        let s = sim(SimulationConfig {
            viewport_width: 640.0,
            viewport_height: 480.0,
            distance_to_link: 50.0,
            ..Default::default()
        });
        assert_eq!(s.boundary(), Rectangle::new(-50.0, -50.0, 740.0, 580.0));
        assert_eq!(s.viewport(), Rectangle::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn concrete_pair_links_at_half_alpha() {
        let mut s = two_particles(10.0);
        let frame = s.tick().unwrap();
        assert_eq!(frame.links.len(), 1);
        assert_eq!(frame.links[0].alpha, 0.5);
    }

    #[test]
    fn concrete_pair_at_threshold_is_not_linked() {
        let mut s = two_particles(5.0);
        assert!(s.tick().unwrap().links.is_empty());
    }

    #[test]
    fn linking_disabled_yields_no_links() {
        let mut s = two_particles(10.0);
        s.config.linked_particles_enabled = false;
        assert!(s.tick().unwrap().links.is_empty());
    }

    #[test]
    fn zero_particles_and_zero_distance() {
        let mut s = sim(SimulationConfig {
            particle_count: 0,
            ..Default::default()
        });
        assert!(s.tick().unwrap().is_empty());

        let mut s = sim(SimulationConfig {
            particle_count: 50,
            distance_to_link: 0.0,
            ..Default::default()
        });
        let frame = s.tick().unwrap();
        assert!(frame.links.is_empty());
        assert_eq!(frame.particles.len(), 50);
    }

    #[test]
    fn strategies_agree() {
        let config = SimulationConfig {
            particle_count: 300,
            distance_to_link: 60.0,
            max_velocity: 2.0,
            ..Default::default()
        };
        let mut fast = sim(config.clone());
        let mut slow = sim(config);
        slow.set_link_strategy(LinkStrategy::BruteForce);
        for _ in 0..5 {
            let a = fast.tick().unwrap().links.len();
            let b = slow.tick().unwrap().links.len();
            assert_eq!(a, b);
        }
        assert_eq!(fast.frame().particles, slow.frame().particles);
    }

    #[test]
    fn start_requests_frames_and_stop_halts_them() {
        let mut s = sim(SimulationConfig::default());
        s.start();
        assert!(s.is_running());
        assert!(s.scheduler_mut().take());

        s.tick().unwrap();
        assert!(s.scheduler_mut().take(), "running tick schedules the next one");

        s.stop();
        s.tick().unwrap();
        assert!(!s.scheduler_mut().take(), "stopped tick must not reschedule");
        assert_eq!(s.ticks(), 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut s = sim(SimulationConfig::default());
        s.start();
        s.scheduler_mut().take();
        s.start();
        assert!(!s.scheduler().is_requested());
    }

    #[test]
    fn negative_viewport_is_rejected() {
        let mut s = sim(SimulationConfig::default());
        let before = s.boundary();
        assert!(matches!(
            s.set_viewport_size(-1.0, 100.0),
            Err(SimulationError::InvalidArgument(_))
        ));
        assert_eq!(s.boundary(), before);
    }

    #[test]
    fn resize_moves_the_wrap_boundary() {
        let mut s = sim(SimulationConfig {
            particle_count: 200,
            distance_to_link: 20.0,
            max_velocity: 3.0,
            ..Default::default()
        });
        s.set_viewport_size(200.0, 100.0).unwrap();
        assert_eq!(s.boundary(), Rectangle::new(-20.0, -20.0, 240.0, 140.0));
        // Particles scattered over the old viewport wrap into the new boundary.
        for _ in 0..3 {
            s.tick().unwrap();
        }
        let b = s.boundary();
        assert!(s
            .pool()
            .iter()
            .filter(|p| p.active)
            .all(|p| b.contains_inclusive(p.position)));
    }

    #[test]
    fn timing_history_is_bounded() {
        let mut s = sim(SimulationConfig {
            particle_count: 5,
            history_capacity: 4,
            ..Default::default()
        });
        for _ in 0..10 {
            s.tick().unwrap();
        }
        assert_eq!(s.timing_history().len(), 4);
        assert_eq!(s.frame().timing_history, vec![2.0; 4]);
    }

    #[test]
    fn debug_frames_carry_index_stats() {
        let mut s = sim(SimulationConfig {
            particle_count: 40,
            ..Default::default()
        });
        assert!(s.tick().unwrap().index_stats.is_none());
        s.set_debug(true);
        let frame = s.tick().unwrap();
        assert!(frame.debug);
        assert_eq!(frame.index_stats.map(|st| st.stored), Some(40));
    }

    #[test]
    fn static_points_do_not_move() {
        let mut s = sim(SimulationConfig {
            particle_count: 10,
            static_points: vec![[0.25, 0.75]],
            ..Default::default()
        });
        for _ in 0..20 {
            s.tick().unwrap();
        }
        let fixed = s.frame().particles[10];
        assert_eq!(fixed.position, Vector2::new(200.0, 450.0));
    }

    #[test]
    fn configure_rejects_invalid_settings() {
        let mut s = sim(SimulationConfig::default());
        let bad = SimulationConfig {
            max_radius: 0.1,
            ..Default::default()
        };
        assert!(matches!(
            s.configure(bad),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert_eq!(s.config().max_radius, 2.0);
    }
}
