//! Particle records and the fixed-length pool that owns them.

use crate::api::error::{Result, SimulationError};
use crate::core::geometry::Vector2;
use crate::core::rng::Rng;

/// A single point-like particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f64,
    /// Inactive particles keep their slot but are neither moved nor linked.
    pub active: bool,
}

impl Particle {
    pub const DEFAULT_RADIUS: f64 = 2.0;
    /// Lower bound of the radius drawn by [`ParticlePool::randomize`].
    pub const MIN_RANDOM_RADIUS: f64 = 0.2;

    pub fn new(active: bool) -> Self {
        Particle {
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            radius: Self::DEFAULT_RADIUS,
            active,
        }
    }

    /// A decorative point that stays put: inactive, zero radius.
    pub fn fixed_at(position: Vector2) -> Self {
        Particle {
            position,
            velocity: Vector2::ZERO,
            radius: 0.0,
            active: false,
        }
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Owned sequence of particles whose length only changes through `resize`/`push`.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    default_active: bool,
}

impl ParticlePool {
    /// Pool of `size` default particles, inactive by default.
    pub fn new(size: usize) -> Self {
        Self::with_activity(size, false)
    }

    /// Pool of `size` default particles whose `active` flag is `default_active`.
    pub fn with_activity(size: usize, default_active: bool) -> Self {
        let mut pool = Self {
            particles: Vec::with_capacity(size),
            default_active,
        };
        pool.particles.resize(size, Particle::new(default_active));
        pool
    }

    /// Overwrite slots `[min, max)` with freshly default-constructed particles.
    pub fn init_range(&mut self, min: usize, max: usize) -> Result<()> {
        if min > max || max > self.particles.len() {
            return Err(SimulationError::InvalidArgument(format!(
                "init range [{}, {}) out of bounds for pool of {}",
                min,
                max,
                self.particles.len()
            )));
        }
        self.fill_fresh(min, max);
        Ok(())
    }

    fn fill_fresh(&mut self, min: usize, max: usize) {
        let fresh = Particle::new(self.default_active);
        self.particles[min..max].fill(fresh);
    }

    /// Truncate or grow to `new_size`. Grown slots are always freshly initialized.
    pub fn resize(&mut self, new_size: usize) {
        let old_size = self.particles.len();
        if old_size == new_size {
            return;
        }
        if new_size < old_size {
            self.particles.truncate(new_size);
            return;
        }
        self.particles.resize(new_size, Particle::default());
        self.fill_fresh(old_size, new_size);
    }

    /// Scatter every particle uniformly over `bounds` padded by `offset`,
    /// with per-axis velocity in `[-max_velocity, max_velocity]` and radius in
    /// `[0.2, max_radius]`.
    pub fn randomize(
        &mut self,
        bounds: Vector2,
        offset: f64,
        max_velocity: f64,
        max_radius: f64,
        rng: &mut Rng,
    ) {
        for p in &mut self.particles {
            p.position = Vector2::new(
                rng.range(-offset, bounds.x + offset),
                rng.range(-offset, bounds.y + offset),
            );
            p.velocity = Vector2::new(
                rng.range_inclusive(-max_velocity, max_velocity),
                rng.range_inclusive(-max_velocity, max_velocity),
            );
            p.radius = rng.range_inclusive(Particle::MIN_RANDOM_RADIUS, max_radius);
        }
    }

    /// Append one particle, e.g. a static decorative point.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Number of particles subject to motion and linking.
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }
}
