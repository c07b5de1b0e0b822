use bytemuck::{Pod, Zeroable};

use super::frame::RenderFrame;

/// Per-particle render data for hosts that read raw f32 memory.
/// 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// 1.0 for moving particles, 0.0 for static points.
    pub active: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-link render data. 8 floats = 32 bytes stride (3 floats of padding).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LinkInstance {
    pub ax: f32,
    pub ay: f32,
    pub bx: f32,
    pub by: f32,
    /// Opacity (1.0 = touching, 0.0 = at the link distance).
    pub alpha: f32,
    pub _pad: [f32; 3],
}

impl LinkInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat buffers built from a [`RenderFrame`], rebuilt every tick.
pub struct RenderBuffer {
    pub particles: Vec<ParticleInstance>,
    pub links: Vec<LinkInstance>,
    pub timings: Vec<f32>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256, 1024)
    }

    pub fn with_capacity(particles: usize, links: usize) -> Self {
        Self {
            particles: Vec::with_capacity(particles),
            links: Vec::with_capacity(links),
            timings: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.links.clear();
        self.timings.clear();
    }

    /// Replace the buffer contents with `frame`, narrowing to f32.
    pub fn rebuild(&mut self, frame: &RenderFrame) {
        self.clear();
        self.particles.extend(frame.particles.iter().map(|p| ParticleInstance {
            x: p.position.x as f32,
            y: p.position.y as f32,
            radius: p.radius as f32,
            active: if p.active { 1.0 } else { 0.0 },
        }));
        self.links.extend(frame.links.iter().map(|l| LinkInstance {
            ax: l.point_a.x as f32,
            ay: l.point_a.y as f32,
            bx: l.point_b.x as f32,
            by: l.point_b.y as f32,
            alpha: l.alpha as f32,
            _pad: [0.0; 3],
        }));
        self.timings.extend(frame.timing_history.iter().map(|&t| t as f32));
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    pub fn link_count(&self) -> u32 {
        self.links.len() as u32
    }

    pub fn timing_count(&self) -> u32 {
        self.timings.len() as u32
    }

    /// Particle data as one flat f32 slice.
    pub fn particle_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Link data as one flat f32 slice.
    pub fn link_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.links)
    }

    /// Raw pointer to particle data for shared-memory reads.
    pub fn particles_ptr(&self) -> *const f32 {
        self.particles.as_ptr() as *const f32
    }

    /// Raw pointer to link data for shared-memory reads.
    pub fn links_ptr(&self) -> *const f32 {
        self.links.as_ptr() as *const f32
    }

    pub fn timings_ptr(&self) -> *const f32 {
        self.timings.as_ptr()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
