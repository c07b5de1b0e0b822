use spark_engine::{
    Clock, PendingFrame, RenderBuffer, Result, Simulation, SimulationConfig,
};

/// Millisecond clock backed by `Date.now()`.
/// `std::time::Instant` is unavailable on `wasm32-unknown-unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Wires the simulation to the browser loop.
///
/// The page owns `requestAnimationFrame`: after each `tick()` it asks
/// `take_frame_request()` whether to schedule another frame. The flat
/// buffers are rebuilt every tick for zero-copy reads from JavaScript.
pub struct SimulationRunner {
    sim: Simulation<PendingFrame, WebClock>,
    render_buffer: RenderBuffer,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let render_buffer = RenderBuffer::with_capacity(
            config.particle_count + config.static_points.len(),
            config.particle_count * 4,
        );
        let sim = Simulation::new(config, PendingFrame::new(), WebClock)?;
        Ok(Self { sim, render_buffer })
    }

    /// Parse JSON settings and build a runner.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(SimulationConfig::from_json(json)?)
    }

    /// Replace the settings on a live runner.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<()> {
        self.sim.configure(config)?;
        self.render_buffer.clear();
        Ok(())
    }

    /// Run one tick and refresh the flat buffers.
    pub fn tick(&mut self) {
        let render_buffer = &mut self.render_buffer;
        let result = self.sim.tick().map(|frame| render_buffer.rebuild(frame));
        if let Err(err) = result {
            log::error!("tick failed: {}", err);
            self.sim.stop();
        }
    }

    pub fn start(&mut self) {
        self.sim.start();
    }

    pub fn stop(&mut self) {
        self.sim.stop();
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Whether the simulation asked for another frame since the last call.
    pub fn take_frame_request(&mut self) -> bool {
        self.sim.scheduler_mut().take()
    }

    /// Apply a (debounced) resize from the page.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.sim.set_viewport_size(width, height)
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.sim.set_debug(debug);
    }

    pub fn debug(&self) -> bool {
        self.sim.debug()
    }

    pub fn ticks(&self) -> u64 {
        self.sim.ticks()
    }

    pub fn simulation(&self) -> &Simulation<PendingFrame, WebClock> {
        &self.sim
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn particles_ptr(&self) -> *const f32 {
        self.render_buffer.particles_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.render_buffer.particle_count()
    }

    pub fn links_ptr(&self) -> *const f32 {
        self.render_buffer.links_ptr()
    }

    pub fn link_count(&self) -> u32 {
        self.render_buffer.link_count()
    }

    pub fn timings_ptr(&self) -> *const f32 {
        self.render_buffer.timings_ptr()
    }

    pub fn timing_count(&self) -> u32 {
        self.render_buffer.timing_count()
    }

    pub fn viewport_width(&self) -> f64 {
        self.sim.viewport().width
    }

    pub fn viewport_height(&self) -> f64 {
        self.sim.viewport().height
    }
}
