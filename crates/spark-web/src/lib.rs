//! WASM exports for Spark Particles.
//!
//! The page drives the loop:
//!
//! ```js
//! particles_init(JSON.stringify(settings));
//! particles_start();
//! function frame() {
//!     particles_tick();
//!     draw(particles_particles_ptr(), particles_particle_count(),
//!          particles_links_ptr(), particles_link_count());
//!     if (particles_wants_frame()) requestAnimationFrame(frame);
//! }
//! requestAnimationFrame(frame);
//! ```
//!
//! Particle records are 4 floats (x, y, radius, active), link records are
//! 8 floats (ax, ay, bx, by, alpha, pad x3).

pub mod runner;

pub use runner::{SimulationRunner, WebClock};

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimulationRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SimulationRunner) -> R) -> Result<R, JsValue> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Ok(f(runner)),
            None => Err(JsValue::from_str(
                "particles not initialized; call particles_init() first",
            )),
        }
    })
}

fn to_js(err: spark_engine::SimulationError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build (or rebuild) the simulation from a JSON settings object.
#[wasm_bindgen]
pub fn particles_init(settings_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SimulationRunner::from_json(settings_json).map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("spark-particles: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn particles_tick() -> Result<(), JsValue> {
    with_runner(|r| r.tick())
}

#[wasm_bindgen]
pub fn particles_start() -> Result<(), JsValue> {
    with_runner(|r| r.start())
}

#[wasm_bindgen]
pub fn particles_stop() -> Result<(), JsValue> {
    with_runner(|r| r.stop())
}

#[wasm_bindgen]
pub fn particles_is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}

/// True once per requested frame; the page schedules `requestAnimationFrame` on true.
#[wasm_bindgen]
pub fn particles_wants_frame() -> bool {
    with_runner(|r| r.take_frame_request()).unwrap_or(false)
}

/// Debouncing rapid resize events is the page's job.
#[wasm_bindgen]
pub fn particles_set_viewport_size(width: f64, height: f64) -> Result<(), JsValue> {
    with_runner(|r| r.set_viewport_size(width, height))?.map_err(to_js)
}

#[wasm_bindgen]
pub fn particles_set_debug(debug: bool) -> Result<(), JsValue> {
    with_runner(|r| r.set_debug(debug))
}

#[wasm_bindgen]
pub fn particles_debug() -> bool {
    with_runner(|r| r.debug()).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn particles_particles_ptr() -> *const f32 {
    with_runner(|r| r.particles_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn particles_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn particles_links_ptr() -> *const f32 {
    with_runner(|r| r.links_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn particles_link_count() -> u32 {
    with_runner(|r| r.link_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn particles_timings_ptr() -> *const f32 {
    with_runner(|r| r.timings_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn particles_timing_count() -> u32 {
    with_runner(|r| r.timing_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn particles_viewport_width() -> f64 {
    with_runner(|r| r.viewport_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn particles_viewport_height() -> f64 {
    with_runner(|r| r.viewport_height()).unwrap_or(0.0)
}
