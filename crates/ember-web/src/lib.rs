//! Browser bridge for the ember editor.
//!
//! The TypeScript front end calls `editor_init` once, `editor_tick` every
//! animation frame, then reads `get_instance_count()` instances of
//! `ParticleInstance::FLOATS` floats starting at `get_instances_ptr()`
//! straight out of WASM memory.

pub mod runner;

pub use runner::EditorRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<EditorRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner; `None` until `editor_init` has succeeded.
fn with_runner<R>(f: impl FnOnce(&mut EditorRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn to_js_error(err: ember::ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn editor_init(config_json: &str, seed: u32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = EditorRunner::from_json(config_json, u64::from(seed)).map_err(to_js_error)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("ember-web: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn editor_load_config(config_json: &str) -> Result<(), JsValue> {
    match with_runner(|r| r.load_config(config_json)) {
        Some(result) => result.map_err(to_js_error),
        None => Err(JsValue::from_str("editor not initialized; call editor_init() first")),
    }
}

#[wasm_bindgen]
pub fn editor_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn editor_set_origin(x: f32, y: f32) {
    with_runner(|r| r.set_origin(x, y));
}

#[wasm_bindgen]
pub fn editor_set_active(active: bool) {
    with_runner(|r| r.set_active(active));
}

#[wasm_bindgen]
pub fn editor_set_sprite_extent(width: f32, height: f32) {
    with_runner(|r| r.set_sprite_extent(width, height));
}

#[wasm_bindgen]
pub fn editor_burst(count: u32) -> u32 {
    with_runner(|r| r.burst(count)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn editor_reset() {
    with_runner(|r| r.reset());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    ember::ParticleInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_live_count() -> u32 {
    with_runner(|r| r.live_count()).unwrap_or(0)
}
