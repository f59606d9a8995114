use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::{
    components::{calibration::CalibrationControls, coordinates::GeoCoordinate},
    scene::{GlobeScene, SceneConfig},
};

struct WebState {
    scene: GlobeScene,
    controls: CalibrationControls,
}

impl Default for WebState {
    fn default() -> Self {
        let controls = CalibrationControls::default();
        let scene = GlobeScene::new(SceneConfig {
            calibration: controls.offset(),
            ..SceneConfig::default()
        });
        Self { scene, controls }
    }
}

thread_local! {
    static STATE: RefCell<Option<WebState>> = RefCell::new(None);
}

fn with_state<T>(f: impl FnOnce(&mut WebState) -> T) -> T {
    STATE.with(|state| {
        let mut state = state.borrow_mut();
        f(state.get_or_insert_with(WebState::default))
    })
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging();
}

/// Rebuilds the scene from a JSON `SceneConfig`; missing fields use defaults.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = SceneConfig::from_json(config_json).map_err(to_js)?;
    STATE.with(|state| {
        *state.borrow_mut() = Some(WebState {
            controls: CalibrationControls::from_offset(&config.calibration),
            scene: GlobeScene::new(config),
        });
    });
    Ok(())
}

#[wasm_bindgen]
pub fn set_longitude_offset_degrees(degrees: f64) {
    with_state(|s| {
        let offset = s.controls.set_longitude_degrees(degrees);
        s.scene.set_calibration(offset);
    });
}

#[wasm_bindgen]
pub fn set_latitude_offset_degrees(degrees: f64) {
    with_state(|s| {
        let offset = s.controls.set_latitude_degrees(degrees);
        s.scene.set_calibration(offset);
    });
}

#[wasm_bindgen]
pub fn set_invert_longitude(invert: bool) {
    with_state(|s| {
        let offset = s.controls.set_invert_longitude(invert);
        s.scene.set_calibration(offset);
    });
}

/// Loads the country feed. Returns how many countries got a marker.
#[wasm_bindgen]
pub fn load_countries(json: &str) -> Result<usize, JsValue> {
    with_state(|s| s.scene.load_countries_json(json)).map_err(to_js)
}

#[wasm_bindgen]
pub fn set_debug_marker(latitude: f64, longitude: f64) {
    with_state(|s| {
        s.scene
            .set_debug_marker(GeoCoordinate::new(latitude, longitude))
    });
}

#[wasm_bindgen]
pub fn set_viewport(width: f64, height: f64) {
    with_state(|s| s.scene.set_viewport(width, height));
}

/// Call from `requestAnimationFrame`.
#[wasm_bindgen]
pub fn advance_frame(delta_seconds: f64) {
    with_state(|s| s.scene.advance_frame(delta_seconds));
}

/// Flat `MarkerInstance` data: 16 floats of model matrix and 4 of colour each.
#[wasm_bindgen]
pub fn marker_instances() -> Vec<f32> {
    with_state(|s| bytemuck::cast_slice(s.scene.marker_instances().as_slice()).to_vec())
}

#[wasm_bindgen]
pub fn star_positions() -> Vec<f32> {
    with_state(|s| bytemuck::cast_slice(s.scene.star_positions()).to_vec())
}

#[wasm_bindgen]
pub fn globe_model_matrix() -> Vec<f32> {
    with_state(|s| bytemuck::cast_slice(&s.scene.globe_model_matrix()).to_vec())
}

#[wasm_bindgen]
pub fn glow_model_matrix() -> Vec<f32> {
    with_state(|s| bytemuck::cast_slice(&s.scene.glow_model_matrix()).to_vec())
}

#[wasm_bindgen]
pub fn star_field_model_matrix() -> Vec<f32> {
    with_state(|s| bytemuck::cast_slice(&s.scene.star_field_model_matrix()).to_vec())
}

/// View-projection, view and projection matrices, in that order.
#[wasm_bindgen]
pub fn camera_uniform() -> Vec<f32> {
    with_state(|s| bytemuck::cast_slice(&[s.scene.camera_uniform()]).to_vec())
}

/// `[latitude, longitude]` under the pixel, or an empty array on a miss.
#[wasm_bindgen]
pub fn pick(position_x: f64, position_y: f64, width: f64, height: f64) -> Vec<f64> {
    with_state(|s| {
        s.scene
            .pick(position_x, position_y, width, height)
            .map(|c| vec![c.latitude, c.longitude])
            .unwrap_or_default()
    })
}
