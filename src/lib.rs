mod components;
mod scene;
mod systems;
#[cfg(target_arch = "wasm32")]
mod web;

pub use components::{
    calibration::{Calibration, CalibrationControls, CalibrationOffset},
    camera::{Camera, CameraUniform},
    coordinates::{GeoCoordinate, SpherePoint},
    country::Country,
    globe::{FrameClock, GlobeSettings, Spin},
    marker::{MarkerInstance, MarkerPlacement, Pulse},
    population::{PopulationScale, ScaleConfig},
};
pub use scene::{GlobeScene, SceneConfig};
pub use systems::{
    geospatial::{coordinates::CoordinatesSystem, population::PopulationSystem},
    markers::MarkerSystem,
    picking::{PickingSystem, Ray},
    starfield::StarFieldSystem,
};

// scene constants, all in globe units (the globe has radius 1 by default)
pub const GLOBE_RADIUS: f64 = 1.0;
pub const GLOW_SHELL_SCALE: f64 = 1.05;
pub const GLOBE_SPIN_PER_FRAME: f64 = 0.002;

pub const STAR_COUNT: usize = 10_000;
pub const STARFIELD_EXTENT: f32 = 2000.0;
pub const STARFIELD_SPIN_PER_FRAME: f64 = 0.00005;

// country boxes sit slightly above the surface so their base does not clip
pub const MARKER_LIFT: f64 = 0.05;
pub const MARKER_FOOTPRINT_BASE: f64 = 0.03;
pub const MARKER_FOOTPRINT_MIN: f64 = 0.02;
pub const MARKER_DEPTH_FACTOR: f64 = 0.8;
pub const MARKER_COLOR: [f32; 4] = [59.0 / 255.0, 247.0 / 255.0, 1.0, 0.4];

pub const PULSE_PEAK: f64 = 1.4;
pub const PULSE_LEG_SECONDS: f64 = 2.0;
pub const PULSE_MAX_DELAY_SECONDS: f64 = 1.0;

pub const DEBUG_MARKER_LIFT: f64 = 0.02;
pub const DEBUG_MARKER_SIZE: f64 = 0.01;
pub const DEBUG_MARKER_SPIN_PER_FRAME: f64 = 0.01;
pub const DEBUG_MARKER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Mexico City, the suggested landmark when dragging the longitude slider.
pub const DEBUG_REFERENCE: GeoCoordinate = GeoCoordinate {
    latitude: 19.4326,
    longitude: -99.1332,
};

// GPU buffers want f32, the scene math runs in f64
pub fn matrix4_to_array(mat: cgmath::Matrix4<f64>) -> [[f32; 4]; 4] {
    let m: [[f64; 4]; 4] = mat.into();
    m.map(|column| column.map(|value| value as f32))
}

/// Installs the global tracing subscriber for the current target.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            tracing_wasm::set_as_global_default();
        } else {
            // a second call (several tests, an embedding host) keeps the first subscriber
            let _ = tracing_subscriber::fmt()
                .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
                .try_init();
        }
    }
}
