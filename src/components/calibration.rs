use bevy_ecs::system::Resource;
use serde::{Deserialize, Serialize};

/// Global correction between the texture's prime meridian and the sphere's
/// parametrization. Applied identically to every coordinate conversion.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationOffset {
    pub longitude_offset_radians: f64,
    pub latitude_offset_radians: f64,
    /// Negates the longitude after the offset has been added.
    pub invert_longitude: bool,
}

/// The calibration snapshot the scene places markers with.
#[derive(Resource, Debug, Copy, Clone, Default, PartialEq)]
pub struct Calibration(pub CalibrationOffset);

pub const LONGITUDE_SLIDER_MIN: f64 = -360.0;
pub const LONGITUDE_SLIDER_MAX: f64 = 360.0;
pub const LATITUDE_SLIDER_MIN: f64 = -90.0;
pub const LATITUDE_SLIDER_MAX: f64 = 90.0;
pub const DEFAULT_LONGITUDE_DEGREES: f64 = 199.0;

/// State behind the calibration sliders, kept in degrees the way the user
/// edits it. Setters clamp into the slider ranges.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationControls {
    longitude_degrees: f64,
    latitude_degrees: f64,
    invert_longitude: bool,
}

impl Default for CalibrationControls {
    fn default() -> Self {
        Self {
            longitude_degrees: DEFAULT_LONGITUDE_DEGREES,
            latitude_degrees: 0.0,
            invert_longitude: false,
        }
    }
}

impl CalibrationControls {
    /// Slider positions for an offset that did not come from the sliders.
    pub fn from_offset(offset: &CalibrationOffset) -> Self {
        let mut controls = Self::default();
        controls.set_longitude_degrees(offset.longitude_offset_radians.to_degrees());
        controls.set_latitude_degrees(offset.latitude_offset_radians.to_degrees());
        controls.set_invert_longitude(offset.invert_longitude);
        controls
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude_degrees
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude_degrees
    }

    pub fn invert_longitude(&self) -> bool {
        self.invert_longitude
    }

    pub fn set_longitude_degrees(&mut self, degrees: f64) -> CalibrationOffset {
        self.longitude_degrees = clamp_slider(
            degrees,
            LONGITUDE_SLIDER_MIN,
            LONGITUDE_SLIDER_MAX,
            self.longitude_degrees,
        );
        self.offset()
    }

    pub fn set_latitude_degrees(&mut self, degrees: f64) -> CalibrationOffset {
        self.latitude_degrees = clamp_slider(
            degrees,
            LATITUDE_SLIDER_MIN,
            LATITUDE_SLIDER_MAX,
            self.latitude_degrees,
        );
        self.offset()
    }

    pub fn set_invert_longitude(&mut self, invert: bool) -> CalibrationOffset {
        self.invert_longitude = invert;
        self.offset()
    }

    pub fn offset(&self) -> CalibrationOffset {
        CalibrationOffset {
            longitude_offset_radians: self.longitude_degrees.to_radians(),
            latitude_offset_radians: self.latitude_degrees.to_radians(),
            invert_longitude: self.invert_longitude,
        }
    }
}

// a NaN from the host keeps the previous slider position
fn clamp_slider(value: f64, min: f64, max: f64, previous: f64) -> f64 {
    if value.is_nan() {
        previous
    } else {
        value.clamp(min, max)
    }
}
