use bevy_ecs::component::Component;

use super::coordinates::{GeoCoordinate, SpherePoint};
use crate::{PULSE_LEG_SECONDS, PULSE_PEAK};

#[derive(Component, Debug, Clone, PartialEq)]
pub struct CountryMarker {
    pub name: String,
    pub population: f64,
    pub coordinate: GeoCoordinate,
}

/// The red reference sphere used to line the texture up with a known place.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct DebugMarker {
    pub coordinate: GeoCoordinate,
}

/// Where a marker sits in globe space and the extents of its unit mesh.
/// Derived from the marker's coordinate and the current calibration.
#[derive(Component, Debug, Copy, Clone, Default, PartialEq)]
pub struct MarkerPlacement {
    pub position: SpherePoint,
    pub size: [f64; 3],
}

/// Linear yo-yo on the marker's Z scale between 1 and `PULSE_PEAK`.
#[derive(Component, Debug, Copy, Clone, Default, PartialEq)]
pub struct Pulse {
    pub delay_seconds: f64,
    pub elapsed_seconds: f64,
}

impl Pulse {
    pub fn new(delay_seconds: f64) -> Self {
        Self {
            delay_seconds,
            elapsed_seconds: 0.0,
        }
    }

    pub fn advance(&mut self, delta_seconds: f64) {
        self.elapsed_seconds += delta_seconds;
    }

    pub fn z_scale(&self) -> f64 {
        let active = self.elapsed_seconds - self.delay_seconds;
        if active <= 0.0 {
            return 1.0;
        }
        let phase = active.rem_euclid(2.0 * PULSE_LEG_SECONDS) / PULSE_LEG_SECONDS;
        let t = if phase <= 1.0 { phase } else { 2.0 - phase };
        1.0 + (PULSE_PEAK - 1.0) * t
    }
}

// We need this for Rust to store our data correctly for the shaders
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    pub model_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
    }

    #[test]
    fn pulse_waits_for_its_delay() {
        let mut pulse = Pulse::new(0.5);
        pulse.advance(0.4);
        assert_eq!(pulse.z_scale(), 1.0);
    }

    #[test]
    fn pulse_rises_then_falls_linearly() {
        let mut pulse = Pulse::new(0.5);
        pulse.advance(1.5);
        assert_close(pulse.z_scale(), 1.2, 1e-12);
        pulse.advance(1.0);
        assert_close(pulse.z_scale(), PULSE_PEAK, 1e-12);
        pulse.advance(1.0);
        assert_close(pulse.z_scale(), 1.2, 1e-12);
        pulse.advance(1.0);
        assert_close(pulse.z_scale(), 1.0, 1e-12);
        pulse.advance(2.0);
        assert_close(pulse.z_scale(), PULSE_PEAK, 1e-12);
    }

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MarkerInstance>(), 80);
        let instance = MarkerInstance {
            model_matrix: [[0.0; 4]; 4],
            color: [1.0, 0.0, 0.0, 1.0],
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&instance));
        assert_eq!(&floats[16..], &[1.0, 0.0, 0.0, 1.0]);
    }
}
