use bevy_ecs::{component::Component, system::Resource};

use super::population::ScaleConfig;

/// The textured sphere markers are placed on.
#[derive(Component, Debug, Copy, Clone)]
pub struct Globe {
    pub radius: f64,
}

/// Additive halo drawn slightly larger than the globe.
#[derive(Component, Debug, Copy, Clone)]
pub struct GlowShell {
    pub scale: f64,
}

#[derive(Component, Debug, Clone)]
pub struct StarField {
    pub positions: Vec<[f32; 3]>,
}

/// Rotation about the Y axis advanced by a fixed step every frame.
#[derive(Component, Debug, Copy, Clone, Default, PartialEq)]
pub struct Spin {
    pub radians_per_frame: f64,
    pub angle: f64,
}

impl Spin {
    pub fn new(radians_per_frame: f64) -> Self {
        Self {
            radians_per_frame,
            angle: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.radians_per_frame).rem_euclid(std::f64::consts::TAU);
    }

    pub fn rotation(&self) -> cgmath::Matrix4<f64> {
        cgmath::Matrix4::from_angle_y(cgmath::Rad(self.angle))
    }
}

/// Placement parameters shared by every marker of the scene.
#[derive(Resource, Debug, Copy, Clone, PartialEq)]
pub struct GlobeSettings {
    pub radius: f64,
    pub scale: ScaleConfig,
}

/// Time of the frame being processed, fed by the host's refresh callback.
#[derive(Resource, Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameClock {
    pub frame: u64,
    pub delta_seconds: f64,
    pub elapsed_seconds: f64,
}

impl FrameClock {
    pub fn tick(&mut self, delta_seconds: f64) {
        // hosts report a negative or NaN delta after a tab was suspended
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.frame += 1;
        self.delta_seconds = delta;
        self.elapsed_seconds += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_accumulates_per_frame_and_wraps() {
        let mut spin = Spin::new(0.002);
        for _ in 0..10 {
            spin.advance();
        }
        assert!((spin.angle - 0.02).abs() < 1e-12);

        let mut fast = Spin::new(4.0);
        fast.advance();
        fast.advance();
        assert!((fast.angle - (8.0 - std::f64::consts::TAU)).abs() < 1e-12);
    }

    #[test]
    fn clock_ignores_invalid_deltas() {
        let mut clock = FrameClock::default();
        clock.tick(0.5);
        clock.tick(-1.0);
        clock.tick(f64::NAN);
        assert_eq!(clock.frame, 3);
        assert_eq!(clock.delta_seconds, 0.0);
        assert_eq!(clock.elapsed_seconds, 0.5);
    }
}
