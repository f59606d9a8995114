use bevy_ecs::prelude::*;
use cgmath::{InnerSpace, Matrix3, Matrix4, Rad, Vector3};
use tracing::debug;

use super::geospatial::{coordinates::CoordinatesSystem, population::PopulationSystem};
use crate::{
    components::{
        calibration::{Calibration, CalibrationOffset},
        coordinates::GeoCoordinate,
        globe::{GlobeSettings, Spin},
        marker::{CountryMarker, DebugMarker, MarkerInstance, MarkerPlacement, Pulse},
        population::ScaleConfig,
    },
    matrix4_to_array, DEBUG_MARKER_COLOR, DEBUG_MARKER_LIFT, DEBUG_MARKER_SIZE,
    MARKER_COLOR, MARKER_DEPTH_FACTOR, MARKER_FOOTPRINT_BASE, MARKER_FOOTPRINT_MIN,
    MARKER_LIFT,
};

pub struct MarkerSystem {}

impl MarkerSystem {
    /// Box marker for a country: lifted off the surface along the normal,
    /// footprint and depth driven by population.
    pub fn country_placement(
        coordinate: GeoCoordinate,
        population: f64,
        globe_radius: f64,
        offset: &CalibrationOffset,
        scale: &ScaleConfig,
    ) -> MarkerPlacement {
        let position = CoordinatesSystem::coordinate_to_sphere_point(
            coordinate,
            globe_radius + MARKER_LIFT,
            offset,
        );
        let proportions = PopulationSystem::population_to_scale(population, scale);
        let footprint =
            (MARKER_FOOTPRINT_BASE * proportions.footprint_scale).max(MARKER_FOOTPRINT_MIN);

        MarkerPlacement {
            position,
            size: [footprint, footprint, proportions.elevation * MARKER_DEPTH_FACTOR],
        }
    }

    pub fn debug_placement(
        coordinate: GeoCoordinate,
        globe_radius: f64,
        offset: &CalibrationOffset,
    ) -> MarkerPlacement {
        MarkerPlacement {
            position: CoordinatesSystem::coordinate_to_sphere_point(
                coordinate,
                globe_radius + DEBUG_MARKER_LIFT,
                offset,
            ),
            size: [DEBUG_MARKER_SIZE; 3],
        }
    }

    /// Rotation whose local +Z points from `position` to the globe centre.
    pub fn orientation(position: Vector3<f64>) -> Matrix3<f64> {
        let forward = if position.magnitude2() > 0.0 {
            -position.normalize()
        } else {
            -Vector3::unit_z()
        };

        // straight above a pole the Y up vector is parallel to forward
        let mut right = Vector3::unit_y().cross(forward);
        if right.magnitude2() < 1e-12 {
            right = Vector3::unit_z().cross(forward);
        }
        let right = right.normalize();
        let up = forward.cross(right);

        Matrix3::from_cols(right, up, forward)
    }

    /// Model matrix of a marker riding a spinning globe.
    pub fn model_matrix(
        placement: &MarkerPlacement,
        globe_rotation: Matrix4<f64>,
        self_spin: f64,
        z_scale: f64,
    ) -> Matrix4<f64> {
        let [sx, sy, sz] = placement.size;
        globe_rotation
            * Matrix4::from_translation(placement.position.into())
            * Matrix4::from(Self::orientation(placement.position.into()))
            * Matrix4::from_angle_y(Rad(self_spin))
            * Matrix4::from_nonuniform_scale(sx, sy, sz * z_scale)
    }

    pub fn country_instance(
        placement: &MarkerPlacement,
        pulse: Option<&Pulse>,
        globe_rotation: Matrix4<f64>,
    ) -> MarkerInstance {
        let z_scale = pulse.map_or(1.0, Pulse::z_scale);
        MarkerInstance {
            model_matrix: matrix4_to_array(Self::model_matrix(
                placement,
                globe_rotation,
                0.0,
                z_scale,
            )),
            color: MARKER_COLOR,
        }
    }

    pub fn debug_instance(
        placement: &MarkerPlacement,
        spin: Option<&Spin>,
        globe_rotation: Matrix4<f64>,
    ) -> MarkerInstance {
        let angle = spin.map_or(0.0, |spin| spin.angle);
        MarkerInstance {
            model_matrix: matrix4_to_array(Self::model_matrix(
                placement,
                globe_rotation,
                angle,
                1.0,
            )),
            color: DEBUG_MARKER_COLOR,
        }
    }
}

/// Re-places markers whose coordinate is new or changed, and every marker
/// once the calibration or globe settings change.
pub fn place_markers(
    calibration: Res<Calibration>,
    settings: Res<GlobeSettings>,
    mut countries: Query<(Ref<CountryMarker>, &mut MarkerPlacement), Without<DebugMarker>>,
    mut debug_markers: Query<(Ref<DebugMarker>, &mut MarkerPlacement), Without<CountryMarker>>,
) {
    let recalibrated = calibration.is_changed() || settings.is_changed();
    if recalibrated {
        debug!(offset = ?calibration.0, "calibration changed, re-placing markers");
    }

    for (marker, mut placement) in &mut countries {
        if recalibrated || marker.is_changed() {
            *placement = MarkerSystem::country_placement(
                marker.coordinate,
                marker.population,
                settings.radius,
                &calibration.0,
                &settings.scale,
            );
        }
    }

    for (marker, mut placement) in &mut debug_markers {
        if recalibrated || marker.is_changed() {
            *placement =
                MarkerSystem::debug_placement(marker.coordinate, settings.radius, &calibration.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Transform};

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
    }

    fn settings() -> GlobeSettings {
        GlobeSettings {
            radius: 1.0,
            scale: ScaleConfig::default(),
        }
    }

    #[test]
    fn country_marker_sits_above_the_surface() {
        let offset = CalibrationOffset::default();
        let placement = MarkerSystem::country_placement(
            GeoCoordinate::new(23.0, -102.0),
            128_932_753.0,
            1.0,
            &offset,
            &ScaleConfig::default(),
        );
        assert_close(placement.position.length(), 1.0 + MARKER_LIFT, 1e-12);

        let surface = CoordinatesSystem::to_sphere_point(23.0, -102.0, 1.0, &offset);
        let direction = Vector3::from(surface).normalize();
        assert!(Vector3::from(placement.position).normalize().dot(direction) > 1.0 - 1e-12);
    }

    #[test]
    fn footprint_never_drops_below_the_minimum() {
        let offset = CalibrationOffset::default();
        let tiny = MarkerSystem::country_placement(
            GeoCoordinate::new(-54.4, 3.4),
            0.0,
            1.0,
            &offset,
            &ScaleConfig::default(),
        );
        assert_eq!(tiny.size[0], MARKER_FOOTPRINT_MIN);
        assert_close(tiny.size[2], 0.04 * MARKER_DEPTH_FACTOR, 1e-12);

        let huge = MarkerSystem::country_placement(
            GeoCoordinate::new(35.0, 105.0),
            1.4e9,
            1.0,
            &offset,
            &ScaleConfig::default(),
        );
        assert!(huge.size[0] > MARKER_FOOTPRINT_MIN);
        assert!(huge.size[2] > tiny.size[2]);
    }

    #[test]
    fn orientation_points_local_z_at_the_centre() {
        for position in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.3, -0.8, 0.5),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -2.0, 0.0),
        ] {
            let rotation = MarkerSystem::orientation(position);
            let forward = rotation.z;
            let expected = -position.normalize();
            assert_close(forward.dot(expected), 1.0, 1e-12);
            assert_close(rotation.determinant(), 1.0, 1e-12);
            assert_close(rotation.x.dot(rotation.y), 0.0, 1e-12);
            assert_close(rotation.x.magnitude(), 1.0, 1e-12);
        }
    }

    #[test]
    fn model_matrix_follows_the_globe_spin() {
        let placement = MarkerSystem::debug_placement(
            GeoCoordinate::new(0.0, 0.0),
            1.0,
            &CalibrationOffset::default(),
        );
        let spin = Spin {
            radians_per_frame: 0.0,
            angle: std::f64::consts::FRAC_PI_2,
        };
        let model = MarkerSystem::model_matrix(&placement, spin.rotation(), 0.0, 1.0);
        let centre = model.transform_point(cgmath::Point3::new(0.0, 0.0, 0.0));
        // a quarter turn about +Y carries +X onto -Z
        assert_close(centre.x, 0.0, 1e-12);
        assert_close(centre.z, -(1.0 + DEBUG_MARKER_LIFT), 1e-12);
    }

    #[test]
    fn placement_system_reacts_to_new_markers_and_calibration() {
        let mut world = World::new();
        world.insert_resource(Calibration::default());
        world.insert_resource(settings());
        let country = world
            .spawn((
                CountryMarker {
                    name: "Mexico".to_string(),
                    population: 128_932_753.0,
                    coordinate: GeoCoordinate::new(23.0, -102.0),
                },
                MarkerPlacement::default(),
            ))
            .id();
        let debug = world
            .spawn((
                DebugMarker {
                    coordinate: GeoCoordinate::new(0.0, 0.0),
                },
                MarkerPlacement::default(),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(place_markers);
        schedule.run(&mut world);

        let placed = *world.get::<MarkerPlacement>(country).unwrap();
        assert_close(placed.position.length(), 1.0 + MARKER_LIFT, 1e-12);
        let debug_placed = *world.get::<MarkerPlacement>(debug).unwrap();
        assert_close(debug_placed.position.x, 1.0 + DEBUG_MARKER_LIFT, 1e-12);

        let offset = CalibrationOffset {
            longitude_offset_radians: std::f64::consts::FRAC_PI_2,
            latitude_offset_radians: 0.0,
            invert_longitude: false,
        };
        world.insert_resource(Calibration(offset));
        schedule.run(&mut world);

        let debug_moved = *world.get::<MarkerPlacement>(debug).unwrap();
        assert_close(debug_moved.position.x, 0.0, 1e-12);
        assert_close(debug_moved.position.z, 1.0 + DEBUG_MARKER_LIFT, 1e-12);
        assert_ne!(*world.get::<MarkerPlacement>(country).unwrap(), placed);
    }

    #[test]
    fn instances_carry_marker_colours() {
        let placement = MarkerSystem::debug_placement(
            GeoCoordinate::new(10.0, 20.0),
            1.0,
            &CalibrationOffset::default(),
        );
        let identity = Matrix4::identity();
        let debug = MarkerSystem::debug_instance(&placement, None, identity);
        let country = MarkerSystem::country_instance(&placement, Some(&Pulse::new(0.0)), identity);
        assert_eq!(debug.color, DEBUG_MARKER_COLOR);
        assert_eq!(country.color, MARKER_COLOR);
        assert_eq!(debug.model_matrix, country.model_matrix);
    }
}
