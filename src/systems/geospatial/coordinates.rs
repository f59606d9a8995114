use cgmath::InnerSpace;

use crate::components::{
    calibration::CalibrationOffset,
    coordinates::{GeoCoordinate, SpherePoint},
};

pub struct CoordinatesSystem {}

impl CoordinatesSystem {
    /// Places a latitude/longitude (degrees) on a sphere of `radius` centred at
    /// the origin, after applying the calibration. The longitude is inverted
    /// after the offset is added, never before.
    ///
    /// Out-of-range angles are not clamped; they wrap through the
    /// trigonometric functions.
    pub fn to_sphere_point(
        lat: f64,
        lng: f64,
        radius: f64,
        offset: &CalibrationOffset,
    ) -> SpherePoint {
        let lat_rad = lat.to_radians() + offset.latitude_offset_radians;
        let mut lng_rad = lng.to_radians() + offset.longitude_offset_radians;
        if offset.invert_longitude {
            lng_rad = -lng_rad;
        }

        let x = radius * lat_rad.cos() * lng_rad.cos();
        let y = radius * lat_rad.sin();
        let z = radius * lat_rad.cos() * lng_rad.sin();

        SpherePoint { x, y, z }
    }

    pub fn coordinate_to_sphere_point(
        coordinate: GeoCoordinate,
        radius: f64,
        offset: &CalibrationOffset,
    ) -> SpherePoint {
        Self::to_sphere_point(coordinate.latitude, coordinate.longitude, radius, offset)
    }

    /// Inverse of [`CoordinatesSystem::to_sphere_point`] for any radius.
    /// Longitude comes back in [-180, 180). Exact only while the calibrated
    /// latitude stays within +-90 degrees, since the sphere cannot tell a
    /// latitude past the pole from its mirror image.
    pub fn to_geo_coordinate(point: SpherePoint, offset: &CalibrationOffset) -> GeoCoordinate {
        let length = cgmath::Vector3::from(point).magnitude();
        if length == 0.0 {
            return GeoCoordinate::default();
        }

        let lat_rad = (point.y / length).clamp(-1.0, 1.0).asin() - offset.latitude_offset_radians;
        let mut lng_rad = point.z.atan2(point.x);
        if offset.invert_longitude {
            lng_rad = -lng_rad;
        }
        lng_rad -= offset.longitude_offset_radians;

        GeoCoordinate::new(lat_rad.to_degrees(), wrap_longitude(lng_rad.to_degrees()))
    }
}

fn wrap_longitude(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
