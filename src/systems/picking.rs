use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};
use tracing::trace;

use super::geospatial::coordinates::CoordinatesSystem;
use crate::components::{
    calibration::CalibrationOffset, camera::Camera, coordinates::GeoCoordinate,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

pub struct PickingSystem {}

impl PickingSystem {
    /// Ray through a pixel, from the near plane towards the far plane.
    /// `None` when the viewport is empty or the camera matrix is singular.
    pub fn screen_ray(
        camera: &Camera,
        position_x: f64,
        position_y: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Option<Ray> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        let (view_proj_matrix, _, _) = camera.build_view_projection_matrix();
        let inverse = view_proj_matrix.invert()?;

        let ndc_x = (position_x * 2.0) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * position_y) / screen_height;

        let near = unproject(&inverse, Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        let far = unproject(&inverse, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

        let direction = far - near;
        if direction.magnitude2() == 0.0 {
            return None;
        }

        Some(Ray {
            origin: near,
            direction: direction.normalize(),
        })
    }

    /// Closest hit in front of the ray origin on a sphere centred at the origin.
    pub fn intersect_sphere(ray: &Ray, radius: f64) -> Option<Point3<f64>> {
        let oc = ray.origin.to_vec();
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - radius * radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        let discriminant_sqrt = discriminant.sqrt();
        let t1 = (-b - discriminant_sqrt) / (2.0 * a);
        let t2 = (-b + discriminant_sqrt) / (2.0 * a);

        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            return None;
        };

        Some(ray.origin + ray.direction * t)
    }

    /// Geographic coordinate under a pixel, on a globe spun by `globe_rotation`
    /// and calibrated with `offset`.
    pub fn pick(
        camera: &Camera,
        position_x: f64,
        position_y: f64,
        screen_width: f64,
        screen_height: f64,
        globe_radius: f64,
        globe_rotation: Matrix4<f64>,
        offset: &CalibrationOffset,
    ) -> Option<GeoCoordinate> {
        let ray = Self::screen_ray(camera, position_x, position_y, screen_width, screen_height)?;
        let hit = Self::intersect_sphere(&ray, globe_radius)?;

        // back into the globe's own frame before undoing the calibration
        let local = globe_rotation.invert()? * hit.to_homogeneous();
        let local = Point3::from_homogeneous(local);
        let coordinate = CoordinatesSystem::to_geo_coordinate(local.into(), offset);

        trace!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "picked globe"
        );
        Some(coordinate)
    }
}

fn unproject(inverse: &Matrix4<f64>, clip: Vector4<f64>) -> Point3<f64> {
    Point3::from_homogeneous(*inverse * clip)
}
