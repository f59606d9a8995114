use cgmath::{InnerSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A geographic position in degrees, north and east positive.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A cartesian position on (or just outside) the globe. Y points to the
/// north pole, X to longitude 0 and Z to longitude 90 east before any
/// calibration is applied.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpherePoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        Vector3::from(*self).magnitude()
    }
}

impl From<SpherePoint> for Vector3<f64> {
    fn from(point: SpherePoint) -> Self {
        Vector3::new(point.x, point.y, point.z)
    }
}

impl From<SpherePoint> for Point3<f64> {
    fn from(point: SpherePoint) -> Self {
        Point3::new(point.x, point.y, point.z)
    }
}

impl From<Vector3<f64>> for SpherePoint {
    fn from(vector: Vector3<f64>) -> Self {
        SpherePoint::new(vector.x, vector.y, vector.z)
    }
}

impl From<Point3<f64>> for SpherePoint {
    fn from(point: Point3<f64>) -> Self {
        SpherePoint::new(point.x, point.y, point.z)
    }
}
