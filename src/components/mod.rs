pub mod calibration;
pub mod camera;
pub mod coordinates;
pub mod country;
pub mod globe;
pub mod marker;
pub mod population;
