pub mod animation;
pub mod geospatial;
pub mod markers;
pub mod picking;
pub mod starfield;
