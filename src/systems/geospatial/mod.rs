pub mod coordinates;
pub mod population;
