use serde::{Deserialize, Serialize};

/// Bounds of the logarithmic population mapping. Populations are compared
/// by their base-10 logarithm, so `min_pop_log = 4` means 10 000 people.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub min_pop_log: f64,
    pub max_pop_log: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min_pop_log: 4.0,
            max_pop_log: 10.0,
            min_scale: 0.03,
            max_scale: 1.0,
            min_elevation: 0.04,
            max_elevation: 1.2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PopulationScale {
    /// Multiplier for the marker's horizontal size.
    pub footprint_scale: f64,
    /// Height of the marker away from the surface.
    pub elevation: f64,
}
