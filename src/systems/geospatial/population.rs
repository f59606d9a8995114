use crate::components::population::{PopulationScale, ScaleConfig};

pub struct PopulationSystem {}

impl PopulationSystem {
    /// Maps a head count onto marker proportions through its base-10
    /// logarithm. Populations below one count as one; results saturate at the
    /// configured bounds instead of extrapolating.
    pub fn population_to_scale(population: f64, config: &ScaleConfig) -> PopulationScale {
        let pop_log = population.max(1.0).log10();
        let t = Self::saturation(pop_log, config);

        PopulationScale {
            footprint_scale: lerp(config.min_scale, config.max_scale, t),
            elevation: lerp(config.min_elevation, config.max_elevation, t),
        }
    }

    fn saturation(pop_log: f64, config: &ScaleConfig) -> f64 {
        let span = config.max_pop_log - config.min_pop_log;
        if span <= 0.0 {
            return if pop_log >= config.max_pop_log { 1.0 } else { 0.0 };
        }
        ((pop_log - config.min_pop_log) / span).clamp(0.0, 1.0)
    }
}

// exact at both ends, so saturated values equal the configured bounds
fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(population: f64) -> PopulationScale {
        PopulationSystem::population_to_scale(population, &ScaleConfig::default())
    }

    #[test]
    fn small_populations_saturate_at_the_minimum() {
        let config = ScaleConfig::default();
        let s = scale(10.0);
        assert_eq!(s.footprint_scale, config.min_scale);
        assert_eq!(s.elevation, config.min_elevation);
        assert_eq!(scale(5_000.0), s);
    }

    #[test]
    fn large_populations_saturate_at_the_maximum() {
        let config = ScaleConfig::default();
        let s = scale(1e12);
        assert_eq!(s.footprint_scale, config.max_scale);
        assert_eq!(s.elevation, config.max_elevation);
        assert_eq!(scale(f64::INFINITY), s);
    }

    #[test]
    fn zero_and_negative_populations_count_as_one() {
        assert_eq!(scale(0.0), scale(1.0));
        assert_eq!(scale(-5.0), scale(1.0));
        assert_eq!(scale(f64::NAN), scale(1.0));
    }

    #[test]
    fn midpoint_of_the_log_range_is_halfway() {
        let s = scale(1e7);
        assert!((s.footprint_scale - 0.515).abs() < 1e-12);
        assert!((s.elevation - 0.62).abs() < 1e-12);
    }

    #[test]
    fn scale_grows_with_population() {
        let mut previous = scale(1e4);
        let mut population = 1e4;
        while population <= 1e10 {
            let current = scale(population);
            assert!(current.footprint_scale >= previous.footprint_scale);
            assert!(current.elevation >= previous.elevation);
            previous = current;
            population *= 1.7;
        }
    }

    #[test]
    fn outputs_stay_within_configured_bounds() {
        let config = ScaleConfig {
            min_pop_log: 2.0,
            max_pop_log: 6.0,
            min_scale: 0.1,
            max_scale: 0.5,
            min_elevation: 0.2,
            max_elevation: 0.3,
        };
        for exponent in 0..20 {
            let s = PopulationSystem::population_to_scale(10f64.powi(exponent), &config);
            assert!((0.1..=0.5).contains(&s.footprint_scale));
            assert!((0.2..=0.3).contains(&s.elevation));
        }
    }

    #[test]
    fn degenerate_range_steps_instead_of_dividing_by_zero() {
        let config = ScaleConfig {
            min_pop_log: 5.0,
            max_pop_log: 5.0,
            ..ScaleConfig::default()
        };
        let below = PopulationSystem::population_to_scale(99_999.0, &config);
        let above = PopulationSystem::population_to_scale(100_001.0, &config);
        assert_eq!(below.footprint_scale, config.min_scale);
        assert_eq!(above.footprint_scale, config.max_scale);
    }
}
