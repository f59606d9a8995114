use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::coordinates::GeoCoordinate;

/// One record of the static country feed. Fields the globe does not use are
/// ignored when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub population: f64,
    /// `[latitude, longitude]` in degrees.
    #[serde(default)]
    pub latlng: Option<Vec<f64>>,
}

impl Country {
    pub fn new(name: impl Into<String>, population: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            population,
            latlng: Some(vec![latitude, longitude]),
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Vec<Country>> {
        serde_json::from_str(json).context("failed to decode country feed")
    }

    /// A country gets a marker only when it carries exactly two coordinates
    /// and neither of them is zero; the feed uses `0` for "unknown".
    pub fn is_placeable(&self) -> bool {
        matches!(self.latlng.as_deref(), Some([lat, lng]) if *lat != 0.0 && *lng != 0.0)
    }

    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        match self.latlng.as_deref() {
            Some([lat, lng]) if self.is_placeable() => Some(GeoCoordinate::new(*lat, *lng)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        { "name": "Mexico", "population": 128932753, "latlng": [23.0, -102.0], "region": "Americas" },
        { "name": "Bouvet Island", "population": 0, "latlng": [-54.4333, 3.4] },
        { "name": "Nowhere", "population": 10 },
        { "name": "Null Island", "population": 1, "latlng": [0, 5] },
        { "name": "Broken", "population": 1, "latlng": [12.0] }
    ]"#;

    #[test]
    fn decodes_feed_and_ignores_unknown_fields() {
        let countries = Country::from_json(FEED).unwrap();
        assert_eq!(countries.len(), 5);
        assert_eq!(countries[0].name, "Mexico");
        assert_eq!(countries[0].population, 128932753.0);
        assert_eq!(countries[2].latlng, None);
    }

    #[test]
    fn keeps_only_countries_with_two_non_zero_coordinates() {
        let placeable: Vec<String> = Country::from_json(FEED)
            .unwrap()
            .into_iter()
            .filter(Country::is_placeable)
            .map(|c| c.name)
            .collect();
        assert_eq!(placeable, vec!["Mexico", "Bouvet Island"]);
    }

    #[test]
    fn coordinate_is_none_for_filtered_records() {
        let countries = Country::from_json(FEED).unwrap();
        assert_eq!(
            countries[0].coordinate(),
            Some(GeoCoordinate::new(23.0, -102.0))
        );
        assert_eq!(countries[3].coordinate(), None);
        assert_eq!(countries[4].coordinate(), None);
    }

    #[test]
    fn malformed_feed_is_an_error() {
        let err = Country::from_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("country feed"));
    }
}
