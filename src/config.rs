use serde::Serialize;

use crate::services::{comparison_service::DEFAULT_MAX_ROOMS, guest_counter::GuestCounters};

pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8080;

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfig {
    pub host: String,
    pub port: u16,
    /// Used when a booking is not tied to a catalog room.
    pub nightly_rate: f64,
    pub tax_rate: f64,
    pub max_compare_rooms: usize,
    pub max_adults: u32,
    pub max_children: u32,
    pub max_rooms: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            nightly_rate: 295.0,
            tax_rate: 0.09,
            max_compare_rooms: DEFAULT_MAX_ROOMS,
            max_adults: 10,
            max_children: 6,
            max_rooms: 5,
        }
    }
}

impl BookingConfig {
    /// Read settings from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing, unparsable or out-of-range values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|raw| raw.trim().to_string());

        Self {
            host: value("HOST")
                .filter(|host| !host.is_empty())
                .unwrap_or(defaults.host),
            port: parse_as(value("PORT")).unwrap_or(defaults.port),
            nightly_rate: parse_as(value("NIGHTLY_RATE"))
                .filter(|rate: &f64| rate.is_finite() && *rate > 0.0)
                .unwrap_or(defaults.nightly_rate),
            tax_rate: parse_as(value("TAX_RATE"))
                .filter(|rate: &f64| rate.is_finite() && *rate >= 0.0)
                .unwrap_or(defaults.tax_rate),
            max_compare_rooms: parse_as(value("MAX_COMPARE_ROOMS"))
                .filter(|max: &usize| *max > 0)
                .unwrap_or(defaults.max_compare_rooms),
            max_adults: parse_as(value("MAX_ADULTS"))
                .filter(|max: &u32| *max >= 1)
                .unwrap_or(defaults.max_adults),
            max_children: parse_as(value("MAX_CHILDREN")).unwrap_or(defaults.max_children),
            max_rooms: parse_as(value("MAX_ROOMS"))
                .filter(|max: &u32| *max >= 1)
                .unwrap_or(defaults.max_rooms),
        }
    }

    pub fn counters(&self) -> GuestCounters {
        GuestCounters::with_caps(self.max_adults, self.max_children, self.max_rooms)
    }
}

fn parse_as<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::GuestField;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> BookingConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BookingConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.host, HOST);
        assert_eq!(config.port, PORT);
        assert_eq!(config.nightly_rate, 295.0);
        assert_eq!(config.tax_rate, 0.09);
        assert_eq!(config.max_compare_rooms, DEFAULT_MAX_ROOMS);
        assert_eq!(config.counters().limits(GuestField::Adults).max, 10);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", " 9090 "),
            ("NIGHTLY_RATE", "410.5"),
            ("TAX_RATE", "0"),
            ("MAX_COMPARE_ROOMS", "4"),
            ("MAX_ADULTS", "8"),
            ("MAX_CHILDREN", "0"),
            ("MAX_ROOMS", "2"),
        ]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.nightly_rate, 410.5);
        assert_eq!(config.tax_rate, 0.0);
        assert_eq!(config.max_compare_rooms, 4);
        assert_eq!(config.max_adults, 8);
        assert_eq!(config.max_children, 0);
        assert_eq!(config.max_rooms, 2);
        assert_eq!(config.counters().limits(GuestField::Rooms).max, 2);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("NIGHTLY_RATE", "-10"),
            ("TAX_RATE", "NaN"),
            ("MAX_COMPARE_ROOMS", "0"),
            ("MAX_ADULTS", "0"),
            ("MAX_ROOMS", "lots"),
        ]);
        assert_eq!(config.port, PORT);
        assert_eq!(config.nightly_rate, 295.0);
        assert_eq!(config.tax_rate, 0.09);
        assert_eq!(config.max_compare_rooms, DEFAULT_MAX_ROOMS);
        assert_eq!(config.max_adults, 10);
        assert_eq!(config.max_rooms, 5);
    }
}
