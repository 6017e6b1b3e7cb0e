use std::env;

use log::warn;

use crate::canvas::viewport::ZoomLimits;
use crate::logic::companion::ProximityThresholds;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_JSON_LIMIT: usize = 256 * 1024;

/// Process-level settings for the layout service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Maximum accepted JSON body size, in bytes.
    pub json_limit: usize,
    /// Seed the plant catalog and companion table at startup.
    pub seed_catalog: bool,
    /// Browser origin allowed to call the API; any origin when unset.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            json_limit: DEFAULT_JSON_LIMIT,
            seed_catalog: true,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// Reads `GARDEN_BIND_ADDR`, `GARDEN_JSON_LIMIT`, `GARDEN_SEED_CATALOG` and
    /// `GARDEN_CORS_ORIGIN`, loading a `.env` file first when one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = lookup("GARDEN_BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.bind_addr);

        let json_limit = match lookup("GARDEN_JSON_LIMIT") {
            None => defaults.json_limit,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    warn!("Ignoring invalid GARDEN_JSON_LIMIT '{raw}', using {}", defaults.json_limit);
                    defaults.json_limit
                }
            },
        };

        let seed_catalog = match lookup("GARDEN_SEED_CATALOG") {
            None => defaults.seed_catalog,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    warn!("Ignoring invalid GARDEN_SEED_CATALOG '{raw}'");
                    defaults.seed_catalog
                }
            },
        };

        let cors_origin = lookup("GARDEN_CORS_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Self { bind_addr, json_limit, seed_catalog, cors_origin }
    }
}

/// Constants of the drawing surface. All lengths are canvas pixels unless
/// noted otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub grid_size: f64,
    /// Smallest bed a gesture may produce, in on-screen pixels.
    pub min_bed_size_px: f64,
    pub plant_radius: f64,
    pub proximity: ProximityThresholds,
    pub zoom: ZoomLimits,
    pub default_fill: String,
    pub default_stroke: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            min_bed_size_px: 20.0,
            plant_radius: 14.0,
            proximity: ProximityThresholds::default(),
            zoom: ZoomLimits::CANVAS,
            default_fill: "#3E2723".into(),
            default_stroke: "#4CAF50".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("GARDEN_BIND_ADDR", "127.0.0.1:9000"),
            ("GARDEN_JSON_LIMIT", "1024"),
            ("GARDEN_SEED_CATALOG", "false"),
            ("GARDEN_CORS_ORIGIN", "http://localhost:5173"),
        ]));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.json_limit, 1024);
        assert!(!config.seed_catalog);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("GARDEN_JSON_LIMIT", "lots"),
            ("GARDEN_SEED_CATALOG", "maybe"),
        ]));
        assert_eq!(config.json_limit, DEFAULT_JSON_LIMIT);
        assert!(config.seed_catalog);
    }
}
