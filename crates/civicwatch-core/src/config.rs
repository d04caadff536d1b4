//! Engine configuration: the static reference tables.
//!
//! Zones, the responsibility matrix, and the SLA table are explicit,
//! immutable values injected at construction time, not ambient
//! globals. `Default` yields the built-in tables; administrative
//! overrides load from TOML, replacing tables wholesale.

use crate::responsibility::ResponsibilityTable;
use crate::sla::SlaPolicy;
use crate::zone::ZoneDirectory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub zones: ZoneDirectory,
    pub responsibilities: ResponsibilityTable,
    pub sla: SlaPolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Category;
    use insta::assert_snapshot;

    #[test]
    fn default_tables_match_the_published_constants() {
        let config = EngineConfig::default();

        assert_eq!(config.zones.fallback_zone_id(), "ward_001");
        assert_eq!(config.zones.zone_name("ward_001"), "Downtown Central");
        assert_eq!(config.zones.zone_name("ward_002"), "Suburban North");

        let default_assignment = config.responsibilities.default_assignment();
        assert_eq!(default_assignment.department, "General Services");
        assert_eq!(default_assignment.contractor_id, "default_contractor");

        let windows: Vec<String> = Category::ALL
            .iter()
            .map(|category| format!("{category}={}", config.sla.resolution_hours(*category)))
            .collect();
        assert_snapshot!(
            windows.join(" "),
            @"road_damage=72 garbage=48 water_leak=24 broken_infra=96 other=72"
        );
    }

    #[test]
    fn empty_toml_yields_the_default_tables() {
        let config = EngineConfig::from_toml_str("").expect("empty config must parse");
        assert_eq!(config.zones.fallback_zone_id(), "ward_001");
        assert_eq!(config.sla.resolution_hours(Category::Garbage), 48);
    }

    #[test]
    fn toml_overrides_replace_tables_wholesale() {
        let raw = r#"
            [sla]
            acknowledgement_hours = 8
            default_resolution_hours = 36

            [sla.resolution_hours]
            water_leak = 12
        "#;

        let config = EngineConfig::from_toml_str(raw).expect("override config must parse");
        assert_eq!(config.sla.acknowledgement_hours(), 8);
        assert_eq!(config.sla.resolution_hours(Category::WaterLeak), 12);
        // Unlisted categories fall back to the configured default.
        assert_eq!(config.sla.resolution_hours(Category::RoadDamage), 36);
        // Untouched sections keep their defaults.
        assert_eq!(config.zones.fallback_zone_id(), "ward_001");
    }

    #[test]
    fn zone_overrides_parse_from_toml() {
        let raw = r#"
            [zones]
            fallback_zone_id = "ward_a"

            [[zones.zones]]
            id = "ward_a"
            name = "Riverside"

            [[zones.zones]]
            id = "ward_b"
            name = "Hillside"

            [[zones.bands]]
            min_latitude = 10.0
            zone_id = "ward_b"
        "#;

        let config = EngineConfig::from_toml_str(raw).expect("zone config must parse");
        assert_eq!(config.zones.resolve_zone(20.0, 0.0), "ward_b");
        assert_eq!(config.zones.resolve_zone(-20.0, 0.0), "ward_a");
        assert_eq!(config.zones.zone_name("ward_a"), "Riverside");
    }

    #[test]
    fn malformed_toml_surfaces_a_parse_error() {
        let err = EngineConfig::from_toml_str("sla = 3").expect_err("must reject");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
