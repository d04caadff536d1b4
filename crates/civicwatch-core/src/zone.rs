//! Ward geometry: mapping coordinates to administrative zones.
//!
//! Boundary data is a set of latitude bands, a stand-in for real
//! point-in-polygon tests against GIS geometry. Resolution is total:
//! coordinates outside every band, or outside the valid range
//! altogether, resolve to the fallback zone so every report stays
//! assignable.

use serde::{Deserialize, Serialize};

const UNKNOWN_ZONE_NAME: &str = "Unknown Ward";

/// Whether a coordinate pair is finite and within WGS84 range.
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Static display data for one ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// One boundary band: latitudes strictly above `min_latitude` resolve
/// to `zone_id`, unless a higher band claims them first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatitudeBand {
    pub min_latitude: f64,
    pub zone_id: String,
}

/// Immutable ward directory: display data plus boundary bands.
///
/// Loaded once at construction (see `EngineConfig`); never mutated at
/// runtime. Resolution depends only on the inputs and this table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDirectory {
    zones: Vec<Zone>,
    bands: Vec<LatitudeBand>,
    fallback_zone_id: String,
}

impl ZoneDirectory {
    pub fn new(
        zones: Vec<Zone>,
        bands: Vec<LatitudeBand>,
        fallback_zone_id: impl Into<String>,
    ) -> Self {
        Self {
            zones,
            bands,
            fallback_zone_id: fallback_zone_id.into(),
        }
    }

    /// Resolve a coordinate pair to a ward id. Total over all inputs.
    ///
    /// The winning band is the one with the greatest `min_latitude`
    /// still strictly below the latitude; no match means the fallback
    /// zone. `longitude` participates in range validation only; band
    /// geometry is one-dimensional.
    pub fn resolve_zone(&self, latitude: f64, longitude: f64) -> &str {
        if !valid_coordinates(latitude, longitude) {
            return &self.fallback_zone_id;
        }

        let mut best: Option<&LatitudeBand> = None;
        for band in &self.bands {
            if latitude > band.min_latitude
                && best.is_none_or(|current| band.min_latitude > current.min_latitude)
            {
                best = Some(band);
            }
        }

        best.map(|band| band.zone_id.as_str())
            .unwrap_or(&self.fallback_zone_id)
    }

    /// Display name for a ward id, with a fallback for unknown ids.
    pub fn zone_name(&self, zone_id: &str) -> &str {
        self.zones
            .iter()
            .find(|zone| zone.id == zone_id)
            .map(|zone| zone.name.as_str())
            .unwrap_or(UNKNOWN_ZONE_NAME)
    }

    pub fn fallback_zone_id(&self) -> &str {
        &self.fallback_zone_id
    }

    /// Iterate wards in declaration order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }
}

impl Default for ZoneDirectory {
    fn default() -> Self {
        Self {
            zones: vec![
                Zone {
                    id: "ward_001".to_string(),
                    name: "Downtown Central".to_string(),
                },
                Zone {
                    id: "ward_002".to_string(),
                    name: "Suburban North".to_string(),
                },
            ],
            bands: vec![LatitudeBand {
                min_latitude: 0.0,
                zone_id: "ward_002".to_string(),
            }],
            fallback_zone_id: "ward_001".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn northern_latitudes_resolve_to_the_northern_ward() {
        let directory = ZoneDirectory::default();
        assert_eq!(directory.resolve_zone(5.0, 10.0), "ward_002");
        assert_eq!(directory.resolve_zone(0.001, -120.0), "ward_002");
    }

    #[test]
    fn southern_latitudes_resolve_to_the_fallback_ward() {
        let directory = ZoneDirectory::default();
        assert_eq!(directory.resolve_zone(-5.0, 10.0), "ward_001");
        assert_eq!(directory.resolve_zone(0.0, 0.0), "ward_001");
        assert_eq!(directory.resolve_zone(-89.9, 179.9), "ward_001");
    }

    #[test]
    fn out_of_range_coordinates_resolve_to_the_fallback_ward() {
        let directory = ZoneDirectory::default();
        assert_eq!(directory.resolve_zone(91.0, 0.0), "ward_001");
        assert_eq!(directory.resolve_zone(45.0, 181.0), "ward_001");
        assert_eq!(directory.resolve_zone(f64::NAN, 0.0), "ward_001");
        assert_eq!(directory.resolve_zone(f64::INFINITY, 0.0), "ward_001");
    }

    #[test]
    fn resolution_is_total_over_the_valid_range() {
        let directory = ZoneDirectory::default();
        for lat_step in -90..=90 {
            for lon_step in (-180..=180).step_by(45) {
                let zone = directory.resolve_zone(f64::from(lat_step), f64::from(lon_step));
                assert!(!zone.is_empty());
            }
        }
    }

    #[test]
    fn band_order_does_not_affect_resolution() {
        let zones = vec![
            Zone {
                id: "z_south".to_string(),
                name: "South".to_string(),
            },
            Zone {
                id: "z_mid".to_string(),
                name: "Mid".to_string(),
            },
            Zone {
                id: "z_north".to_string(),
                name: "North".to_string(),
            },
        ];
        let band = |min_latitude: f64, zone_id: &str| LatitudeBand {
            min_latitude,
            zone_id: zone_id.to_string(),
        };

        let forward = ZoneDirectory::new(
            zones.clone(),
            vec![band(30.0, "z_north"), band(-30.0, "z_mid")],
            "z_south",
        );
        let reversed = ZoneDirectory::new(
            zones,
            vec![band(-30.0, "z_mid"), band(30.0, "z_north")],
            "z_south",
        );

        for (latitude, expected) in [(50.0, "z_north"), (0.0, "z_mid"), (-50.0, "z_south")] {
            assert_eq!(forward.resolve_zone(latitude, 0.0), expected);
            assert_eq!(reversed.resolve_zone(latitude, 0.0), expected);
        }
    }

    #[test]
    fn zone_name_falls_back_for_unknown_ids() {
        let directory = ZoneDirectory::default();
        assert_eq!(directory.zone_name("ward_002"), "Suburban North");
        assert_eq!(directory.zone_name("ward_999"), "Unknown Ward");
    }
}
