//! Responsibility matrix: (ward, category) to accountable party.
//!
//! Lookups are total. An unknown ward or an unmapped category falls
//! back to the default assignment so no report is ever unroutable.

use crate::issue::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UNKNOWN_CONTRACTOR_NAME: &str = "Unknown Contractor";

/// The accountable (department, contractor) pair for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsibility {
    pub department: String,
    pub contractor_id: String,
}

impl Responsibility {
    pub fn new(department: impl Into<String>, contractor_id: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            contractor_id: contractor_id.into(),
        }
    }
}

/// Immutable assignment matrix plus the contractor display directory.
///
/// Loaded once at construction (see `EngineConfig`); read-only
/// thereafter. Table updates are an administrative concern outside the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsibilityTable {
    assignments: BTreeMap<String, BTreeMap<Category, Responsibility>>,
    default_assignment: Responsibility,
    contractors: BTreeMap<String, String>,
}

impl ResponsibilityTable {
    pub fn new(
        assignments: BTreeMap<String, BTreeMap<Category, Responsibility>>,
        default_assignment: Responsibility,
        contractors: BTreeMap<String, String>,
    ) -> Self {
        Self {
            assignments,
            default_assignment,
            contractors,
        }
    }

    /// Resolve the accountable party for a (ward, category) pair.
    /// Total: unknown wards and unmapped categories get the default.
    pub fn resolve(&self, zone_id: &str, category: Category) -> &Responsibility {
        self.assignments
            .get(zone_id)
            .and_then(|mappings| mappings.get(&category))
            .unwrap_or(&self.default_assignment)
    }

    /// Display name for a contractor id, with a fallback for unknown ids.
    pub fn contractor_name(&self, contractor_id: &str) -> &str {
        self.contractors
            .get(contractor_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CONTRACTOR_NAME)
    }

    pub fn default_assignment(&self) -> &Responsibility {
        &self.default_assignment
    }
}

impl Default for ResponsibilityTable {
    fn default() -> Self {
        let ward_mappings = |suffix: &str| {
            BTreeMap::from([
                (
                    Category::RoadDamage,
                    Responsibility::new("Public Works", format!("cont_road_{suffix}")),
                ),
                (
                    Category::Garbage,
                    Responsibility::new("Sanitation", format!("cont_waste_{suffix}")),
                ),
                (
                    Category::WaterLeak,
                    Responsibility::new("Water Supply", format!("cont_water_{suffix}")),
                ),
                (
                    Category::BrokenInfra,
                    Responsibility::new("Urban Development", format!("cont_infra_{suffix}")),
                ),
                (
                    Category::Other,
                    Responsibility::new("General Maintenance", format!("cont_gen_{suffix}")),
                ),
            ])
        };

        let assignments = BTreeMap::from([
            ("ward_001".to_string(), ward_mappings("01")),
            ("ward_002".to_string(), ward_mappings("02")),
        ]);

        let contractors = BTreeMap::from(
            [
                ("cont_road_01", "Metro Paving Co."),
                ("cont_waste_01", "CleanCity Solutions"),
                ("cont_water_01", "AquaFlow Utilities"),
                ("cont_infra_01", "Urban Build Ltd."),
                ("cont_gen_01", "CityCare Services"),
                ("cont_road_02", "North Road Maintenance"),
                ("cont_waste_02", "GreenWaste Management"),
                ("cont_water_02", "PureWater Systems"),
                ("cont_infra_02", "Skyline Construction"),
                ("cont_gen_02", "Regional Maintenance"),
            ]
            .map(|(id, name)| (id.to_string(), name.to_string())),
        );

        Self {
            assignments,
            default_assignment: Responsibility::new("General Services", "default_contractor"),
            contractors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_resolve_to_their_assignment() {
        let table = ResponsibilityTable::default();

        let road = table.resolve("ward_001", Category::RoadDamage);
        assert_eq!(road.department, "Public Works");
        assert_eq!(road.contractor_id, "cont_road_01");

        let leak = table.resolve("ward_002", Category::WaterLeak);
        assert_eq!(leak.department, "Water Supply");
        assert_eq!(leak.contractor_id, "cont_water_02");
    }

    #[test]
    fn unknown_ward_falls_back_to_the_default_assignment() {
        let table = ResponsibilityTable::default();
        let assignment = table.resolve("ward_999", Category::Garbage);
        assert_eq!(assignment.department, "General Services");
        assert_eq!(assignment.contractor_id, "default_contractor");
    }

    #[test]
    fn every_ward_category_pair_resolves() {
        let table = ResponsibilityTable::default();
        for zone_id in ["ward_001", "ward_002", "ward_unmapped", ""] {
            for category in Category::ALL {
                let assignment = table.resolve(zone_id, category);
                assert!(!assignment.department.is_empty());
                assert!(!assignment.contractor_id.is_empty());
            }
        }
    }

    #[test]
    fn contractor_name_falls_back_for_unknown_ids() {
        let table = ResponsibilityTable::default();
        assert_eq!(table.contractor_name("cont_water_01"), "AquaFlow Utilities");
        assert_eq!(table.contractor_name("cont_missing"), "Unknown Contractor");
    }
}
