//! # ecoscan-enrich
//!
//! Static enrichment of validated classifications with disposal metadata.
//!
//! The [`EnrichmentTable`] maps each [`Material`] to its identification
//! code, points award, disposal instructions, and nearest collection center.
//! It is built once at startup, shared by reference into request handlers,
//! and never mutated, so concurrent lookups need no locking.
//!
//! Lookup is total: the composite entry doubles as the table's own fallback,
//! independently of the coercer's guarantee that materials are already
//! members of the closed enum.

use ecoscan_core::{
    ClassificationRecord, CollectionCenter, EnrichmentInfo, Material, ScanReport,
};
use std::collections::HashMap;

/// Immutable material → disposal-metadata table.
pub struct EnrichmentTable {
    entries: HashMap<Material, EnrichmentInfo>,
    fallback: EnrichmentInfo,
}

impl EnrichmentTable {
    /// Build the table with the standard entries.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            Material::Plastic,
            entry(
                "PET 1",
                10,
                "Rinse and place in blue recycling bin",
                "Sunway Pyramid Recycling Center",
                3.0738,
                101.6075,
            ),
        );
        entries.insert(
            Material::Paper,
            entry(
                "PAP 20",
                5,
                "Flatten and place in paper recycling bin",
                "MBPJ Green Center",
                3.1197,
                101.6428,
            ),
        );
        entries.insert(
            Material::Metal,
            entry(
                "ALU 41",
                15,
                "Rinse cans and place in metal recycling bin",
                "MBPJ Green Center",
                3.1197,
                101.6428,
            ),
        );
        entries.insert(
            Material::Glass,
            entry(
                "GL 70",
                8,
                "Rinse and place in glass recycling bin",
                "Sunway Pyramid Recycling Center",
                3.0738,
                101.6075,
            ),
        );
        entries.insert(
            Material::EWaste,
            entry(
                "E-WASTE",
                20,
                "Bring to e-waste collection center",
                "Alam Flora E-Waste Center",
                3.0588,
                101.5494,
            ),
        );
        // The composite entry doubles as the table-level fallback
        let fallback = entry(
            "C/PAP 84",
            5,
            "Check local guidelines for composite materials",
            "One Utama Tetra Pak Drop-off",
            3.1480,
            101.6155,
        );
        entries.insert(Material::Composite, fallback.clone());
        entries.insert(
            Material::Organic,
            entry(
                "ORG",
                0,
                "Compost or dispose in organic waste bin",
                "MBPJ Composting Program",
                3.1197,
                101.6428,
            ),
        );

        Self { entries, fallback }
    }

    /// Disposal metadata for a material.
    ///
    /// Falls back to the composite entry if the material is somehow missing
    /// from the table; lookup never panics.
    #[must_use]
    pub fn get(&self, material: Material) -> &EnrichmentInfo {
        self.entries.get(&material).unwrap_or(&self.fallback)
    }

    /// Attach disposal metadata to a validated classification.
    #[must_use]
    pub fn enrich(&self, record: &ClassificationRecord) -> ScanReport {
        ScanReport {
            classification: record.clone(),
            enrichment: self.get(record.material).clone(),
        }
    }
}

impl Default for EnrichmentTable {
    fn default() -> Self {
        Self::new()
    }
}

fn entry(
    material_code: &str,
    points_earned: u32,
    disposal_action: &str,
    center_name: &str,
    lat: f64,
    lng: f64,
) -> EnrichmentInfo {
    EnrichmentInfo {
        material_code: material_code.to_string(),
        points_earned,
        disposal_action: disposal_action.to_string(),
        nearest_center: CollectionCenter {
            name: center_name.to_string(),
            lat,
            lng,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoscan_core::Confidence;

    #[test]
    fn test_every_material_has_an_entry() {
        let table = EnrichmentTable::new();
        for material in Material::ALL {
            assert!(
                table.entries.contains_key(&material),
                "missing entry for {material:?}"
            );
        }
    }

    #[test]
    fn test_sample_entries() {
        let table = EnrichmentTable::new();

        let plastic = table.get(Material::Plastic);
        assert_eq!(plastic.material_code, "PET 1");
        assert_eq!(plastic.points_earned, 10);

        let ewaste = table.get(Material::EWaste);
        assert_eq!(ewaste.material_code, "E-WASTE");
        assert_eq!(ewaste.points_earned, 20);
        assert_eq!(ewaste.nearest_center.name, "Alam Flora E-Waste Center");

        let organic = table.get(Material::Organic);
        assert_eq!(organic.points_earned, 0);
    }

    #[test]
    fn test_enrich_fallback_record_uses_composite() {
        let table = EnrichmentTable::new();
        let report = table.enrich(&ClassificationRecord::fallback());

        assert_eq!(report.classification.item_name, "Unknown Item");
        assert_eq!(report.enrichment.material_code, "C/PAP 84");
        assert_eq!(report.enrichment.points_earned, 5);
    }

    #[test]
    fn test_enrich_preserves_classification() {
        let table = EnrichmentTable::new();
        let record = ClassificationRecord {
            item_name: "Soda Can".to_string(),
            material: Material::Metal,
            recyclable: true,
            confidence: Confidence::High,
        };

        let report = table.enrich(&record);
        assert_eq!(report.classification, record);
        assert_eq!(report.enrichment.material_code, "ALU 41");
    }

    #[test]
    fn test_enriched_report_serializes_flat() {
        let table = EnrichmentTable::new();
        let report = table.enrich(&ClassificationRecord::fallback());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["item_name"], "Unknown Item");
        assert_eq!(value["material"], "composite");
        assert_eq!(value["material_code"], "C/PAP 84");
        assert_eq!(value["nearest_center"]["name"], "One Utama Tetra Pak Drop-off");
    }
}
