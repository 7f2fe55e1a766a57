//! Core types for EcoScan.
//!
//! ## Classification
//! - [`Material`]: closed set of recyclable material categories
//! - [`Confidence`]: model confidence bucket
//! - [`ClassificationRecord`]: the validated classification contract
//!
//! ## Enrichment
//! - [`EnrichmentInfo`]: static disposal metadata for a material
//! - [`CollectionCenter`]: a drop-off location
//! - [`ScanReport`]: classification + enrichment, the outward wire shape

use serde::{Deserialize, Serialize};

/// Maximum length of a coerced `item_name`, in characters.
pub const MAX_ITEM_NAME_CHARS: usize = 40;

/// Item name used whenever the model does not supply a usable one.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";

// ============================================================================
// Classification
// ============================================================================

/// Recyclable material category.
///
/// This is a closed set; anything the model returns outside of it collapses
/// to [`Material::Composite`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Plastic,
    Paper,
    Metal,
    Glass,
    #[serde(rename = "e-waste")]
    EWaste,
    #[default]
    Composite,
    Organic,
}

impl Material {
    /// All material categories, in wire order.
    pub const ALL: [Material; 7] = [
        Material::Plastic,
        Material::Paper,
        Material::Metal,
        Material::Glass,
        Material::EWaste,
        Material::Composite,
        Material::Organic,
    ];

    /// Parse the exact wire name of a material.
    ///
    /// Matching is exact (no case folding); unrecognized names return `None`
    /// and the coercer substitutes the default.
    #[must_use]
    pub fn parse(s: &str) -> Option<Material> {
        match s {
            "plastic" => Some(Material::Plastic),
            "paper" => Some(Material::Paper),
            "metal" => Some(Material::Metal),
            "glass" => Some(Material::Glass),
            "e-waste" => Some(Material::EWaste),
            "composite" => Some(Material::Composite),
            "organic" => Some(Material::Organic),
            _ => None,
        }
    }

    /// Wire name of this material.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Material::Plastic => "plastic",
            Material::Paper => "paper",
            Material::Metal => "metal",
            Material::Glass => "glass",
            Material::EWaste => "e-waste",
            Material::Composite => "composite",
            Material::Organic => "organic",
        }
    }
}

/// Model confidence bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Parse the exact wire name of a confidence bucket.
    #[must_use]
    pub fn parse(s: &str) -> Option<Confidence> {
        match s {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }

    /// Wire name of this confidence bucket.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// A validated classification.
///
/// Invariant: always exactly these four fields, always schema-valid. This is
/// the only value that crosses the classification core's boundary outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Short item name, at most [`MAX_ITEM_NAME_CHARS`] characters, non-empty
    pub item_name: String,
    /// Material category
    pub material: Material,
    /// Whether the item is recyclable
    pub recyclable: bool,
    /// Model confidence
    pub confidence: Confidence,
}

impl ClassificationRecord {
    /// The fixed safe record returned when no valid classification can be
    /// produced.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            item_name: UNKNOWN_ITEM_NAME.to_string(),
            material: Material::Composite,
            recyclable: false,
            confidence: Confidence::Low,
        }
    }
}

// ============================================================================
// Enrichment
// ============================================================================

/// A recycling drop-off location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCenter {
    /// Center name
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

/// Static disposal metadata for a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentInfo {
    /// Resin/packaging identification code
    pub material_code: String,
    /// Points awarded for recycling this material
    pub points_earned: u32,
    /// Disposal instructions
    pub disposal_action: String,
    /// Nearest collection center (static per material, not geolocated)
    pub nearest_center: CollectionCenter,
}

/// Classification plus disposal metadata, the shape returned to callers of
/// the scan endpoint and CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// The validated classification
    #[serde(flatten)]
    pub classification: ClassificationRecord,
    /// Disposal metadata for the classified material
    #[serde(flatten)]
    pub enrichment: EnrichmentInfo,
}
