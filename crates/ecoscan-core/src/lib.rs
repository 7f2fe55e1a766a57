//! # ecoscan-core
//!
//! Core types and traits for the EcoScan recycling classification project.
//!
//! EcoScan photographs of household items are classified by a vision model,
//! the model's free-form answer is sanitized into a strict schema, and the
//! result is enriched with static disposal metadata.
//!
//! ## Architecture
//!
//! The crates are organized around a pipeline pattern:
//!
//! ```text
//! image → VisionModel → raw text → Extractor → Coercer → ClassificationRecord
//!                                      ↓ (any failure)
//!                                  fallback record
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ClassificationRecord`] | The validated classification contract |
//! | [`Material`] | Closed set of material categories |
//! | [`Confidence`] | Model confidence bucket |
//! | [`EnrichmentInfo`] | Static disposal metadata |
//! | [`ScanReport`] | Classification + enrichment wire shape |
//! | [`FallbackReason`] | Diagnostic reason a fallback was used |
//!
//! ## Related Crates
//!
//! - `ecoscan-sanitize`: JSON extraction and field coercion
//! - `ecoscan-vision`: `VisionModel` implementations (Gemini, canned)
//! - `ecoscan-enrich`: the material → disposal-metadata table
//! - `ecoscan-classify`: the classification orchestrator

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, ExtractError, FallbackReason, ModelError, Result};
pub use traits::VisionModel;
pub use types::*;
