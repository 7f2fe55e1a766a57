//! # ecoscan-sanitize
//!
//! Sanitization of untrusted vision-model output for EcoScan.
//!
//! This crate is the hardened boundary between free-form model text and the
//! strict [`ClassificationRecord`](ecoscan_core::ClassificationRecord)
//! contract:
//!
//! - [`extract_json_object`]: isolate one balanced JSON object from text
//!   that may contain prose, markdown fences, or nothing parseable.
//! - [`coerce`]: turn a parsed-but-untrusted value into a schema-valid
//!   record, defaulting every missing, wrong-typed, or out-of-enum field.
//!
//! Extraction can fail (and the orchestrator falls back); coercion never
//! can.

pub mod coerce;
pub mod extract;

pub use coerce::{coerce, Coerced};
pub use extract::extract_json_object;
