//! # ecoscan-classify
//!
//! The classification orchestrator for EcoScan.
//!
//! ```text
//! image (base64) → VisionModel::generate → extract_json_object → coerce
//!        ↓ any failure                                             ↓
//!  ClassificationRecord::fallback()  ←───────────────────  validated record
//! ```
//!
//! [`Classifier::classify`] is exception-free at its boundary: every path
//! terminates in a well-formed
//! [`ClassificationRecord`](ecoscan_core::ClassificationRecord), and
//! internal fault reasons (`no_api_key`, `ai_error`) are reported only via
//! tracing.

pub mod prompt;
pub mod service;

pub use prompt::CLASSIFY_PROMPT;
pub use service::{Classifier, IMAGE_MIME_TYPE};
