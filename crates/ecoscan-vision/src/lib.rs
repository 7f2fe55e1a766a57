//! # ecoscan-vision
//!
//! [`VisionModel`](ecoscan_core::VisionModel) backends for EcoScan.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`GeminiVision`] | Gemini REST `generateContent` client |
//! | [`GeminiConfig`] | Client configuration (key, model, timeout) |
//! | [`CannedVision`] | Fixed-reply model for demos and tests |
//!
//! Backends only move bytes and text; extracting and validating the JSON a
//! model returns is `ecoscan-sanitize`'s job.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiConfig, GeminiVision, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use mock::CannedVision;
