//! The classification orchestrator.
//!
//! [`Classifier::classify`] composes model invocation, JSON extraction, and
//! coercion, and absorbs every internal failure into the fixed fallback
//! record. Its public contract has no error return.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ecoscan_core::{ClassificationRecord, Error, FallbackReason, VisionModel};
use ecoscan_sanitize::{coerce, extract_json_object, Coerced};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::prompt::CLASSIFY_PROMPT;

/// MIME type reported to the model for scan photos.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Orchestrates one classification attempt per call.
///
/// The vision model is an explicit optional capability injected at
/// construction: when credentials are absent the classifier is built with
/// `None` and every call takes the `no_api_key` fallback branch, without
/// attempting invocation.
pub struct Classifier {
    model: Option<Arc<dyn VisionModel>>,
}

impl Classifier {
    /// Create a classifier with an optional model capability.
    #[must_use]
    pub fn new(model: Option<Arc<dyn VisionModel>>) -> Self {
        Self { model }
    }

    /// Create a classifier backed by a model.
    #[must_use]
    pub fn with_model(model: Arc<dyn VisionModel>) -> Self {
        Self::new(Some(model))
    }

    /// Create a classifier with no model; every scan returns the fallback.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Whether a model capability is configured.
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classify a base64-encoded photograph.
    ///
    /// Never fails: any internal fault (missing credentials, model error,
    /// unparseable output) converts to the fallback record, with the reason
    /// recorded for operators via tracing.
    pub async fn classify(&self, image_base64: &str) -> ClassificationRecord {
        let Some(model) = self.model.as_deref() else {
            warn!(
                reason = FallbackReason::NoApiKey.as_str(),
                "no vision model configured, returning fallback"
            );
            return ClassificationRecord::fallback();
        };

        match attempt(model, image_base64).await {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    reason = FallbackReason::AiError.as_str(),
                    error = %err,
                    "classification failed, returning fallback"
                );
                ClassificationRecord::fallback()
            }
        }
    }
}

/// One classification attempt; every failure mode surfaces as an [`Error`]
/// for the caller to absorb.
async fn attempt(
    model: &dyn VisionModel,
    image_base64: &str,
) -> Result<ClassificationRecord, Error> {
    let image = STANDARD
        .decode(image_base64.trim())
        .map_err(|err| Error::Image(err.to_string()))?;

    let raw = model
        .generate(CLASSIFY_PROMPT, &image, IMAGE_MIME_TYPE)
        .await?;

    let extracted = extract_json_object(&raw)?;
    let candidate: Value = serde_json::from_str(&extracted)?;

    let Coerced {
        record,
        corrected,
        recyclable_type,
    } = coerce(&candidate);

    if corrected {
        warn!(
            original = %candidate,
            corrected = ?record,
            recyclable_type,
            "auto-corrected model output"
        );
    } else {
        debug!(model = model.model_name(), "model output passed validation");
    }

    Ok(record)
}
