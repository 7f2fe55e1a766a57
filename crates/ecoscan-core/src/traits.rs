//! Core traits for EcoScan components.
//!
//! [`VisionModel`] is the seam between the classification pipeline and the
//! generative-AI collaborator, so backends (the live Gemini client, the
//! canned demo model, test doubles) can be swapped without changing the
//! orchestrator.

use async_trait::async_trait;

use crate::error::ModelError;

/// Trait for vision-capable generative models.
///
/// Implementations may fail arbitrarily (network, quota, timeout); callers
/// must treat any failure as opaque and route to the fallback record.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Model name/identifier, for diagnostics.
    fn model_name(&self) -> &str;

    /// Generate a free-form text response for a prompt plus one image.
    ///
    /// The returned text is untrusted: it may wrap JSON in prose or markdown
    /// fences, or contain nothing parseable at all.
    async fn generate(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, ModelError>;
}
