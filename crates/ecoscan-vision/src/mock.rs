//! Canned vision model for demos and tests.
//!
//! Returns a fixed reply without touching the network, so demo recordings
//! and tests do not depend on live credentials. Replies still pass through
//! the full extraction/coercion pipeline, not around it.

use async_trait::async_trait;
use ecoscan_core::{ModelError, VisionModel};
use std::time::Duration;

/// Classification reply used by demo mode.
const PLASTIC_BOTTLE_REPLY: &str =
    r#"{"item_name":"Plastic Water Bottle","material":"plastic","recyclable":true,"confidence":"high"}"#;

/// Vision model that always returns a fixed reply.
pub struct CannedVision {
    reply: String,
    delay: Option<Duration>,
}

impl CannedVision {
    /// Create a canned model with the given reply text.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            delay: None,
        }
    }

    /// The demo classification: a recyclable plastic water bottle.
    #[must_use]
    pub fn plastic_bottle() -> Self {
        Self::new(PLASTIC_BOTTLE_REPLY)
    }

    /// Add an artificial delay before replying, to make demos feel live.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl VisionModel for CannedVision {
    fn model_name(&self) -> &str {
        "canned"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, ModelError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.reply.clone())
    }
}
