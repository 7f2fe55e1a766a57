//! Error types for EcoScan.

use thiserror::Error;

/// Main error type for classification attempts.
///
/// This error never crosses the orchestrator boundary: `Classifier::classify`
/// absorbs every variant into the fallback record and reports the reason via
/// tracing.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON extraction from model output failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Vision model invocation failed
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Extracted text failed JSON parsing
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The incoming image payload was not valid base64
    #[error("invalid image payload: {0}")]
    Image(String),
}

/// JSON extraction errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no JSON object found")]
    NoJsonFound,

    #[error("unbalanced JSON braces")]
    UnbalancedBraces,
}

/// Vision model invocation errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("model returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model response missing text content")]
    EmptyResponse,
}

/// Internal reason a classification fell back to the safe record.
///
/// Reasons are diagnostic only; callers always receive the same fallback
/// shape regardless of which reason triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Model credentials were unavailable at startup
    NoApiKey,
    /// Any failure downstream of invoking the model
    AiError,
}

impl FallbackReason {
    /// Stable identifier used in operator diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackReason::NoApiKey => "no_api_key",
            FallbackReason::AiError => "ai_error",
        }
    }
}

/// Result type alias for classification attempts.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_display() {
        assert_eq!(ExtractError::NoJsonFound.to_string(), "no JSON object found");
        assert_eq!(
            ExtractError::UnbalancedBraces.to_string(),
            "unbalanced JSON braces"
        );
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");

        let err = ModelError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "model returned status 429: quota exceeded");

        assert_eq!(
            ModelError::EmptyResponse.to_string(),
            "model response missing text content"
        );
    }

    #[test]
    fn test_error_from_extract_error() {
        let err: Error = ExtractError::NoJsonFound.into();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(err.to_string().contains("no JSON object found"));
    }

    #[test]
    fn test_error_from_model_error() {
        let err: Error = ModelError::EmptyResponse.into();
        assert!(matches!(err, Error::Model(_)));
    }

    #[test]
    fn test_error_from_parse_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_fallback_reason_as_str() {
        assert_eq!(FallbackReason::NoApiKey.as_str(), "no_api_key");
        assert_eq!(FallbackReason::AiError.as_str(), "ai_error");
    }
}
