//! Classified invocation errors.
//!
//! Backend calls fail for different reasons with different fallback
//! implications; the executor absorbs every variant and advances the chain,
//! but the classification is kept for the attempt log and the final
//! exhaustion error.

use thiserror::Error;

use crate::catalog::Provider;

/// A classified failure from the backend invocation capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The call did not complete within the collaborator's deadline.
    #[error("backend call timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed time before the deadline fired.
        elapsed_ms: u64,
    },

    /// The provider rejected the call for rate limiting.
    #[error("rate limited by {provider}")]
    RateLimited {
        /// Provider that rejected the call.
        provider: Provider,
    },

    /// The provider returned an API error.
    #[error("provider {provider} error: {message}")]
    Api {
        /// Provider that failed.
        provider: Provider,
        /// Provider-supplied error message.
        message: String,
        /// HTTP status code, when known.
        status_code: Option<u16>,
        /// Whether the provider marked the failure as retryable.
        retryable: bool,
    },

    /// Credentials for the provider are missing or rejected.
    #[error("authentication failed for {provider}")]
    Authentication {
        /// Provider that rejected the credentials.
        provider: Provider,
    },

    /// No backend is registered for the candidate's provider.
    #[error("no backend registered for provider {provider}")]
    UnsupportedProvider {
        /// Provider with no registered backend.
        provider: Provider,
    },

    /// The backend responded, but the output failed required structural
    /// validation (e.g. did not parse as JSON).
    #[error("backend output failed validation: {message}")]
    InvalidOutput {
        /// What the validator rejected.
        message: String,
    },
}

impl InvocationError {
    /// Whether the same call could plausibly succeed against a different
    /// candidate. Every variant triggers fallback; this only informs logging.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::RateLimited { .. } | Self::InvalidOutput { .. } => true,
            Self::Api { retryable, .. } => *retryable,
            Self::Authentication { .. } | Self::UnsupportedProvider { .. } => false,
        }
    }

    /// Short classification label for attempt logs.
    #[must_use]
    pub fn classification(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::RateLimited { .. } => "rate_limited",
            Self::Api { .. } => "api_error",
            Self::Authentication { .. } => "authentication",
            Self::UnsupportedProvider { .. } => "unsupported_provider",
            Self::InvalidOutput { .. } => "invalid_output",
        }
    }
}
