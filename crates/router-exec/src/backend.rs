//! The backend invocation boundary.
//!
//! The executor never talks to a provider directly; it goes through
//! [`CompletionBackend`], implemented by the collaborator that owns real
//! clients, credentials, and timeouts. A timeout raised by the collaborator
//! is treated like any other invocation failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use router_core::{InvocationError, ModelCandidate, OutputFormat, RouteDecision};

/// Parameters for one backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Raw prompt text.
    pub prompt: String,

    /// Maximum output size the backend may produce.
    pub max_output_tokens: u32,

    /// Whether the response must be structured JSON.
    pub require_json: bool,

    /// Whether the backend should ground the answer with live web results.
    pub needs_web: bool,
}

impl CompletionRequest {
    /// Creates a request with neutral defaults.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens: 1024,
            require_json: false,
            needs_web: false,
        }
    }

    /// Creates a request whose call parameters mirror a routing decision's
    /// constraints.
    #[must_use]
    pub fn for_decision(prompt: impl Into<String>, decision: &RouteDecision) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens: 1024,
            require_json: decision.constraints.output_format == OutputFormat::Json,
            needs_web: decision.constraints.needs_web,
        }
    }

    /// Sets the output size cap.
    #[must_use]
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Requires structured JSON output.
    #[must_use]
    pub fn with_json_required(mut self) -> Self {
        self.require_json = true;
        self
    }
}

/// A citation attached to a web-grounded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    /// Source title, possibly empty.
    pub title: String,
    /// Source URL.
    pub url: String,
}

/// A successful backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendResponse {
    /// Response text.
    pub text: String,

    /// Citation records for web-grounded answers; empty otherwise.
    #[serde(default)]
    pub sources: Vec<WebSource>,
}

impl BackendResponse {
    /// Creates a plain text response with no sources.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }

    /// Attaches citation records.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<WebSource>) -> Self {
        self.sources = sources;
        self
    }
}

/// Invocation capability implemented by the provider-owning collaborator.
///
/// Implementations own client lifecycle and timeouts. They must be safe to
/// share across concurrent calls.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Executes one call against the candidate's provider/model.
    async fn generate(
        &self,
        candidate: &ModelCandidate,
        request: &CompletionRequest,
    ) -> Result<BackendResponse, InvocationError>;
}
