//! Per-provider backend registry.
//!
//! Real provider clients are expensive to construct and should be created
//! once and reused across calls. The registry holds a factory per provider
//! and initializes the client lazily behind a `OnceCell`, so concurrent
//! first use cannot construct two clients.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tracing::debug;

use router_core::{InvocationError, ModelCandidate, Provider};

use crate::backend::{BackendResponse, CompletionBackend, CompletionRequest};

type BackendFactory =
    Box<dyn Fn() -> Result<Arc<dyn CompletionBackend>, InvocationError> + Send + Sync>;

struct RegistryEntry {
    factory: BackendFactory,
    cell: OnceCell<Arc<dyn CompletionBackend>>,
}

/// Dispatches calls to the backend registered for a candidate's provider,
/// constructing each backend at most once.
#[derive(Default)]
pub struct BackendRegistry {
    entries: HashMap<Provider, RegistryEntry>,
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("providers", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BackendRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for a provider. The factory runs at most once,
    /// on first use; a factory error is returned to the caller and retried
    /// on the next use.
    #[must_use]
    pub fn register<F>(mut self, provider: Provider, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn CompletionBackend>, InvocationError> + Send + Sync + 'static,
    {
        self.entries.insert(
            provider,
            RegistryEntry {
                factory: Box::new(factory),
                cell: OnceCell::new(),
            },
        );
        self
    }

    /// Providers with a registered factory.
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        self.entries.keys().copied().collect()
    }

    /// Returns the initialized backend for a provider, constructing it on
    /// first use.
    pub fn backend_for(
        &self,
        provider: Provider,
    ) -> Result<Arc<dyn CompletionBackend>, InvocationError> {
        let entry = self
            .entries
            .get(&provider)
            .ok_or(InvocationError::UnsupportedProvider { provider })?;

        entry
            .cell
            .get_or_try_init(|| {
                debug!(provider = %provider, "initializing backend client");
                (entry.factory)()
            })
            .cloned()
    }
}

#[async_trait]
impl CompletionBackend for BackendRegistry {
    async fn generate(
        &self,
        candidate: &ModelCandidate,
        request: &CompletionRequest,
    ) -> Result<BackendResponse, InvocationError> {
        let backend = self.backend_for(candidate.provider)?;
        backend.generate(candidate, request).await
    }
}
