//! Shared helpers for integration tests

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

use router_budget::BudgetLedger;
use router_core::{ModelDescriptor, PromptProfile, RouteDecision};
use router_engine::DeterministicRouter;
use router_exec::{
    CompletionBackend, CompletionOutcome, CompletionRequest, ExecutionError, FallbackExecutor,
};

/// Initialize tracing for tests (only once)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Routes a profile against a catalog with the default configuration.
pub fn route_default(profile: &PromptProfile, catalog: &[ModelDescriptor]) -> RouteDecision {
    DeterministicRouter::with_defaults().route(profile, catalog)
}

/// Runs the full pipeline: route the profile, then execute the decision's
/// fallback chain against the given backend.
pub async fn route_and_execute(
    profile: &PromptProfile,
    catalog: &[ModelDescriptor],
    backend: Arc<dyn CompletionBackend>,
    prompt: &str,
    ledger: &BudgetLedger,
) -> Result<CompletionOutcome, ExecutionError> {
    let decision = route_default(profile, catalog);
    let request = CompletionRequest::for_decision(prompt, &decision);
    FallbackExecutor::new(backend)
        .execute(&decision, &request, ledger)
        .await
}
