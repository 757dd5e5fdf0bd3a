//! End-to-end request flow tests
//!
//! Drives the complete pipeline: profile in, routing decision, budgeted
//! fallback execution against mock backends, response out.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use router_budget::BudgetLedger;
use router_core::{InvocationError, Provider};
use router_exec::{
    AttemptOutcome, BackendRegistry, CompletionBackend, CompletionRequest, ExecutionError,
    FallbackExecutor,
};

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_backends::*;

#[tokio::test]
async fn test_e2e_coding_request_served_by_preferred_provider() {
    init_tracing();
    let ledger = BudgetLedger::unlimited();
    let backend = Arc::new(EchoBackend::new());

    let outcome = route_and_execute(
        &coding_profile(),
        &production_catalog(),
        Arc::clone(&backend) as Arc<dyn CompletionBackend>,
        "write a binary search in Rust",
        &ledger,
    )
    .await
    .expect("execution succeeds");

    assert_eq!(outcome.provider, Provider::Anthropic);
    assert_eq!(outcome.model, "claude-sonnet-4-5");
    assert_eq!(outcome.attempts, 1);
    assert_eq!(backend.calls(), 1);
    assert!(outcome.text.contains("write a binary search in Rust"));
    assert!(outcome.decision.reason.contains("preferred provider"));
}

#[tokio::test]
async fn test_e2e_failover_to_second_choice() {
    // The promoted provider times out; the chain recovers on the next
    // ranked candidate and only the winner's cost is charged.
    let ledger = BudgetLedger::unlimited();
    let backend = ScriptedBackend::new()
        .fail("claude_sonnet", InvocationError::Timeout { elapsed_ms: 30_000 })
        .succeed("gemini_flash", "fn search() {}")
        .shared();

    let outcome = route_and_execute(
        &coding_profile(),
        &production_catalog(),
        Arc::clone(&backend) as Arc<dyn CompletionBackend>,
        "write a binary search in Rust",
        &ledger,
    )
    .await
    .expect("fallback succeeds");

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.provider, Provider::Gemini);
    assert_eq!(outcome.text, "fn search() {}");
    assert_eq!(backend.calls(), 2);

    assert_eq!(outcome.attempt_log.len(), 2);
    assert_eq!(outcome.attempt_log[0].key, "claude_sonnet");
    assert!(matches!(
        outcome.attempt_log[0].outcome,
        AttemptOutcome::Failed { ref classification, .. } if classification == "timeout"
    ));
}

#[tokio::test]
async fn test_e2e_web_search_carries_sources() {
    let ledger = BudgetLedger::unlimited();
    let backend: Arc<dyn CompletionBackend> = Arc::new(EchoBackend::new());

    let outcome = route_and_execute(
        &web_search_profile(),
        &production_catalog(),
        backend,
        "latest rustc release notes",
        &ledger,
    )
    .await
    .expect("execution succeeds");

    assert_eq!(outcome.provider, Provider::Gemini);
    assert!(!outcome.sources.is_empty());
}

#[tokio::test]
async fn test_e2e_json_extraction_retries_on_malformed_output() {
    // Extraction requires parseable JSON. The first candidate returns
    // garbage, so the executor falls through to one that behaves.
    let ledger = BudgetLedger::unlimited();
    let backend = ScriptedBackend::new()
        .succeed("openai_mini", "here is your JSON: {oops")
        .succeed("gemini_flash", r#"{"dates": ["2024-01-01"]}"#)
        .shared();

    let outcome = route_and_execute(
        &extraction_profile(),
        &production_catalog(),
        Arc::clone(&backend) as Arc<dyn CompletionBackend>,
        "extract all dates from this text",
        &ledger,
    )
    .await
    .expect("fallback succeeds");

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.provider, Provider::Gemini);
    serde_json::from_str::<serde_json::Value>(&outcome.text).expect("winner output parses");
}

#[tokio::test]
async fn test_e2e_unroutable_request_is_terminal() {
    // No web-capable model in the catalog: routing produces a terminal
    // decision and the executor refuses it without touching any backend.
    let catalog: Vec<_> = production_catalog()
        .into_iter()
        .filter(|d| !d.supports_web)
        .collect();
    let ledger = BudgetLedger::unlimited();
    let backend = Arc::new(EchoBackend::new());

    let err = route_and_execute(
        &web_search_profile(),
        &catalog,
        Arc::clone(&backend) as Arc<dyn CompletionBackend>,
        "latest rustc release notes",
        &ledger,
    )
    .await
    .expect_err("nothing to execute");

    assert!(matches!(err, ExecutionError::NoCandidates { .. }));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_e2e_all_providers_down() {
    let ledger = BudgetLedger::unlimited();
    let backend = FailingBackend::new()
        .with_error(
            Provider::OpenAi,
            InvocationError::RateLimited {
                provider: Provider::OpenAi,
            },
        )
        .with_error(
            Provider::Gemini,
            InvocationError::Timeout { elapsed_ms: 30_000 },
        );

    let err = route_and_execute(
        &text_profile(),
        &production_catalog(),
        Arc::new(backend),
        "hello",
        &ledger,
    )
    .await
    .expect_err("every provider fails");

    match err {
        ExecutionError::ChainExhausted { attempts, last_failure } => {
            assert_eq!(attempts, 3);
            assert!(last_failure.to_string().contains("simulated outage"));
        }
        other => panic!("expected ChainExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_e2e_execution_through_backend_registry() {
    // Wire the executor through the per-provider registry the way a real
    // deployment would, with one mock client per provider.
    let registry = BackendRegistry::new()
        .register(Provider::Anthropic, || {
            Ok(Arc::new(EchoBackend::new()) as Arc<dyn CompletionBackend>)
        })
        .register(Provider::Gemini, || {
            Ok(Arc::new(EchoBackend::new()) as Arc<dyn CompletionBackend>)
        })
        .register(Provider::OpenAi, || {
            Err(InvocationError::Authentication {
                provider: Provider::OpenAi,
            })
        });

    let decision = route_default(&text_profile(), &production_catalog());
    let request = CompletionRequest::for_decision("hello", &decision);
    let executor = FallbackExecutor::new(Arc::new(registry));
    let ledger = BudgetLedger::unlimited();

    // openai_mini is promoted for text generation but its client cannot be
    // constructed; the chain falls through to gemini.
    let outcome = executor
        .execute(&decision, &request, &ledger)
        .await
        .expect("fallback succeeds");

    assert_eq!(outcome.provider, Provider::Gemini);
    assert_eq!(outcome.attempts, 2);
    assert!(matches!(
        outcome.attempt_log[0].outcome,
        AttemptOutcome::Failed { ref classification, .. } if classification == "authentication"
    ));
}

#[tokio::test]
async fn test_e2e_decision_audit_survives_serialization() {
    let ledger = BudgetLedger::unlimited();
    let backend: Arc<dyn CompletionBackend> = Arc::new(EchoBackend::new());

    let outcome = route_and_execute(
        &text_profile(),
        &production_catalog(),
        backend,
        "hello",
        &ledger,
    )
    .await
    .expect("execution succeeds");

    // The outcome is a complete audit record: serialize and read it back.
    let json = serde_json::to_string(&outcome).expect("outcome serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("outcome parses");
    assert_eq!(value["provider"], "openai");
    assert_eq!(value["attempts"], 1);
    assert!(value["decision"]["candidates"].is_array());
    assert_eq!(value["attempt_log"][0]["outcome"]["outcome"], "succeeded");
}

#[tokio::test]
async fn test_e2e_unused_script_entries_are_ignored() {
    // A scripted failure for a candidate that never gets invoked must not
    // affect the flow: the winner answers on the first attempt.
    let ledger = BudgetLedger::unlimited();
    let backend = ScriptedBackend::new()
        .succeed("openai_mini", "first try")
        .fail(
            "gemini_flash",
            InvocationError::Api {
                provider: Provider::Gemini,
                message: "never called".to_string(),
                status_code: Some(500),
                retryable: true,
            },
        )
        .shared();

    let outcome = route_and_execute(
        &text_profile(),
        &production_catalog(),
        Arc::clone(&backend) as Arc<dyn CompletionBackend>,
        "hello",
        &ledger,
    )
    .await
    .expect("first attempt succeeds");

    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.text, "first try");
    assert_eq!(backend.calls(), 1);
}
