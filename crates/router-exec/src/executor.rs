//! Fallback execution harness.
//!
//! Walks a ranked decision chain strictly in order, one attempt at a time.
//! Attempts never run in parallel: only one successful response is needed,
//! and cost is committed only after a winner is known. Dropping the
//! execution future cancels before the next attempt and releases any
//! outstanding budget hold without charging.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use router_budget::{estimate_call_cost, estimate_tokens, BudgetError, BudgetLedger, CostEstimate};
use router_core::{InvocationError, ModelCandidate, Provider, RouteDecision};

use crate::backend::{CompletionBackend, CompletionRequest, WebSource};

/// What to do when a chain entry cannot be afforded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPolicy {
    /// Skip the unaffordable candidate and continue down the chain.
    /// Maximizes success probability; the default.
    #[default]
    SkipCandidate,
    /// Abort the whole call on the first unaffordable candidate.
    AbortChain,
}

/// Executor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Maximum chain length, counting skipped entries. Default 3.
    pub max_attempts: usize,

    /// Behavior on unaffordable candidates.
    pub budget_policy: BudgetPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            budget_policy: BudgetPolicy::SkipCandidate,
        }
    }
}

/// Why one chain entry did not produce the final response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttemptFailure {
    /// The backend call failed or its output failed validation.
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    /// The budget could not hold the estimated cost.
    #[error("budget: {0}")]
    Budget(#[from] BudgetError),

    /// The model has no catalog pricing and the caller's wallet is metered.
    #[error("no pricing for model under a metered budget")]
    UnpricedUnderMeteredBudget,
}

/// Outcome of one chain entry, for the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The backend call succeeded and cost was committed.
    Succeeded {
        /// Committed cost, absent for unpriced calls.
        cost: Option<f64>,
    },
    /// The backend call was issued and failed.
    Failed {
        /// Short failure classification.
        classification: String,
        /// Full failure message.
        message: String,
    },
    /// The entry was skipped before invocation for budget reasons. Not an
    /// invocation attempt.
    SkippedBudget {
        /// Estimated cost, absent for unpriced models.
        estimated: Option<f64>,
        /// Remaining budget at the time of the skip.
        remaining: f64,
    },
}

/// One entry in the execution audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Candidate catalog key.
    pub key: String,
    /// Candidate provider.
    pub provider: Provider,
    /// Candidate model identifier.
    pub model: String,
    /// What happened.
    pub outcome: AttemptOutcome,
}

/// Successful execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    /// Response text from the winning backend.
    pub text: String,

    /// Provider actually used.
    pub provider: Provider,

    /// Model actually used.
    pub model: String,

    /// 1-based count of invocation attempts issued, including the winner.
    /// Budget skips do not count.
    pub attempts: u32,

    /// Cost committed to the ledger, absent for unpriced calls.
    pub estimated_cost: Option<f64>,

    /// Citation records from web-grounded answers.
    pub sources: Vec<WebSource>,

    /// The full routing decision, for auditability.
    pub decision: RouteDecision,

    /// Per-entry audit log, including skips.
    pub attempt_log: Vec<AttemptRecord>,
}

/// Terminal execution errors. Per-candidate failures are absorbed and only
/// surface here once the whole chain is spent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    /// The decision carried no candidates.
    #[error("route decision has no candidates: {reason}")]
    NoCandidates {
        /// The decision's own explanation.
        reason: String,
    },

    /// An unaffordable candidate aborted the call (AbortChain policy only).
    #[error("budget exceeded: estimated ${estimated:.8} with ${remaining:.8} remaining")]
    BudgetExceeded {
        /// The estimate that could not be afforded.
        estimated: f64,
        /// Remaining budget at abort time.
        remaining: f64,
    },

    /// Every chain entry failed or was skipped.
    #[error("all {attempts} attempt(s) failed; last failure: {last_failure}")]
    ChainExhausted {
        /// Invocation attempts issued (budget skips excluded).
        attempts: u32,
        /// The most recent failure's cause.
        last_failure: AttemptFailure,
    },
}

/// Executes routing decisions against a backend with ranked fallback.
pub struct FallbackExecutor {
    backend: Arc<dyn CompletionBackend>,
    config: ExecutorConfig,
}

impl std::fmt::Debug for FallbackExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FallbackExecutor {
    /// Creates an executor over the given backend with default
    /// configuration.
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            config: ExecutorConfig::default(),
        }
    }

    /// Creates an executor with explicit configuration.
    #[must_use]
    pub fn with_config(backend: Arc<dyn CompletionBackend>, config: ExecutorConfig) -> Self {
        Self { backend, config }
    }

    /// The executor configuration.
    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Executes the decision's fallback chain until one attempt succeeds.
    ///
    /// Chain entries are consumed strictly in ranked order, at most once
    /// each, truncated to `max_attempts`. Cost is estimated and held before
    /// each invocation and committed only on success; every failure is
    /// absorbed into the attempt log until the chain is exhausted.
    pub async fn execute(
        &self,
        decision: &RouteDecision,
        request: &CompletionRequest,
        ledger: &BudgetLedger,
    ) -> Result<CompletionOutcome, ExecutionError> {
        if !decision.has_candidates() {
            return Err(ExecutionError::NoCandidates {
                reason: decision.reason.clone(),
            });
        }

        let chain = decision.fallback_chain(self.config.max_attempts);
        let input_tokens = estimate_tokens(&request.prompt);

        let mut attempts: u32 = 0;
        let mut attempt_log: Vec<AttemptRecord> = Vec::with_capacity(chain.len());
        let mut last_failure: Option<AttemptFailure> = None;

        for candidate in chain {
            let estimate =
                estimate_call_cost(candidate.pricing, input_tokens, request.max_output_tokens);

            let reservation = match self.hold_budget(candidate, estimate, ledger)? {
                HoldOutcome::Held(reservation) => Some(reservation),
                HoldOutcome::Unmetered => None,
                HoldOutcome::Skipped { failure, record } => {
                    attempt_log.push(record);
                    last_failure = Some(failure);
                    continue;
                }
            };

            attempts += 1;
            debug!(
                key = %candidate.key,
                provider = %candidate.provider,
                attempt = attempts,
                estimate = %estimate,
                "issuing backend call"
            );

            match self.backend.generate(candidate, request).await {
                Ok(response) => {
                    if let Err(validation) = validate_response(&response.text, request) {
                        warn!(
                            key = %candidate.key,
                            error = %validation,
                            "response failed validation, falling back"
                        );
                        attempt_log.push(failed_record(candidate, &validation));
                        last_failure = Some(AttemptFailure::Invocation(validation));
                        continue;
                    }

                    let cost = reservation.as_ref().map(router_budget::BudgetReservation::amount);
                    if let Some(reservation) = reservation {
                        reservation.commit();
                    }

                    info!(
                        key = %candidate.key,
                        provider = %candidate.provider,
                        attempts,
                        "backend call succeeded"
                    );
                    attempt_log.push(AttemptRecord {
                        key: candidate.key.clone(),
                        provider: candidate.provider,
                        model: candidate.model.clone(),
                        outcome: AttemptOutcome::Succeeded { cost },
                    });

                    return Ok(CompletionOutcome {
                        text: response.text,
                        provider: candidate.provider,
                        model: candidate.model.clone(),
                        attempts,
                        estimated_cost: cost,
                        sources: response.sources,
                        decision: decision.clone(),
                        attempt_log,
                    });
                }
                Err(error) => {
                    warn!(
                        key = %candidate.key,
                        provider = %candidate.provider,
                        classification = error.classification(),
                        error = %error,
                        "backend call failed, falling back"
                    );
                    attempt_log.push(failed_record(candidate, &error));
                    last_failure = Some(AttemptFailure::Invocation(error));
                    // Reservation drops here, releasing the hold uncharged.
                }
            }
        }

        let Some(last_failure) = last_failure else {
            // Only reachable with a zero-length configured chain.
            return Err(ExecutionError::NoCandidates {
                reason: decision.reason.clone(),
            });
        };

        warn!(attempts, last_failure = %last_failure, "fallback chain exhausted");
        Err(ExecutionError::ChainExhausted {
            attempts,
            last_failure,
        })
    }

    /// Applies the budget gate for one candidate. Returns the hold, a
    /// marker that no hold is needed, or a skip record, honoring the
    /// configured policy for unaffordable entries.
    fn hold_budget(
        &self,
        candidate: &ModelCandidate,
        estimate: CostEstimate,
        ledger: &BudgetLedger,
    ) -> Result<HoldOutcome, ExecutionError> {
        match estimate {
            CostEstimate::Priced { usd } => match ledger.reserve(usd) {
                Ok(reservation) => Ok(HoldOutcome::Held(reservation)),
                Err(error) => {
                    let remaining = ledger.remaining();
                    if self.config.budget_policy == BudgetPolicy::AbortChain {
                        return Err(ExecutionError::BudgetExceeded {
                            estimated: usd,
                            remaining,
                        });
                    }
                    debug!(
                        key = %candidate.key,
                        estimated = usd,
                        remaining,
                        "candidate skipped: unaffordable"
                    );
                    Ok(HoldOutcome::Skipped {
                        failure: AttemptFailure::Budget(error),
                        record: AttemptRecord {
                            key: candidate.key.clone(),
                            provider: candidate.provider,
                            model: candidate.model.clone(),
                            outcome: AttemptOutcome::SkippedBudget {
                                estimated: Some(usd),
                                remaining,
                            },
                        },
                    })
                }
            },
            CostEstimate::Unpriced => {
                if ledger.is_metered() {
                    let remaining = ledger.remaining();
                    debug!(
                        key = %candidate.key,
                        "candidate skipped: unpriced under a metered budget"
                    );
                    Ok(HoldOutcome::Skipped {
                        failure: AttemptFailure::UnpricedUnderMeteredBudget,
                        record: AttemptRecord {
                            key: candidate.key.clone(),
                            provider: candidate.provider,
                            model: candidate.model.clone(),
                            outcome: AttemptOutcome::SkippedBudget {
                                estimated: None,
                                remaining,
                            },
                        },
                    })
                } else {
                    Ok(HoldOutcome::Unmetered)
                }
            }
        }
    }
}

enum HoldOutcome {
    Held(router_budget::BudgetReservation),
    Unmetered,
    Skipped {
        failure: AttemptFailure,
        record: AttemptRecord,
    },
}

fn failed_record(candidate: &ModelCandidate, error: &InvocationError) -> AttemptRecord {
    AttemptRecord {
        key: candidate.key.clone(),
        provider: candidate.provider,
        model: candidate.model.clone(),
        outcome: AttemptOutcome::Failed {
            classification: error.classification().to_string(),
            message: error.to_string(),
        },
    }
}

/// Structural validation applied to successful responses. A failure is
/// classified as an invocation failure so it triggers fallback.
fn validate_response(text: &str, request: &CompletionRequest) -> Result<(), InvocationError> {
    if request.require_json {
        serde_json::from_str::<serde_json::Value>(text).map_err(|e| {
            InvocationError::InvalidOutput {
                message: format!("response is not valid JSON: {e}"),
            }
        })?;
    }
    Ok(())
}
