//! Routing decision contracts.
//!
//! Defines the data structures produced by the routing pipeline: derived
//! constraints, scored candidates, and the full decision record returned to
//! callers and consumed by the fallback executor.

use serde::{Deserialize, Serialize};

use crate::catalog::{CostTier, LatencyTier, ModelPricing, Provider};
use crate::profile::{OutputFormat, TaskType};

/// Machine-readable constraints derived from a [`crate::PromptProfile`].
///
/// Used to filter catalog descriptors. Immutable for the lifetime of one
/// routing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConstraints {
    /// Task category the request was classified as.
    pub task_type: TaskType,

    /// Whether a web-capable backend is required.
    pub needs_web: bool,

    /// Whether a code-capable backend is required.
    pub needs_code: bool,

    /// Required output shape.
    pub output_format: OutputFormat,

    /// Required latency tier.
    pub latency_tier: LatencyTier,

    /// Maximum cost tier allowed. Defaults to [`CostTier::High`]
    /// (unrestricted); policy layers may tighten it.
    pub max_cost_tier: CostTier,
}

/// A catalog descriptor that survived hard filtering, annotated with its
/// deterministic score.
///
/// Candidates are ephemeral: they are recomputed on every request and never
/// cached, since catalog and budget state may change between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCandidate {
    /// Stable catalog key.
    pub key: String,

    /// Provider that serves this model.
    pub provider: Provider,

    /// Provider-specific model identifier.
    pub model: String,

    /// Cost tier carried over from the descriptor.
    pub cost_tier: CostTier,

    /// Latency tier carried over from the descriptor.
    pub latency_tier: LatencyTier,

    /// Deterministic score; lower is better.
    pub score: f64,

    /// Zero-based rank of the provider in the configured preference order,
    /// or the sentinel `999` when unlisted. Part of the tie-break chain.
    pub provider_preference_rank: u32,

    /// Per-token pricing carried through for the cost estimator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<ModelPricing>,

    /// Human-readable score breakdown.
    pub reason: String,
}

/// Output of the routing pipeline.
///
/// Immutable once built. `selected` is `None` exactly when `candidates` is
/// empty, which is a legitimate terminal decision rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    /// Constraints derived from the profile.
    pub constraints: RouteConstraints,

    /// Ranked candidates, best first.
    pub candidates: Vec<ModelCandidate>,

    /// The chosen candidate, `candidates[0]` when any survive filtering.
    pub selected: Option<ModelCandidate>,

    /// Human-readable explanation of the decision.
    pub reason: String,
}

impl RouteDecision {
    /// Builds the terminal decision for constraints no catalog entry
    /// satisfies.
    #[must_use]
    pub fn no_candidates(constraints: RouteConstraints) -> Self {
        Self {
            constraints,
            candidates: Vec::new(),
            selected: None,
            reason: "No model in catalog satisfies routing constraints".to_string(),
        }
    }

    /// Whether any candidate survived filtering.
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// The fallback chain: selected candidate first, then the remaining
    /// ranked candidates, deduplicated by key and truncated to
    /// `max_attempts` entries.
    #[must_use]
    pub fn fallback_chain(&self, max_attempts: usize) -> Vec<&ModelCandidate> {
        let mut chain: Vec<&ModelCandidate> = Vec::new();
        if let Some(selected) = &self.selected {
            chain.push(selected);
        }
        for candidate in &self.candidates {
            if chain.len() >= max_attempts {
                break;
            }
            if chain.iter().any(|c| c.key == candidate.key) {
                continue;
            }
            chain.push(candidate);
        }
        chain.truncate(max_attempts);
        chain
    }
}
