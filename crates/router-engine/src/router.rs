//! Decision assembly.
//!
//! [`DeterministicRouter`] runs the full pipeline: derive constraints,
//! filter the catalog, score survivors, order them with a fully resolved
//! tie-break chain, apply the preferred-provider promotion, and assemble the
//! final [`RouteDecision`].

use tracing::{debug, info};

use router_core::{ModelCandidate, ModelDescriptor, PromptProfile, RouteDecision, TaskType};

use crate::config::RoutingConfig;
use crate::constraints::derive_constraints;
use crate::filter::filter_catalog;
use crate::scoring::score_candidates;

/// Converts semantic intent into a routing decision.
///
/// The router holds only immutable configuration; `route` reads the catalog
/// and writes nothing, so a single instance may serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct DeterministicRouter {
    config: RoutingConfig,
}

impl DeterministicRouter {
    /// Creates a router with the given configuration.
    #[must_use]
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Creates a router with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RoutingConfig::default())
    }

    /// The configuration this router was built with.
    #[must_use]
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Runs the full routing pipeline over the catalog.
    ///
    /// Returns a terminal decision with `selected = None` when no catalog
    /// entry satisfies the derived constraints; that outcome is not an
    /// error.
    #[must_use]
    pub fn route(&self, profile: &PromptProfile, catalog: &[ModelDescriptor]) -> RouteDecision {
        let constraints = derive_constraints(profile, &self.config.policy);

        let filtered = filter_catalog(catalog, &constraints);
        debug!(
            task = %constraints.task_type,
            catalog_size = catalog.len(),
            surviving = filtered.len(),
            "filtered catalog"
        );

        if filtered.is_empty() {
            info!(task = %constraints.task_type, "no candidate satisfies constraints");
            return RouteDecision::no_candidates(constraints);
        }

        let mut candidates = score_candidates(&filtered, &constraints, &self.config);
        sort_candidates(&mut candidates);

        let reason = self.apply_preference(constraints.task_type, &mut candidates);
        let selected = candidates.first().cloned();

        if let Some(chosen) = &selected {
            info!(
                key = %chosen.key,
                provider = %chosen.provider,
                score = chosen.score,
                candidates = candidates.len(),
                "routing decision made"
            );
        }

        RouteDecision {
            constraints,
            candidates,
            selected,
            reason,
        }
    }

    /// Applies the preferred-provider promotion rule and builds the overall
    /// decision reason. `candidates` must be non-empty and score-sorted.
    fn apply_preference(&self, task: TaskType, candidates: &mut Vec<ModelCandidate>) -> String {
        let preferred = self.config.preferred_providers.for_task(task);

        match preferred {
            Some(provider) => {
                if let Some(pos) = candidates.iter().position(|c| c.provider == provider) {
                    let promoted = candidates.remove(pos);
                    candidates.insert(0, promoted);
                    format!(
                        "Selected {}: preferred provider {} for task category {}",
                        candidates[0].key, provider, task
                    )
                } else {
                    format!(
                        "Selected {}: fallback - preferred provider {} for {} unavailable, ranked by score",
                        candidates[0].key, provider, task
                    )
                }
            }
            None => format!(
                "Selected {}: best score {:.2} among {} candidate(s)",
                candidates[0].key,
                candidates[0].score,
                candidates.len()
            ),
        }
    }
}

/// Sorts candidates by `(score, provider_preference_rank, key, model)`.
///
/// `f64::total_cmp` plus the string tie-breaks make this a total order with
/// no unresolved ties, so the ranking is reproducible byte for byte.
fn sort_candidates(candidates: &mut [ModelCandidate]) {
    candidates.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| a.provider_preference_rank.cmp(&b.provider_preference_rank))
            .then_with(|| a.key.cmp(&b.key))
            .then_with(|| a.model.cmp(&b.model))
    });
}
