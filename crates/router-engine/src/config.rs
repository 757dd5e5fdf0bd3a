//! Routing engine configuration.
//!
//! All weights, nudges, and preference tables live in an immutable
//! [`RoutingConfig`] injected into the router at construction, never in
//! module-level globals. Tables over [`TaskType`] are plain structs with one
//! field per variant, so the compiler enforces that a new task category
//! cannot be added without deciding its table entries.

use serde::{Deserialize, Serialize};

use router_core::{CostTier, Provider, TaskType};

/// Preference rank assigned to providers absent from the configured
/// preference order. Large enough to sort unlisted providers last among
/// otherwise tied candidates.
pub const PROVIDER_RANK_UNLISTED: u32 = 999;

/// Weights applied to each scoring component. Lower total score ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight on the cost tier rank (0..=2).
    pub cost: f64,
    /// Weight on the latency tier rank (0..=1).
    pub latency: f64,
    /// Weight on the provider preference rank.
    pub provider_preference: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cost: 10.0,
            latency: 1.0,
            provider_preference: 0.1,
        }
    }
}

/// Negative adjustments awarded when optional capabilities align with the
/// request. Bonuses stack additively and independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityBonuses {
    /// Applied to code-capable candidates on coding tasks.
    pub code: f64,
    /// Applied to web-capable candidates when web access is needed.
    pub web: f64,
    /// Applied to JSON-capable candidates when structured output is
    /// requested.
    pub json: f64,
}

impl Default for CapabilityBonuses {
    fn default() -> Self {
        Self {
            code: -0.5,
            web: -0.5,
            json: -0.25,
        }
    }
}

/// Small per-task additive score adjustment.
///
/// Lets a task category lean toward cheaper or more specialized backends
/// without a hard filter. Defaults are zero everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskNudges {
    /// Adjustment for web search tasks.
    pub web_search: f64,
    /// Adjustment for coding tasks.
    pub coding: f64,
    /// Adjustment for text generation tasks.
    pub text_generation: f64,
    /// Adjustment for summarization tasks.
    pub summarization: f64,
    /// Adjustment for extraction tasks.
    pub extraction: f64,
}

impl TaskNudges {
    /// Returns the nudge for the given task category.
    #[must_use]
    pub fn for_task(&self, task: TaskType) -> f64 {
        match task {
            TaskType::WebSearch => self.web_search,
            TaskType::Coding => self.coding,
            TaskType::TextGeneration => self.text_generation,
            TaskType::Summarization => self.summarization,
            TaskType::Extraction => self.extraction,
        }
    }
}

/// Per-task preferred provider overrides.
///
/// When the preferred provider for the request's task category appears among
/// the scored candidates, it is promoted to the front of the ranking
/// regardless of its numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredProviders {
    /// Preferred provider for web search tasks.
    pub web_search: Option<Provider>,
    /// Preferred provider for coding tasks.
    pub coding: Option<Provider>,
    /// Preferred provider for text generation tasks.
    pub text_generation: Option<Provider>,
    /// Preferred provider for summarization tasks.
    pub summarization: Option<Provider>,
    /// Preferred provider for extraction tasks.
    pub extraction: Option<Provider>,
}

impl Default for PreferredProviders {
    fn default() -> Self {
        Self {
            web_search: Some(Provider::Gemini),
            coding: Some(Provider::Anthropic),
            text_generation: Some(Provider::OpenAi),
            summarization: Some(Provider::OpenAi),
            extraction: Some(Provider::OpenAi),
        }
    }
}

impl PreferredProviders {
    /// A table with no overrides; ranking falls back purely to score order.
    #[must_use]
    pub fn none() -> Self {
        Self {
            web_search: None,
            coding: None,
            text_generation: None,
            summarization: None,
            extraction: None,
        }
    }

    /// Returns the preferred provider for the given task category, if any.
    #[must_use]
    pub fn for_task(&self, task: TaskType) -> Option<Provider> {
        match task {
            TaskType::WebSearch => self.web_search,
            TaskType::Coding => self.coding,
            TaskType::TextGeneration => self.text_generation,
            TaskType::Summarization => self.summarization,
            TaskType::Extraction => self.extraction,
        }
    }
}

/// External policy hooks applied during constraint derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Restrict ranking to candidates at or below this cost tier.
    /// Defaults to the least restrictive tier.
    pub max_cost_tier: CostTier,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            max_cost_tier: CostTier::High,
        }
    }
}

/// Immutable configuration for the scoring engine and decision builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Component weights.
    pub weights: ScoringWeights,

    /// Capability alignment bonuses.
    pub bonuses: CapabilityBonuses,

    /// Per-task additive adjustments.
    pub nudges: TaskNudges,

    /// Provider preference order; index is the preference rank.
    pub provider_preference: Vec<Provider>,

    /// Per-task preferred provider overrides.
    pub preferred_providers: PreferredProviders,

    /// Constraint derivation policy.
    pub policy: RoutingPolicy,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            bonuses: CapabilityBonuses::default(),
            nudges: TaskNudges::default(),
            provider_preference: vec![Provider::Gemini, Provider::OpenAi, Provider::Anthropic],
            preferred_providers: PreferredProviders::default(),
            policy: RoutingPolicy::default(),
        }
    }
}

impl RoutingConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based rank of the provider in the preference order, or
    /// [`PROVIDER_RANK_UNLISTED`] when absent.
    #[must_use]
    pub fn preference_rank(&self, provider: Provider) -> u32 {
        self.provider_preference
            .iter()
            .position(|p| *p == provider)
            .map_or(PROVIDER_RANK_UNLISTED, |i| i as u32)
    }

    /// Replaces the preferred-provider table.
    #[must_use]
    pub fn with_preferred_providers(mut self, preferred: PreferredProviders) -> Self {
        self.preferred_providers = preferred;
        self
    }

    /// Replaces the provider preference order.
    #[must_use]
    pub fn with_provider_preference(mut self, order: Vec<Provider>) -> Self {
        self.provider_preference = order;
        self
    }

    /// Replaces the routing policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RoutingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replaces the per-task nudge table.
    #[must_use]
    pub fn with_nudges(mut self, nudges: TaskNudges) -> Self {
        self.nudges = nudges;
        self
    }
}
