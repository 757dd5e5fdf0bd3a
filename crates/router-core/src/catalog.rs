//! Model catalog descriptors.
//!
//! The catalog is owned by an external collaborator; the router only reads
//! it. Each [`ModelDescriptor`] carries the capability flags, coarse tiers,
//! and per-token pricing the routing pipeline needs.

use serde::{Deserialize, Serialize};

/// Backend provider identity.
///
/// Modeled as a closed enumeration so preference tables and nudge tables
/// can be checked for exhaustiveness at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Google Gemini.
    Gemini,
    /// OpenAI.
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic.
    Anthropic,
}

impl Provider {
    /// Returns the string representation used in reasons and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse cost bucket, totally ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    /// Cheapest bucket.
    Low,
    /// Mid-range bucket.
    Medium,
    /// Most expensive bucket.
    High,
}

impl CostTier {
    /// Numeric rank used by the scoring engine: 0, 1, or 2.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Returns the string representation used in reasons and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Coarse latency bucket, totally ordered: `Fast < Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyTier {
    /// Low-latency backend.
    Fast,
    /// Standard latency.
    Normal,
}

impl LatencyTier {
    /// Numeric rank used by the scoring engine: 0 or 1.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Fast => 0,
            Self::Normal => 1,
        }
    }

    /// Returns the string representation used in reasons and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Normal => "normal",
        }
    }
}

/// Per-token pricing for a catalog entry, in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Input price, USD per million tokens.
    pub input_per_million: f64,
    /// Output price, USD per million tokens.
    pub output_per_million: f64,
}

impl ModelPricing {
    /// Creates pricing from input/output rates.
    #[must_use]
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }
}

/// One catalog entry describing an available backend model.
///
/// Descriptors are read-only to the router. `pricing` is optional: a
/// descriptor with no pricing is treated as unpriced and excluded from any
/// metered budget gate rather than assigned a numeric sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Stable unique key (e.g. `"gemini_flash"`), used in analytics and
    /// tie-breaking.
    pub key: String,

    /// Provider that serves this model.
    pub provider: Provider,

    /// Provider-specific model identifier (e.g. `"models/gemini-2.5-flash"`).
    pub model: String,

    /// Coarse cost bucket.
    pub cost_tier: CostTier,

    /// Coarse latency bucket.
    pub latency_hint: LatencyTier,

    /// Whether the model can ground answers with live web results.
    pub supports_web: bool,

    /// Whether the model reliably emits structured JSON.
    pub supports_json: bool,

    /// Whether the model is a good choice for coding tasks.
    pub good_for_code: bool,

    /// Per-token pricing; `None` means unpriced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<ModelPricing>,
}

impl ModelDescriptor {
    /// Creates a descriptor with conservative capability defaults.
    #[must_use]
    pub fn new(key: impl Into<String>, provider: Provider, model: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            provider,
            model: model.into(),
            cost_tier: CostTier::Low,
            latency_hint: LatencyTier::Normal,
            supports_web: false,
            supports_json: true,
            good_for_code: false,
            pricing: None,
        }
    }

    /// Sets the cost tier.
    #[must_use]
    pub fn with_cost_tier(mut self, tier: CostTier) -> Self {
        self.cost_tier = tier;
        self
    }

    /// Sets the latency hint.
    #[must_use]
    pub fn with_latency(mut self, tier: LatencyTier) -> Self {
        self.latency_hint = tier;
        self
    }

    /// Marks the model as web-capable.
    #[must_use]
    pub fn with_web_support(mut self) -> Self {
        self.supports_web = true;
        self
    }

    /// Sets whether the model supports structured JSON output.
    #[must_use]
    pub fn with_json_support(mut self, supports: bool) -> Self {
        self.supports_json = supports;
        self
    }

    /// Marks the model as good for coding tasks.
    #[must_use]
    pub fn with_code_support(mut self) -> Self {
        self.good_for_code = true;
        self
    }

    /// Attaches per-token pricing.
    #[must_use]
    pub fn with_pricing(mut self, input_per_million: f64, output_per_million: f64) -> Self {
        self.pricing = Some(ModelPricing::new(input_per_million, output_per_million));
        self
    }
}
