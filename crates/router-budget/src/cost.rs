//! Cost estimation.
//!
//! Computes the prospective USD cost of a call from token counts and
//! per-token catalog pricing. A descriptor with no pricing yields an
//! explicit [`CostEstimate::Unpriced`] outcome rather than an infinite
//! sentinel, so unknown pricing can never silently participate in
//! arithmetic.

use serde::{Deserialize, Serialize};

use router_core::ModelPricing;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Outcome of estimating a call's cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CostEstimate {
    /// Estimated cost in USD.
    Priced {
        /// Estimated amount in USD.
        usd: f64,
    },
    /// The catalog carries no pricing for this model. Unpriced candidates
    /// are excluded from any metered budget gate and only run under an
    /// unlimited wallet.
    Unpriced,
}

impl CostEstimate {
    /// The estimated amount, when priced.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Priced { usd } => Some(*usd),
            Self::Unpriced => None,
        }
    }

    /// Whether pricing was known.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        matches!(self, Self::Priced { .. })
    }
}

impl std::fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Priced { usd } => write!(f, "${usd:.8}"),
            Self::Unpriced => f.write_str("unpriced"),
        }
    }
}

/// Estimates the USD cost of a call.
///
/// `cost = input_tokens / 1e6 * price_in + output_tokens / 1e6 * price_out`.
/// Token counts are estimates supplied by an external tokenizer or the
/// [`estimate_tokens`] heuristic.
#[must_use]
pub fn estimate_call_cost(
    pricing: Option<ModelPricing>,
    input_tokens: u32,
    output_tokens: u32,
) -> CostEstimate {
    match pricing {
        Some(p) => {
            let usd = f64::from(input_tokens) / TOKENS_PER_MILLION * p.input_per_million
                + f64::from(output_tokens) / TOKENS_PER_MILLION * p.output_per_million;
            CostEstimate::Priced { usd }
        }
        None => CostEstimate::Unpriced,
    }
}

/// Fast token-count heuristic: one token per four characters, minimum one.
///
/// Callers with a real tokenizer should use it instead; this exists so the
/// pipeline has a usable default for prompt-length estimation.
#[must_use]
pub fn estimate_tokens(text: &str) -> u32 {
    let tokens = text.len().div_ceil(4);
    u32::try_from(tokens.max(1)).unwrap_or(u32::MAX)
}
