//! Deterministic candidate scoring.
//!
//! Annotates every filtered descriptor with a numeric score (lower is
//! better) and a reason string recording the breakdown. Scores are pure
//! arithmetic over fixed configuration; identical inputs always produce
//! identical scores.

use router_core::{ModelCandidate, ModelDescriptor, OutputFormat, RouteConstraints, TaskType};

use crate::config::RoutingConfig;

/// Scores every filtered descriptor against the constraints.
///
/// `score = w_cost * cost_rank + w_latency * latency_rank
///        + w_provider_pref * preference_rank + task_nudge + bonuses`
///
/// Capability bonuses are negative adjustments awarded when an optional
/// capability aligns with the request; they stack independently.
#[must_use]
pub fn score_candidates(
    filtered: &[&ModelDescriptor],
    constraints: &RouteConstraints,
    config: &RoutingConfig,
) -> Vec<ModelCandidate> {
    filtered
        .iter()
        .map(|descriptor| score_one(descriptor, constraints, config))
        .collect()
}

fn score_one(
    descriptor: &ModelDescriptor,
    constraints: &RouteConstraints,
    config: &RoutingConfig,
) -> ModelCandidate {
    let preference_rank = config.preference_rank(descriptor.provider);

    let cost_component = config.weights.cost * f64::from(descriptor.cost_tier.rank());
    let latency_component = config.weights.latency * f64::from(descriptor.latency_hint.rank());
    let preference_component = config.weights.provider_preference * f64::from(preference_rank);
    let nudge = config.nudges.for_task(constraints.task_type);
    let bonuses = capability_bonuses(descriptor, constraints, config);

    let score = cost_component + latency_component + preference_component + nudge + bonuses;

    let reason = format!(
        "cost={}({:.1}) latency={}({:.1}) provider_rank={}({:.1}) nudge={:+.2} bonuses={:+.2}",
        descriptor.cost_tier.as_str(),
        cost_component,
        descriptor.latency_hint.as_str(),
        latency_component,
        preference_rank,
        preference_component,
        nudge,
        bonuses,
    );

    ModelCandidate {
        key: descriptor.key.clone(),
        provider: descriptor.provider,
        model: descriptor.model.clone(),
        cost_tier: descriptor.cost_tier,
        latency_tier: descriptor.latency_hint,
        score,
        provider_preference_rank: preference_rank,
        pricing: descriptor.pricing,
        reason,
    }
}

fn capability_bonuses(
    descriptor: &ModelDescriptor,
    constraints: &RouteConstraints,
    config: &RoutingConfig,
) -> f64 {
    let mut total = 0.0;
    if constraints.task_type == TaskType::Coding && descriptor.good_for_code {
        total += config.bonuses.code;
    }
    if constraints.needs_web && descriptor.supports_web {
        total += config.bonuses.web;
    }
    if constraints.output_format == OutputFormat::Json && descriptor.supports_json {
        total += config.bonuses.json;
    }
    total
}
