//! Constraint derivation.
//!
//! Maps a semantic [`PromptProfile`] into the concrete [`RouteConstraints`]
//! used for filtering. Pure and infallible.

use router_core::{LatencyTier, PromptProfile, RouteConstraints, Urgency};

use crate::config::RoutingPolicy;

/// Derives hard routing constraints from a profile.
///
/// The latency tier is `Fast` iff the profile's urgency is `Fast`. The cost
/// ceiling comes from the policy and defaults to unrestricted.
#[must_use]
pub fn derive_constraints(profile: &PromptProfile, policy: &RoutingPolicy) -> RouteConstraints {
    RouteConstraints {
        task_type: profile.task_type,
        needs_web: profile.needs_web,
        needs_code: profile.needs_code,
        output_format: profile.output_format,
        latency_tier: match profile.urgency {
            Urgency::Fast => LatencyTier::Fast,
            Urgency::Normal => LatencyTier::Normal,
        },
        max_cost_tier: policy.max_cost_tier,
    }
}
