//! Hard capability filtering.
//!
//! Removes catalog descriptors that cannot satisfy the derived constraints.
//! Filtering is a total, order-independent predicate with no state and no
//! side effects; an empty result is a valid, expected outcome.

use router_core::{LatencyTier, ModelDescriptor, OutputFormat, RouteConstraints};

/// Whether a descriptor satisfies every hard constraint.
#[must_use]
pub fn satisfies_constraints(descriptor: &ModelDescriptor, constraints: &RouteConstraints) -> bool {
    if constraints.needs_web && !descriptor.supports_web {
        return false;
    }
    if constraints.needs_code && !descriptor.good_for_code {
        return false;
    }
    if constraints.output_format == OutputFormat::Json && !descriptor.supports_json {
        return false;
    }
    if constraints.latency_tier == LatencyTier::Fast
        && descriptor.latency_hint != LatencyTier::Fast
    {
        return false;
    }
    if descriptor.cost_tier > constraints.max_cost_tier {
        return false;
    }
    true
}

/// Filters the catalog down to descriptors satisfying the constraints,
/// preserving catalog order.
#[must_use]
pub fn filter_catalog<'a>(
    catalog: &'a [ModelDescriptor],
    constraints: &RouteConstraints,
) -> Vec<&'a ModelDescriptor> {
    catalog
        .iter()
        .filter(|descriptor| satisfies_constraints(descriptor, constraints))
        .collect()
}
