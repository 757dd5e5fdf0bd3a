//! # Router Engine
//!
//! Deterministic routing decision engine for the LLM Model Router.
//!
//! This crate provides:
//! - Constraint derivation from validated prompt profiles
//! - Hard capability/tier filtering over the model catalog
//! - Deterministic scoring with configurable weights, nudges, and bonuses
//! - Decision assembly with a fully resolved tie-break order and
//!   preferred-provider promotion
//!
//! The whole pipeline is a pure, synchronous computation: it reads the
//! catalog and constraints, holds no shared mutable state, and may be
//! invoked concurrently without coordination.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constraints;
pub mod filter;
pub mod router;
pub mod scoring;

// Re-export main types
pub use config::{
    CapabilityBonuses, PreferredProviders, RoutingConfig, RoutingPolicy, ScoringWeights,
    TaskNudges, PROVIDER_RANK_UNLISTED,
};
pub use constraints::derive_constraints;
pub use filter::{filter_catalog, satisfies_constraints};
pub use router::DeterministicRouter;
pub use scoring::score_candidates;
