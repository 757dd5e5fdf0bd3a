//! # Router Core
//!
//! Core types and error handling for the LLM Model Router.
//!
//! This crate defines the domain model shared by the routing engine, the
//! budget ledger, and the fallback executor:
//! - Validated prompt profiles (the classified input)
//! - Catalog descriptors with capability, tier, and pricing metadata
//! - Routing constraints, scored candidates, and decision records
//! - The classified invocation error taxonomy

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod decision;
pub mod error;
pub mod profile;

// Re-export main types
pub use catalog::{CostTier, LatencyTier, ModelDescriptor, ModelPricing, Provider};
pub use decision::{ModelCandidate, RouteConstraints, RouteDecision};
pub use error::InvocationError;
pub use profile::{OutputFormat, PromptProfile, TaskType, Urgency};
