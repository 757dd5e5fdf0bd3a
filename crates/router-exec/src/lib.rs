//! # Router Exec
//!
//! Budgeted fallback execution harness for the LLM Model Router.
//!
//! This crate provides:
//! - The [`CompletionBackend`] trait, the narrow async boundary through
//!   which the core reaches real providers (the core itself performs no
//!   I/O)
//! - The [`BackendRegistry`] with create-once, race-safe per-provider
//!   client initialization
//! - The [`FallbackExecutor`], which walks a ranked decision chain
//!   sequentially, validates output, and commits cost to the budget ledger
//!   only on success

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod executor;
pub mod registry;

// Re-export main types
pub use backend::{BackendResponse, CompletionBackend, CompletionRequest, WebSource};
pub use executor::{
    AttemptFailure, AttemptOutcome, AttemptRecord, BudgetPolicy, CompletionOutcome,
    ExecutionError, ExecutorConfig, FallbackExecutor,
};
pub use registry::BackendRegistry;
