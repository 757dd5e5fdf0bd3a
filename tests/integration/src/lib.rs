//! Integration tests for the LLM Model Router
//!
//! This crate provides end-to-end tests covering:
//! - Routing decisions over a realistic catalog
//! - Budget enforcement across the routing/execution seam
//! - Fallback execution against scripted backends
//! - Full profile-to-response request flows

pub mod helpers;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;
pub use mock_backends::*;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod routing_tests;
