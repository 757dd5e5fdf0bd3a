//! # Router Budget
//!
//! Cost estimation and per-caller budget accounting for the LLM Model
//! Router.
//!
//! This crate provides:
//! - A cost estimator over per-token catalog pricing, with an explicit
//!   unpriced outcome instead of a numeric sentinel
//! - The [`BudgetWallet`] value type (monthly allowance vs. cumulative
//!   spend)
//! - The concurrency-safe [`BudgetLedger`] with an atomic
//!   reserve/commit/release protocol, so concurrent requests for the same
//!   caller cannot both pass an affordability check and overdrive the
//!   allowance

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cost;
pub mod ledger;
pub mod wallet;

// Re-export main types
pub use cost::{estimate_call_cost, estimate_tokens, CostEstimate};
pub use ledger::{BudgetError, BudgetLedger, BudgetReservation};
pub use wallet::BudgetWallet;
