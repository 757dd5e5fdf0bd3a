//! Per-caller budget wallet.

use serde::{Deserialize, Serialize};

/// A caller's monthly allowance and cumulative committed spend.
///
/// `spend <= allowance` is advisory, not structural: [`can_afford`] must be
/// consulted before committing. Spend never decreases within the core;
/// replenishment is an external, time-based policy.
///
/// [`can_afford`]: BudgetWallet::can_afford
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetWallet {
    /// Monthly allowance in USD. Infinite for unmetered callers.
    pub allowance: f64,

    /// Cumulative committed spend in USD. Never negative.
    pub spent: f64,
}

impl BudgetWallet {
    /// Creates a wallet with the given monthly allowance and zero spend.
    #[must_use]
    pub fn new(allowance: f64) -> Self {
        Self {
            allowance: allowance.max(0.0),
            spent: 0.0,
        }
    }

    /// Creates an unmetered wallet with an infinite allowance.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            allowance: f64::INFINITY,
            spent: 0.0,
        }
    }

    /// Whether this wallet enforces a finite allowance.
    #[must_use]
    pub fn is_metered(&self) -> bool {
        self.allowance.is_finite()
    }

    /// Remaining budget: `max(0, allowance - spent)`.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        (self.allowance - self.spent).max(0.0)
    }

    /// Advisory affordability check for an estimated cost.
    #[must_use]
    pub fn can_afford(&self, estimate: f64) -> bool {
        estimate <= self.remaining()
    }

    /// Records a committed spend. Negative amounts are ignored so spend can
    /// never decrease.
    pub fn record_spend(&mut self, amount: f64) {
        if amount > 0.0 {
            self.spent += amount;
        }
    }
}
