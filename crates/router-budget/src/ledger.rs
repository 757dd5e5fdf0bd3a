//! Concurrency-safe budget ledger.
//!
//! The ledger wraps a [`BudgetWallet`] in a per-caller lock and exposes an
//! atomic reserve/commit/release protocol. The affordability check and the
//! hold are taken under the same lock, so two concurrent requests for the
//! same caller cannot both pass the gate and drive spend past the
//! allowance. Cost is charged only when a reservation is committed after a
//! verified backend success; dropping an unsettled reservation (including
//! through cancellation) releases the hold and charges nothing.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::wallet::BudgetWallet;

/// Errors raised by the budget ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    /// A reservation was requested for a negative amount.
    #[error("cannot reserve a negative amount: {amount}")]
    NegativeAmount {
        /// The rejected amount.
        amount: f64,
    },

    /// The estimated cost exceeds the remaining (unreserved) budget.
    #[error("estimated cost ${estimated:.8} exceeds remaining budget ${remaining:.8}")]
    InsufficientFunds {
        /// The estimated cost that could not be held.
        estimated: f64,
        /// Remaining budget at the time of the check.
        remaining: f64,
    },
}

#[derive(Debug)]
struct LedgerState {
    wallet: BudgetWallet,
    reserved: f64,
}

impl LedgerState {
    fn remaining(&self) -> f64 {
        (self.wallet.remaining() - self.reserved).max(0.0)
    }
}

/// Shared, thread-safe view of one caller's budget.
///
/// Cheap to clone; all clones share the same underlying wallet state.
#[derive(Debug, Clone)]
pub struct BudgetLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl BudgetLedger {
    /// Creates a ledger over the given wallet.
    #[must_use]
    pub fn new(wallet: BudgetWallet) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                wallet,
                reserved: 0.0,
            })),
        }
    }

    /// Creates a ledger with an infinite allowance.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(BudgetWallet::unlimited())
    }

    /// Whether the underlying wallet enforces a finite allowance.
    #[must_use]
    pub fn is_metered(&self) -> bool {
        self.state.lock().wallet.is_metered()
    }

    /// Remaining budget, net of outstanding reservations.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.state.lock().remaining()
    }

    /// Cumulative committed spend.
    #[must_use]
    pub fn spent(&self) -> f64 {
        self.state.lock().wallet.spent
    }

    /// Advisory affordability check against the unreserved remainder.
    #[must_use]
    pub fn can_afford(&self, estimate: f64) -> bool {
        estimate <= self.remaining()
    }

    /// Atomically checks affordability and holds `amount` against the
    /// budget.
    ///
    /// The hold is released when the returned reservation is dropped or
    /// explicitly released, and converted into committed spend by
    /// [`BudgetReservation::commit`].
    pub fn reserve(&self, amount: f64) -> Result<BudgetReservation, BudgetError> {
        if amount < 0.0 {
            return Err(BudgetError::NegativeAmount { amount });
        }

        let mut state = self.state.lock();
        let remaining = state.remaining();
        if amount > remaining {
            warn!(
                estimated = amount,
                remaining,
                "budget reservation refused"
            );
            return Err(BudgetError::InsufficientFunds {
                estimated: amount,
                remaining,
            });
        }
        state.reserved += amount;
        drop(state);

        Ok(BudgetReservation {
            ledger: self.clone(),
            amount,
            settled: false,
        })
    }

    /// A point-in-time copy of the wallet.
    #[must_use]
    pub fn snapshot(&self) -> BudgetWallet {
        self.state.lock().wallet
    }
}

/// A held portion of the budget awaiting the outcome of one backend call.
#[derive(Debug)]
pub struct BudgetReservation {
    ledger: BudgetLedger,
    amount: f64,
    settled: bool,
}

impl BudgetReservation {
    /// The held amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Converts the hold into committed spend. Call only after the backend
    /// call has verifiably succeeded.
    pub fn commit(mut self) {
        self.settle(true);
    }

    /// Releases the hold without charging anything.
    pub fn release(mut self) {
        self.settle(false);
    }

    fn settle(&mut self, commit: bool) {
        if self.settled {
            return;
        }
        self.settled = true;

        let mut state = self.ledger.state.lock();
        state.reserved = (state.reserved - self.amount).max(0.0);
        if commit {
            state.wallet.record_spend(self.amount);
            debug!(amount = self.amount, spent = state.wallet.spent, "budget committed");
        }
    }
}

impl Drop for BudgetReservation {
    fn drop(&mut self) {
        self.settle(false);
    }
}
