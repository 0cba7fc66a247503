// 📒 Consolidation - Replay transactions into a balance history
//
// Sign convention: a positive amount is ADDED to the running balance and a
// negative amount is subtracted, i.e. balance += amount.
//
// The history is emitted newest-first, and the running balance is folded
// in that same order: the most recent entry starts from the initial
// balance. This does not rebuild the true historical balance and must not
// be "fixed" to an oldest-first replay; scores are defined on this order.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// CONSOLIDATION ENTRY
// ============================================================================

/// One step of the balance history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationEntry {
    pub date: String,
    pub amount: f64,
    pub previous_balance: f64,
    pub current_balance: f64,
}

impl ConsolidationEntry {
    pub fn is_positive(&self) -> bool {
        self.current_balance > 0.0
    }
}

// ============================================================================
// CONSOLIDATOR
// ============================================================================

/// Copy of `transactions` ordered most recent first.
///
/// Dates are compared as strings, which orders ISO dates chronologically.
/// The sort is stable: transactions sharing a date keep their input order.
pub fn sort_by_date_descending(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Signed change a transaction applies to the running balance
fn adjustment(amount: f64) -> f64 {
    if amount > 0.0 {
        amount.abs()
    } else {
        -amount.abs()
    }
}

/// Build the balance history for `transactions`, newest entry first.
///
/// `history[0].previous_balance == initial_balance` and each following
/// entry starts from the previous entry's `current_balance`.
pub fn consolidate(initial_balance: f64, transactions: &[Transaction]) -> Vec<ConsolidationEntry> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let mut balance = initial_balance;
    let history: Vec<ConsolidationEntry> = sort_by_date_descending(transactions)
        .into_iter()
        .map(|tx| {
            // Intentional: folds newest-to-oldest, see module header
            let current_balance = balance + adjustment(tx.amount);
            let entry = ConsolidationEntry {
                date: tx.date,
                amount: tx.amount,
                previous_balance: balance,
                current_balance,
            };
            balance = current_balance;
            entry
        })
        .collect();

    debug!(
        transactions = history.len(),
        initial_balance,
        final_balance = balance,
        "consolidated balance history"
    );

    history
}

// ============================================================================
// TESTS
// ============================================================================
