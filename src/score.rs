// 📊 Fiscal Responsibility Score
// Percentage of consolidated entries whose balance ended strictly positive.
//
//   score = round(100 * positive_count / transaction_count, 2)

use crate::consolidation::{consolidate, ConsolidationEntry};
use crate::error::{FiscalError, Result};
use crate::transaction::{validate_transactions, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fractional digits kept in a score
pub const DEFAULT_FRACTION_DIGITS: u32 = 2;

// ============================================================================
// POSITIVITY COUNTER
// ============================================================================

/// Number of entries whose `current_balance` is strictly greater than zero
pub fn count_positive(history: &[ConsolidationEntry]) -> usize {
    history.iter().filter(|entry| entry.is_positive()).count()
}

// ============================================================================
// ROUNDING
// ============================================================================

/// Round half away from zero to `digits` fractional places
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Render a score with at most two fractional digits and no trailing zeros
pub fn format_score(score: f64) -> String {
    let fixed = format!("{:.*}", DEFAULT_FRACTION_DIGITS as usize, round_to(score, DEFAULT_FRACTION_DIGITS));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// SCORE CALCULATOR
// ============================================================================

/// Score with default settings and no input validation.
///
/// Fails with `InvalidArgument` when `transactions` is empty.
pub fn score(initial_balance: f64, transactions: &[Transaction]) -> Result<f64> {
    ScoreCalculator::lenient().score(initial_balance, transactions)
}

/// Full result of a scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub initial_balance: f64,
    pub transaction_count: usize,
    pub positive_count: usize,
    pub score: f64,
    pub history: Vec<ConsolidationEntry>,
}

impl ScoreReport {
    pub fn summary(&self) -> String {
        format!(
            "Fiscal responsibility score {}%: {} of {} balances positive (initial balance {:.2})",
            format_score(self.score),
            self.positive_count,
            self.transaction_count,
            self.initial_balance
        )
    }
}

#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    /// Fractional digits kept after rounding (default: 2)
    pub fraction_digits: u32,

    /// Validate dates and amounts before consolidating (default: true)
    pub strict: bool,
}

impl ScoreCalculator {
    pub fn new() -> Self {
        ScoreCalculator {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            strict: true,
        }
    }

    /// Skips validation, matching the plain `score` function
    pub fn lenient() -> Self {
        ScoreCalculator {
            strict: false,
            ..Self::new()
        }
    }

    pub fn with_fraction_digits(mut self, fraction_digits: u32) -> Self {
        self.fraction_digits = fraction_digits;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Consolidate, count and normalize in one pass
    ///
    /// Example:
    /// ```
    /// use fiscal_score::{ScoreCalculator, Transaction};
    ///
    /// let transactions = vec![
    ///     Transaction::new("2024-07-06", 75.0),
    ///     Transaction::new("2024-07-03", -50.0),
    ///     Transaction::new("2024-07-01", -300.0),
    /// ];
    ///
    /// let report = ScoreCalculator::new().report(100.0, &transactions).unwrap();
    /// assert_eq!(report.positive_count, 2);
    /// assert_eq!(report.score, 66.67);
    /// assert_eq!(report.history[0].previous_balance, 100.0);
    /// ```
    pub fn report(&self, initial_balance: f64, transactions: &[Transaction]) -> Result<ScoreReport> {
        if transactions.is_empty() {
            return Err(FiscalError::InvalidArgument(
                "cannot score an empty transaction list".to_string(),
            ));
        }

        if self.strict {
            validate_transactions(transactions)?;
        }

        let history = consolidate(initial_balance, transactions);
        let positive_count = count_positive(&history);
        let raw = 100.0 * positive_count as f64 / transactions.len() as f64;
        let score = round_to(raw, self.fraction_digits);

        debug!(positive_count, total = transactions.len(), raw, score, "scored transactions");

        Ok(ScoreReport {
            initial_balance,
            transaction_count: transactions.len(),
            positive_count,
            score,
            history,
        })
    }

    pub fn score(&self, initial_balance: f64, transactions: &[Transaction]) -> Result<f64> {
        self.report(initial_balance, transactions).map(|report| report.score)
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
