// 💳 Transactions - input records + loaders
// A transaction is just a date and a signed amount. Positive amounts are
// outflows, negative amounts are inflows.

use crate::error::{FiscalError, Result};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// ISO-8601 calendar date, the only format accepted by validation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Source identifier, carried through but never used by scoring
    #[serde(default, rename = "transaction_id", alias = "id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// "YYYY-MM-DD"
    pub date: String,

    pub amount: f64,
}

impl Transaction {
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Transaction {
            id: None,
            date: date.into(),
            amount,
        }
    }

    /// Builder pattern: attach a source id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Parsed calendar date, if `date` is well formed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Check `date` and `amount`. `index` is the position in the input list
    /// and is only used for error reporting.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.date.trim().is_empty() {
            return Err(FiscalError::Validation {
                index,
                field: "date",
                message: "Required field is empty".to_string(),
            });
        }

        // Parsing alone accepts "2024-7-6"; the ordering relies on a fixed
        // width string, so the round trip must be exact.
        match self.parsed_date() {
            Some(date) if date.format(DATE_FORMAT).to_string() == self.date => {}
            _ => {
                return Err(FiscalError::Validation {
                    index,
                    field: "date",
                    message: format!("'{}' is not a YYYY-MM-DD date", self.date),
                });
            }
        }

        if !self.amount.is_finite() {
            return Err(FiscalError::Validation {
                index,
                field: "amount",
                message: format!("{} is not a finite number", self.amount),
            });
        }

        Ok(())
    }
}

/// Validate every transaction, stopping at the first failure
pub fn validate_transactions(transactions: &[Transaction]) -> Result<()> {
    for (index, tx) in transactions.iter().enumerate() {
        if let Err(err) = tx.validate(index) {
            warn!(%err, "rejecting transaction list");
            return Err(err);
        }
    }
    Ok(())
}

// ============================================================================
// LOADERS
// ============================================================================

/// Read transactions from CSV with a `date,amount[,transaction_id]` header
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut transactions = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let tx: Transaction =
            result.with_context(|| format!("Failed to deserialize transaction on line {}", line + 2))?;
        transactions.push(tx);
    }

    Ok(transactions)
}

pub fn load_csv(csv_path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;
    read_csv(file)
}

/// Read a JSON array of transaction objects
pub fn read_json(json: &str) -> anyhow::Result<Vec<Transaction>> {
    serde_json::from_str(json).context("Failed to deserialize transactions from JSON")
}

pub fn load_json(json_path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let json = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file {}", json_path.display()))?;
    read_json(&json)
}

/// Load transactions, picking the format from the file extension
pub fn load_transactions(path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let transactions = match extension.as_deref() {
        Some("csv") => load_csv(path)?,
        Some("json") => load_json(path)?,
        _ => bail!(
            "Unsupported transaction file {}: expected a .csv or .json extension",
            path.display()
        ),
    };

    debug!(count = transactions.len(), path = %path.display(), "loaded transactions");
    Ok(transactions)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_validate_accepts_iso_dates() {
        let tx = Transaction::new("2024-07-06", 75.0);
        assert!(tx.validate(0).is_ok());
        assert_eq!(tx.parsed_date(), NaiveDate::from_ymd_opt(2024, 7, 6));
    }

    #[test]
    fn test_validate_rejects_bad_dates() {
        for date in ["", "07/06/2024", "2024-7-6", "2024-02-30", "yesterday"] {
            let err = Transaction::new(date, 1.0).validate(3).unwrap_err();
            assert!(err.is_validation(), "{date:?} should be rejected");
            assert!(matches!(err, FiscalError::Validation { index: 3, field: "date", .. }));
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_amounts() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Transaction::new("2024-07-06", amount).validate(0).unwrap_err();
            assert!(matches!(err, FiscalError::Validation { field: "amount", .. }));
        }
    }

    #[test]
    fn test_validate_transactions_reports_first_failure() {
        let transactions = vec![
            Transaction::new("2024-07-06", 75.0),
            Transaction::new("not a date", -50.0),
            Transaction::new("2024-07-01", f64::NAN),
        ];

        let err = validate_transactions(&transactions).unwrap_err();
        assert!(matches!(err, FiscalError::Validation { index: 1, field: "date", .. }));
        assert!(validate_transactions(&[]).is_ok());
    }

    #[test]
    fn test_read_csv() {
        let data = "\
transaction_id,date,amount
3,2024-07-06,75
2,2024-07-03,-50.5
1, 2024-07-01 ,100
";
        let transactions = read_csv(data.as_bytes()).unwrap();

        assert_eq!(
            transactions,
            vec![
                Transaction::new("2024-07-06", 75.0).with_id("3"),
                Transaction::new("2024-07-03", -50.5).with_id("2"),
                Transaction::new("2024-07-01", 100.0).with_id("1"),
            ]
        );
    }

    #[test]
    fn test_read_csv_without_id_column() {
        let data = "date,amount\n2024-07-06,20\n";
        let transactions = read_csv(data.as_bytes()).unwrap();

        assert_eq!(transactions, vec![Transaction::new("2024-07-06", 20.0)]);
    }

    #[test]
    fn test_read_csv_bad_amount() {
        let data = "date,amount\n2024-07-06,twenty\n";
        let err = read_csv(data.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("line 2"), "{err:#}");
    }

    #[test]
    fn test_read_json() {
        let json = r#"[
            { "transaction_id": "7", "date": "2024-07-06", "amount": 20 },
            { "id": "6", "date": "2024-07-03", "amount": -100 },
            { "date": "2024-07-01", "amount": 10.25 }
        ]"#;
        let transactions = read_json(json).unwrap();

        assert_eq!(
            transactions,
            vec![
                Transaction::new("2024-07-06", 20.0).with_id("7"),
                Transaction::new("2024-07-03", -100.0).with_id("6"),
                Transaction::new("2024-07-01", 10.25),
            ]
        );
    }

    #[test]
    fn test_read_json_missing_amount() {
        assert!(read_json(r#"[{ "date": "2024-07-06" }]"#).is_err());
    }

    #[test]
    fn test_load_transactions_rejects_unknown_extension() {
        let err = load_transactions(Path::new("transactions.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
