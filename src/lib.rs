// Fiscal Score - Core Library
// Balance history consolidation + fiscal responsibility scoring

pub mod error;
pub mod transaction;
pub mod consolidation;
pub mod score;

// Re-export commonly used types
pub use error::{FiscalError, Result};
pub use transaction::{
    Transaction, DATE_FORMAT,
    validate_transactions, read_csv, load_csv, read_json, load_json, load_transactions,
};
pub use consolidation::{
    ConsolidationEntry,
    consolidate, sort_by_date_descending,
};
pub use score::{
    ScoreCalculator, ScoreReport, DEFAULT_FRACTION_DIGITS,
    count_positive, score, round_to, format_score,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
