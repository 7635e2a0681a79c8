//! Transaction extraction from receipt and statement text.

mod receipt;
pub mod rules;
mod statement;

pub use receipt::ReceiptParser;
pub use statement::{SkipReason, SkippedLine, StatementExtraction, StatementParser};

use tracing::warn;

use crate::error::DerivationError;
use crate::models::transaction::TransactionCandidate;

/// Description attached to candidates derived from a receipt.
pub const RECEIPT_DESCRIPTION: &str = "From receipt scan";

/// Result type for derivation operations.
pub type Result<T> = std::result::Result<T, DerivationError>;

/// Trait for parsers turning extracted text into transaction candidates.
pub trait TransactionParser {
    /// What one document yields.
    type Output;

    /// Parse candidates from text.
    fn parse(&self, text: &str) -> Result<Self::Output>;
}

/// Parse a receipt with default settings.
///
/// Derivation failures are logged and reported as no candidate.
pub fn parse_receipt(text: &str) -> Option<TransactionCandidate> {
    match ReceiptParser::new().parse(text) {
        Ok(candidate) => candidate,
        Err(e) => {
            warn!("Could not derive a transaction from receipt text: {}", e);
            None
        }
    }
}

/// Parse every transaction line of a statement with default settings.
pub fn parse_statement(text: &str) -> Vec<TransactionCandidate> {
    StatementParser::new().extract(text).candidates
}
