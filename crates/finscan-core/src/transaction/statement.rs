//! Bank statement parser.

use serde::Serialize;
use tracing::{debug, info};

use crate::models::transaction::TransactionCandidate;

use super::rules::patterns::STATEMENT_LINE;
use super::rules::{normalize_amount, parse_us_date, CategoryClassifier};
use super::{Result, TransactionParser};

/// Why a statement line was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The date segment is not a valid `MM/DD/YYYY` date.
    MalformedDate,
    /// The amount segment does not fit a decimal.
    InvalidAmount,
}

/// A matched statement line that produced no candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// Matched source text.
    pub source: String,
    /// Byte offset of the match in the statement text.
    pub offset: usize,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Everything a statement yielded.
#[derive(Debug, Clone, Default)]
pub struct StatementExtraction {
    /// One candidate per valid line, in document order.
    pub candidates: Vec<TransactionCandidate>,
    /// Lines that matched the line pattern but were rejected.
    pub skipped: Vec<SkippedLine>,
}

/// Derives one candidate per `date description amount` line of a statement.
///
/// The line pattern runs over the whole text. Descriptions never span a line
/// break, but the description ends at the first decimal-looking number.
pub struct StatementParser {
    classifier: CategoryClassifier,
}

impl StatementParser {
    /// Create a new statement parser with default settings.
    pub fn new() -> Self {
        Self {
            classifier: CategoryClassifier::statements(),
        }
    }

    /// Set the category classifier.
    pub fn with_classifier(mut self, classifier: CategoryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Parse all lines, keeping track of the ones that were skipped.
    pub fn extract(&self, text: &str) -> StatementExtraction {
        info!("Parsing statement from {} characters of text", text.len());

        let mut result = StatementExtraction::default();

        for caps in STATEMENT_LINE.captures_iter(text) {
            let full_match = &caps[0];
            let offset = caps.get(0).map(|m| m.start()).unwrap_or_default();
            let skip = |reason| SkippedLine {
                source: full_match.to_string(),
                offset,
                reason,
            };

            let Some(date) = parse_us_date(&caps["date"]) else {
                debug!("Skipping statement line with malformed date: {:?}", full_match);
                result.skipped.push(skip(SkipReason::MalformedDate));
                continue;
            };

            let amount = match normalize_amount(&caps["amount"]) {
                Ok(amount) => amount,
                Err(e) => {
                    debug!("Skipping statement line: {}", e);
                    result.skipped.push(skip(SkipReason::InvalidAmount));
                    continue;
                }
            };

            let description = caps["desc"].trim();
            let category = self.classifier.classify(description);

            result.candidates.push(TransactionCandidate::from_signed(
                amount,
                category,
                description,
                date,
            ));
        }

        debug!(
            "Statement yielded {} transactions, skipped {} lines",
            result.candidates.len(),
            result.skipped.len()
        );

        result
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionParser for StatementParser {
    type Output = Vec<TransactionCandidate>;

    fn parse(&self, text: &str) -> Result<Self::Output> {
        Ok(self.extract(text).candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::{Category, TransactionType};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_two_lines() {
        let text = "01/15/2024 Starbucks Coffee -5.50\n01/16/2024 Paycheck Deposit 2000.00";
        let candidates = StatementParser::new().parse(text).unwrap();

        assert_eq!(
            candidates,
            vec![
                TransactionCandidate {
                    amount: dec("5.50"),
                    kind: TransactionType::Expense,
                    category: Category::Food,
                    description: "Starbucks Coffee".to_string(),
                    date: ymd(2024, 1, 15),
                },
                TransactionCandidate {
                    amount: dec("2000.00"),
                    kind: TransactionType::Income,
                    category: Category::Income,
                    description: "Paycheck Deposit".to_string(),
                    date: ymd(2024, 1, 16),
                },
            ]
        );
    }

    #[test]
    fn test_malformed_date_is_skipped() {
        let text = "13/45/2024 Bad Line -10.00\n01/17/2024 Uber Trip -12.40\n";
        let extraction = StatementParser::new().extract(text);

        assert_eq!(extraction.candidates.len(), 1);
        assert_eq!(extraction.candidates[0].description, "Uber Trip");
        assert_eq!(extraction.candidates[0].category, Category::Transport);
        assert_eq!(
            extraction.skipped,
            vec![SkippedLine {
                source: "13/45/2024 Bad Line -10.00".to_string(),
                offset: 0,
                reason: SkipReason::MalformedDate,
            }]
        );
    }

    #[test]
    fn test_two_digit_year_is_skipped() {
        let extraction = StatementParser::new().extract("01/15/24 Coffee -3.00");
        assert!(extraction.candidates.is_empty());
        assert_eq!(extraction.skipped[0].reason, SkipReason::MalformedDate);
    }

    #[test]
    fn test_amount_needing_rounding_is_skipped() {
        let text = "01/15/2024 Wire 1234567890123456789012345678.99\n01/16/2024 Lunch cafe -9.00";
        let extraction = StatementParser::new().extract(text);

        assert_eq!(extraction.candidates.len(), 1);
        assert_eq!(extraction.candidates[0].amount, dec("9.00"));
        assert_eq!(extraction.skipped[0].reason, SkipReason::InvalidAmount);
    }

    #[test]
    fn test_no_lines_is_empty() {
        let candidates = StatementParser::new()
            .parse("ACCOUNT SUMMARY\nNo activity this period")
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_symbols_and_separators() {
        let text = "02/01/2024 Rent payment -$1,450.00\n02/03/2024 City Electricity -$84.12";
        let candidates = StatementParser::new().parse(text).unwrap();

        assert_eq!(candidates[0].amount, dec("1450.00"));
        assert_eq!(candidates[0].kind, TransactionType::Expense);
        assert_eq!(candidates[0].category, Category::Income);
        assert_eq!(candidates[1].amount, dec("84.12"));
        assert_eq!(candidates[1].category, Category::Utilities);
    }

    #[test]
    fn test_description_is_trimmed_and_unmatched_is_other() {
        let candidates = StatementParser::new()
            .parse("03/02/2024    ATM Withdrawal    -60.00")
            .unwrap();
        assert_eq!(candidates[0].description, "ATM Withdrawal");
        assert_eq!(candidates[0].category, Category::Other);
    }

    #[test]
    fn test_description_ends_at_first_amount() {
        let candidates = StatementParser::new()
            .parse("03/05/2024 Refund 12.00 adj -3.00")
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].description, "Refund");
        assert_eq!(candidates[0].amount, dec("12.00"));
        assert_eq!(candidates[0].kind, TransactionType::Income);
    }

    #[test]
    fn test_default_entry_point() {
        let candidates =
            crate::transaction::parse_statement("04/01/2024 Shell Gas -40.00");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].category, Category::Transport);
    }
}
