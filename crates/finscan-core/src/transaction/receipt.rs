//! Single-receipt parser.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::models::transaction::TransactionCandidate;

use super::rules::{AmountExtractor, CategoryClassifier, DateExtractor};
use super::{Result, TransactionParser, RECEIPT_DESCRIPTION};

/// Derives at most one expense from the text of a receipt.
///
/// The largest amount on the receipt is taken as its total. This misfires when
/// OCR noise produces a line larger than the real total.
pub struct ReceiptParser {
    amounts: AmountExtractor,
    dates: DateExtractor,
    classifier: CategoryClassifier,
    description: String,
    reference_date: Option<NaiveDate>,
}

impl ReceiptParser {
    /// Create a new receipt parser with default settings.
    pub fn new() -> Self {
        Self {
            amounts: AmountExtractor::new(),
            dates: DateExtractor::new(),
            classifier: CategoryClassifier::receipts(),
            description: RECEIPT_DESCRIPTION.to_string(),
            reference_date: None,
        }
    }

    /// Set the description attached to derived candidates.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Fix the date used when the receipt has no usable date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Set the category classifier.
    pub fn with_classifier(mut self, classifier: CategoryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    fn fallback_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionParser for ReceiptParser {
    type Output = Option<TransactionCandidate>;

    fn parse(&self, text: &str) -> Result<Self::Output> {
        info!("Parsing receipt from {} characters of text", text.len());

        let Some(total) = self.amounts.max_amount(text)? else {
            debug!("No amount found in receipt text");
            return Ok(None);
        };

        let date = self.dates.find_or(text, self.fallback_date());
        let category = self.classifier.classify(text);

        debug!("Receipt total {} on {} classified as {}", total, date, category);

        Ok(Some(TransactionCandidate::expense(
            total,
            category,
            self.description.clone(),
            date,
        )))
    }
}
