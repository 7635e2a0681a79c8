//! Monetary amount extraction.

use rust_decimal::Decimal;
use tracing::trace;

use super::patterns::AMOUNT_PATTERN;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::DerivationError;

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every amount in document order, failing on the first match
    /// that cannot be represented as a decimal.
    pub fn try_extract_all(
        &self,
        text: &str,
    ) -> Result<Vec<ExtractionMatch<Decimal>>, DerivationError> {
        AMOUNT_PATTERN
            .find_iter(text)
            .map(|m| {
                let value = normalize_amount(m.as_str())?;
                trace!("Found amount {} at {}..{}", value, m.start(), m.end());
                Ok(ExtractionMatch::new(value, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect()
    }

    /// Largest amount in the text, or `None` when the text has no amount.
    pub fn max_amount(&self, text: &str) -> Result<Option<Decimal>, DerivationError> {
        Ok(self
            .try_extract_all(text)?
            .into_iter()
            .map(|m| m.value)
            .max())
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_PATTERN
            .find_iter(text)
            .filter_map(|m| {
                let value = normalize_amount(m.as_str()).ok()?;
                Some(ExtractionMatch::new(value, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect()
    }
}

/// Parse an amount such as `$1,234.56` or `-5.50`.
///
/// Currency symbols, thousands separators and whitespace are removed; a leading
/// minus is kept. Values that only fit the decimal type after rounding are rejected.
pub fn normalize_amount(s: &str) -> Result<Decimal, DerivationError> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',') && !c.is_whitespace())
        .collect();

    Decimal::from_str_exact(&cleaned).map_err(|_| DerivationError::InvalidAmount {
        value: s.to_string(),
    })
}
