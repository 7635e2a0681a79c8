//! Transaction date extraction.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::DATE_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Formats tried in order for a date token, with the year width each expects.
const DATE_FORMATS: [(&str, usize); 3] = [("%m/%d/%Y", 4), ("%m-%d-%Y", 4), ("%m-%d-%y", 2)];

/// Date field extractor.
///
/// Only the first date-shaped substring is considered. A token that fails to
/// parse does not cause later tokens to be tried.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Date of the document, or `fallback` when none can be recovered.
    pub fn find_or(&self, text: &str, fallback: NaiveDate) -> NaiveDate {
        match self.extract(text) {
            Some(found) => found.value,
            None => {
                debug!("No usable date in text, using fallback {}", fallback);
                fallback
            }
        }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let token = DATE_PATTERN.find(text)?;
        let date = parse_date_token(token.as_str());
        if date.is_none() {
            debug!("Date token {:?} did not match any known format", token.as_str());
        }
        date.map(|d| {
            ExtractionMatch::new(d, token.as_str()).with_position(token.start(), token.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_PATTERN
            .find_iter(text)
            .filter_map(|m| {
                parse_date_token(m.as_str())
                    .map(|d| ExtractionMatch::new(d, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect()
    }
}

/// Parse a month-first date token.
///
/// Tries `MM/DD/YYYY`, then `MM-DD-YYYY`, then `MM-DD-YY`.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let year_width = token
        .rsplit(['/', '-'])
        .next()
        .map(str::len)
        .unwrap_or(0);

    DATE_FORMATS
        .iter()
        .filter(|(_, width)| *width == year_width)
        .find_map(|(format, _)| NaiveDate::parse_from_str(token, format).ok())
}

/// Parse a strict `MM/DD/YYYY` token.
pub fn parse_us_date(token: &str) -> Option<NaiveDate> {
    let (format, width) = DATE_FORMATS[0];
    let year_width = token.rsplit('/').next().map(str::len).unwrap_or(0);
    if year_width != width {
        return None;
    }
    NaiveDate::parse_from_str(token, format).ok()
}
