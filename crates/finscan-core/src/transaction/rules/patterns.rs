//! Common regex patterns for receipt and statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount patterns: optional currency symbol, comma-grouped or plain integer, two decimals
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"[$€£]?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}"
    ).unwrap();

    // Date patterns: M/D/Y with `/` or `-` separators and 2-4 digit years
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}"
    ).unwrap();

    // Statement line: date, shortest description, signed amount
    pub static ref STATEMENT_LINE: Regex = Regex::new(
        r"(?P<date>\d{1,2}/\d{1,2}/\d{2,4})\s+(?P<desc>.*?)\s+(?P<amount>-?[$€£]?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_pattern_keeps_thousands_groups() {
        let found: Vec<&str> = AMOUNT_PATTERN
            .find_iter("Total $1,234.56 tip 3.00")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["$1,234.56", "3.00"]);
    }

    #[test]
    fn test_amount_pattern_requires_two_decimals() {
        assert!(!AMOUNT_PATTERN.is_match("Total 12.5 and 7"));
    }

    #[test]
    fn test_statement_line_description_stays_on_one_line() {
        let caps = STATEMENT_LINE
            .captures("01/15/2024 Starbucks Coffee -5.50\n")
            .unwrap();
        assert_eq!(&caps["date"], "01/15/2024");
        assert_eq!(&caps["desc"], "Starbucks Coffee");
        assert_eq!(&caps["amount"], "-5.50");
    }
}
