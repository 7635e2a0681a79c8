//! Keyword-based category classification.

use tracing::trace;

use crate::models::transaction::Category;

/// A category and the keywords that select it.
pub type CategoryRule = (Category, &'static [&'static str]);

/// Rules applied to whole receipts, in priority order.
pub const RECEIPT_RULES: &[CategoryRule] = &[
    (
        Category::Food,
        &[
            "restaurant",
            "cafe",
            "coffee",
            "food",
            "grocery",
            "groceries",
            "supermarket",
            "dining",
        ],
    ),
    (Category::Transport, &["gas", "fuel", "taxi", "uber", "lyft", "transport", "parking"]),
    (Category::Shopping, &["store", "shop", "mall", "clothing", "electronics", "amazon"]),
    (Category::Entertainment, &["movie", "cinema", "concert", "game", "entertainment"]),
    (Category::Utilities, &["electricity", "water", "gas", "internet", "phone", "utility"]),
];

/// Rules applied to single statement descriptions, in priority order.
pub const STATEMENT_RULES: &[CategoryRule] = &[
    (Category::Food, &["restaurant", "cafe", "coffee", "food", "grocery", "groceries"]),
    (Category::Transport, &["gas", "fuel", "taxi", "uber", "transport"]),
    (Category::Utilities, &["electricity", "water", "gas", "internet", "phone"]),
    (Category::Income, &["salary", "payment", "deposit"]),
];

/// First-match-wins keyword classifier.
#[derive(Debug, Clone, Copy)]
pub struct CategoryClassifier {
    rules: &'static [CategoryRule],
}

impl CategoryClassifier {
    /// Classifier with a custom rule table.
    pub fn new(rules: &'static [CategoryRule]) -> Self {
        Self { rules }
    }

    /// Classifier for receipt text.
    pub fn receipts() -> Self {
        Self::new(RECEIPT_RULES)
    }

    /// Classifier for statement line descriptions.
    pub fn statements() -> Self {
        Self::new(STATEMENT_RULES)
    }

    /// Category of the first rule with a keyword contained in the lower-cased text,
    /// or [`Category::Other`].
    pub fn classify(&self, text: &str) -> Category {
        let lower = text.to_lowercase();

        for (category, keywords) in self.rules {
            if let Some(keyword) = keywords.iter().find(|k| lower.contains(*k)) {
                trace!("Keyword {:?} selects {}", keyword, category);
                return *category;
            }
        }

        Category::Other
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::receipts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_categories() {
        let classifier = CategoryClassifier::receipts();
        assert_eq!(classifier.classify("Uber ride downtown"), Category::Transport);
        assert_eq!(classifier.classify("Grocery store visit"), Category::Food);
        assert_eq!(classifier.classify("CINEMA CITY tickets"), Category::Entertainment);
        assert_eq!(classifier.classify("Monthly internet bill"), Category::Utilities);
        assert_eq!(classifier.classify("Amazon order"), Category::Shopping);
    }

    #[test]
    fn test_first_match_wins() {
        let classifier = CategoryClassifier::receipts();
        assert_eq!(classifier.classify("gas station restaurant"), Category::Food);
        // "gas" appears in both Transport and Utilities; Transport is tested first.
        assert_eq!(classifier.classify("Gas bill"), Category::Transport);
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(
            CategoryClassifier::receipts().classify("Thank you"),
            Category::Other
        );
        assert_eq!(
            CategoryClassifier::statements().classify("ATM withdrawal"),
            Category::Other
        );
    }

    #[test]
    fn test_statement_categories() {
        let classifier = CategoryClassifier::statements();
        assert_eq!(classifier.classify("Starbucks Coffee"), Category::Food);
        assert_eq!(classifier.classify("Paycheck Deposit"), Category::Income);
        assert_eq!(classifier.classify("ACME SALARY"), Category::Income);
        assert_eq!(classifier.classify("City Water Dept"), Category::Utilities);
        // Shopping keywords are not part of the statement table.
        assert_eq!(classifier.classify("Amazon Marketplace"), Category::Other);
    }

    #[test]
    fn test_rule_tables_are_ordered() {
        let receipt: Vec<Category> = RECEIPT_RULES.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            receipt,
            vec![
                Category::Food,
                Category::Transport,
                Category::Shopping,
                Category::Entertainment,
                Category::Utilities,
            ]
        );
        let statement: Vec<Category> = STATEMENT_RULES.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            statement,
            vec![
                Category::Food,
                Category::Transport,
                Category::Utilities,
                Category::Income,
            ]
        );
    }
}
