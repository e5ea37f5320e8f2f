//! Running-average sentiment table keyed by category.
//!
//! Entries are created on first sight of a category and never removed.
//! Iteration order is first-insertion order, which is also the bar order
//! in the chart.

use indexmap::IndexMap;

/// Accumulated sentiment for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryStats {
    /// Running sum of all sentiment values attributed to this category.
    pub total_sentiment: f64,
    /// Number of messages attributed to this category.
    pub message_count: u64,
}

impl CategoryStats {
    /// Arithmetic mean of the attributed sentiment values.
    ///
    /// Entries only exist after their first increment, so `message_count`
    /// is at least 1 for any stats reachable through the table.
    #[must_use]
    pub fn average(&self) -> f64 {
        self.total_sentiment / self.message_count as f64
    }
}

/// Category name to running stats, in first-insertion order.
#[derive(Debug, Default)]
pub struct SentimentTable {
    entries: IndexMap<String, CategoryStats>,
}

impl SentimentTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes one sentiment value to a category, creating the entry
    /// with zero totals if this is the category's first message.
    pub fn record(&mut self, category: &str, sentiment: f64) -> &CategoryStats {
        let stats = self
            .entries
            .entry(category.to_string())
            .or_insert_with(CategoryStats::default);
        stats.total_sentiment += sentiment;
        stats.message_count += 1;
        stats
    }

    /// Stats for a category, if any message has been attributed to it.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.entries.get(category)
    }

    /// Current averages in first-insertion order.
    #[must_use]
    pub fn averages(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|(category, stats)| (category.as_str(), stats.average()))
            .collect()
    }

    /// Iterates entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryStats)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct categories observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first message is attributed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_creates_entry_with_count_one() {
        let mut table = SentimentTable::new();
        let stats = table.record("tech", 5.0);
        assert_eq!(stats.message_count, 1);
        assert!((stats.total_sentiment - 5.0).abs() < f64::EPSILON);
        assert!((stats.average() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn running_average_accumulates() {
        let mut table = SentimentTable::new();
        table.record("tech", 5.0);
        let stats = *table.record("tech", 3.0);
        assert_eq!(stats.message_count, 2);
        assert!((stats.average() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn zero_sentiment_still_increments_count() {
        let mut table = SentimentTable::new();
        table.record("sports", 0.0);
        table.record("sports", 0.0);
        let stats = table.get("sports").unwrap();
        assert_eq!(stats.message_count, 2);
        assert!(stats.average().abs() < f64::EPSILON);
    }

    #[test]
    fn negative_sentiment_is_summed() {
        let mut table = SentimentTable::new();
        table.record("news", -2.0);
        table.record("news", -4.0);
        assert!((table.get("news").unwrap().average() + 3.0).abs() < 1e-9);
    }

    #[test]
    fn averages_preserve_first_insertion_order() {
        let mut table = SentimentTable::new();
        table.record("zebra", 1.0);
        table.record("apple", 2.0);
        table.record("mango", 3.0);
        // Re-touching an existing category must not move it.
        table.record("apple", 4.0);

        let order: Vec<&str> = table.averages().iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn total_matches_sum_of_attributed_values() {
        let values = [0.3, -1.2, 4.5, 0.0, 2.25];
        let mut table = SentimentTable::new();
        for v in values {
            table.record("mixed", v);
        }
        let stats = table.get("mixed").unwrap();
        let expected: f64 = values.iter().sum();
        assert!((stats.total_sentiment - expected).abs() < 1e-9);
        assert_eq!(stats.message_count, values.len() as u64);
        assert!((stats.average() - expected / values.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn missing_category_returns_none() {
        let table = SentimentTable::new();
        assert!(table.get("absent").is_none());
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
