//! Result sets produced by sections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered page of opaque item records plus the total count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResult {
    /// The items of this page.
    pub items: Vec<Value>,
    /// Number of records available in total.
    pub total_record_count: usize,
    /// Offset of the first item.
    pub start_index: usize,
}

impl QueryResult {
    /// A single page holding every item.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            total_record_count: items.len(),
            items,
            start_index: 0,
        }
    }

    /// An empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A page out of a larger set.
    pub fn page(items: Vec<Value>, start_index: usize, total_record_count: usize) -> Self {
        Self {
            items,
            total_record_count,
            start_index,
        }
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Value> for QueryResult {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_counts_items() {
        let result: QueryResult = [json!({"Name": "a"}), json!({"Name": "b"})]
            .into_iter()
            .collect();
        assert_eq!(result.total_record_count, 2);
        assert_eq!(result.start_index, 0);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn serializes_like_the_host() {
        let value = serde_json::to_value(QueryResult::page(vec![json!(1)], 10, 42)).unwrap();
        assert_eq!(
            value,
            json!({"Items": [1], "TotalRecordCount": 42, "StartIndex": 10})
        );
    }
}
