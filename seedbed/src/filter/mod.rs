// Row filter - key/value predicates over a row collection

use crate::model::Row;
use crate::value::Value;

/// Matches rows holding a field with this key and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub key: String,
    pub value: Value,
}

impl Filter {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter {
            key: key.into(),
            value: value.into(),
        }
    }

    fn matches(&self, key: &str, value: &Value) -> bool {
        self.key == key && &self.value == value
    }
}

/// Rows for which every filter is satisfied. No filters returns every row.
///
/// A row qualifies when the number of (field, filter) pairs that match adds up
/// to the number of filters. Pairs are not deduplicated, so a row with two
/// `role: admin` fields passes `[role=admin, name=bob]` without a `name` field,
/// and fails a lone `[role=admin]`.
pub fn filter<'a>(rows: &'a [Row], filters: &[Filter]) -> Vec<&'a Row> {
    if filters.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| match_count(row, filters) == filters.len())
        .collect()
}

fn match_count(row: &Row, filters: &[Filter]) -> usize {
    row.fields()
        .iter()
        .map(|field| {
            filters
                .iter()
                .filter(|f| f.matches(&field.key, &field.value))
                .count()
        })
        .sum()
}
