use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Column
// ============================================================================

/// A typed column of values. Every value in a column shares one type; missing
/// numeric observations are represented as NaN in float columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(values) => values.len(),
            Column::Int(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Float(_) | Column::Int(_))
    }

    /// Values converted to `f64`. Integer columns widen; text columns yield
    /// `None`.
    pub fn as_float(&self) -> Option<Vec<f64>> {
        match self {
            Column::Float(values) => Some(values.clone()),
            Column::Int(values) => Some(values.iter().map(|v| *v as f64).collect()),
            Column::Text(_) => None,
        }
    }

    /// Whether the value at `index` equals `value`. Mismatched types never
    /// match.
    pub(crate) fn matches(&self, index: usize, value: &FilterValue) -> bool {
        match (self, value) {
            (Column::Float(values), FilterValue::Float(expected)) => values[index] == *expected,
            (Column::Int(values), FilterValue::Int(expected)) => values[index] == *expected,
            (Column::Text(values), FilterValue::Text(expected)) => values[index] == *expected,
            _ => false,
        }
    }

    /// A copy keeping only the rows where `mask` is true.
    pub(crate) fn retain(&self, mask: &[bool]) -> Column {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.clone())
                .collect()
        }

        match self {
            Column::Float(values) => Column::Float(keep(values, mask)),
            Column::Int(values) => Column::Int(keep(values, mask)),
            Column::Text(values) => Column::Text(keep(values, mask)),
        }
    }
}

// ============================================================================
// FilterValue
// ============================================================================

/// A single comparison value for an equality filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(value) => write!(f, "{}", value),
            FilterValue::Int(value) => write!(f, "{}", value),
            FilterValue::Float(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod column_tests {
        use super::*;

        #[test]
        fn test_len_and_is_empty() {
            let column = Column::Int(vec![1, 2, 3]);
            assert_eq!(column.len(), 3);
            assert!(!column.is_empty());
            assert!(Column::Text(vec![]).is_empty());
        }

        #[test]
        fn test_is_numeric() {
            assert!(Column::Float(vec![1.0]).is_numeric());
            assert!(Column::Int(vec![1]).is_numeric());
            assert!(!Column::Text(vec!["a".to_string()]).is_numeric());
        }

        #[test]
        fn test_as_float_widens_integers() {
            let column = Column::Int(vec![1, 2, 3]);
            assert_eq!(column.as_float(), Some(vec![1.0, 2.0, 3.0]));
        }

        #[test]
        fn test_as_float_rejects_text() {
            let column = Column::Text(vec!["a".to_string()]);
            assert_eq!(column.as_float(), None);
        }

        #[test]
        fn test_matches_same_type() {
            let column = Column::Text(vec!["mobile".to_string(), "desktop".to_string()]);
            assert!(column.matches(0, &FilterValue::from("mobile")));
            assert!(!column.matches(1, &FilterValue::from("mobile")));
        }

        #[test]
        fn test_matches_mismatched_type_is_false() {
            let column = Column::Int(vec![5]);
            assert!(!column.matches(0, &FilterValue::from("5")));
            assert!(!column.matches(0, &FilterValue::from(5.0)));
        }

        #[test]
        fn test_retain_keeps_masked_rows() {
            let column = Column::Int(vec![10, 20, 30, 40]);
            let kept = column.retain(&[true, false, false, true]);
            assert_eq!(kept, Column::Int(vec![10, 40]));
        }
    }

    mod filter_value_tests {
        use super::*;

        #[test]
        fn test_from_conversions() {
            assert_eq!(FilterValue::from("has"), FilterValue::Text("has".to_string()));
            assert_eq!(FilterValue::from(7_i64), FilterValue::Int(7));
            assert_eq!(FilterValue::from(0.5), FilterValue::Float(0.5));
        }

        #[test]
        fn test_display() {
            assert_eq!(FilterValue::from("mobile").to_string(), "mobile");
            assert_eq!(FilterValue::from(3_i64).to_string(), "3");
        }

        #[test]
        fn test_serialization_is_untagged() {
            let json = serde_json::to_string(&FilterValue::from("mobile")).unwrap();
            assert_eq!(json, "\"mobile\"");
            let back: FilterValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, FilterValue::from("mobile"));
        }
    }
}
