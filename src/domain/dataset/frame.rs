use serde::{Deserialize, Serialize};

use crate::domain::dataset::column::{Column, FilterValue};
use crate::domain::error::AnalysisError;

/// An in-memory table of named, equal-length columns.
///
/// Columns keep their insertion order. The frame is the unit the analysis
/// engine consumes: filters produce row subsets and derived KPIs append
/// columns; everything else is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
}

impl DataFrame {
    /// Creates a frame from named columns, rejecting duplicate names and
    /// unequal column lengths.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self, AnalysisError> {
        if let Some((first_name, first_column)) = columns.first() {
            let n_rows = first_column.len();
            for (name, column) in &columns {
                if column.len() != n_rows {
                    return Err(AnalysisError::invalid_configuration(format!(
                        "column '{}' has {} rows but column '{}' has {}",
                        name,
                        column.len(),
                        first_name,
                        n_rows
                    )));
                }
            }
        }
        for (index, (name, _)) in columns.iter().enumerate() {
            if columns[..index].iter().any(|(other, _)| other == name) {
                return Err(AnalysisError::invalid_configuration(format!(
                    "duplicate column '{}'",
                    name
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, column)| column.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(other, _)| other == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(other, _)| other == name)
            .map(|(_, column)| column)
    }

    /// The named column as `f64` values. Fails when the column is absent or
    /// non-numeric.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, AnalysisError> {
        let column = self
            .column(name)
            .ok_or_else(|| AnalysisError::column_not_found(name))?;
        column.as_float().ok_or_else(|| {
            AnalysisError::invalid_configuration(format!("column '{}' is not numeric", name))
        })
    }

    /// Overwrites the named column, or appends it when absent. The new column
    /// must match the frame's row count (any length is accepted on a frame
    /// with no columns yet).
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), AnalysisError> {
        let name = name.into();
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(AnalysisError::invalid_configuration(format!(
                "column '{}' has {} rows but the frame has {}",
                name,
                column.len(),
                self.n_rows()
            )));
        }
        match self.columns.iter_mut().find(|(other, _)| *other == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name, column)),
        }
        Ok(())
    }

    /// A new frame keeping only the rows where the named column equals
    /// `value`.
    pub fn filter_eq(&self, column_name: &str, value: &FilterValue) -> Result<Self, AnalysisError> {
        let column = self
            .column(column_name)
            .ok_or_else(|| AnalysisError::column_not_found(column_name))?;
        let mask: Vec<bool> = (0..column.len()).map(|i| column.matches(i, value)).collect();
        Ok(self.retain_rows(&mask))
    }

    /// A new frame keeping only the rows where `mask` is true. `mask` must
    /// have one entry per row.
    pub(crate) fn retain_rows(&self, mask: &[bool]) -> Self {
        debug_assert_eq!(mask.len(), self.n_rows());
        Self {
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.retain(mask)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            (
                "variant".to_string(),
                Column::Text(vec!["A".to_string(), "B".to_string(), "A".to_string()]),
            ),
            ("revenue".to_string(), Column::Float(vec![1.0, 2.0, 3.0])),
            ("clicks".to_string(), Column::Int(vec![10, 20, 30])),
        ])
        .unwrap()
    }

    mod data_frame_tests {
        use super::*;

        #[test]
        fn test_new_rejects_unequal_lengths() {
            let result = DataFrame::new(vec![
                ("a".to_string(), Column::Int(vec![1, 2])),
                ("b".to_string(), Column::Int(vec![1])),
            ]);
            assert!(matches!(
                result,
                Err(AnalysisError::InvalidConfiguration { .. })
            ));
        }

        #[test]
        fn test_new_rejects_duplicate_names() {
            let result = DataFrame::new(vec![
                ("a".to_string(), Column::Int(vec![1])),
                ("a".to_string(), Column::Int(vec![2])),
            ]);
            assert!(matches!(
                result,
                Err(AnalysisError::InvalidConfiguration { .. })
            ));
        }

        #[test]
        fn test_dimensions() {
            let frame = sample_frame();
            assert_eq!(frame.n_rows(), 3);
            assert_eq!(frame.n_columns(), 3);
            assert!(!frame.is_empty());
            assert_eq!(frame.column_names(), vec!["variant", "revenue", "clicks"]);
        }

        #[test]
        fn test_numeric_column_widens_integers() {
            let frame = sample_frame();
            assert_eq!(frame.numeric_column("clicks").unwrap(), vec![10.0, 20.0, 30.0]);
        }

        #[test]
        fn test_numeric_column_missing_is_column_not_found() {
            let frame = sample_frame();
            assert!(matches!(
                frame.numeric_column("missing"),
                Err(AnalysisError::ColumnNotFound { .. })
            ));
        }

        #[test]
        fn test_numeric_column_rejects_text() {
            let frame = sample_frame();
            assert!(matches!(
                frame.numeric_column("variant"),
                Err(AnalysisError::InvalidConfiguration { .. })
            ));
        }

        #[test]
        fn test_set_column_appends_and_overwrites() {
            let mut frame = sample_frame();
            frame
                .set_column("ratio", Column::Float(vec![0.1, 0.2, 0.3]))
                .unwrap();
            assert_eq!(frame.n_columns(), 4);

            frame
                .set_column("ratio", Column::Float(vec![1.0, 1.0, 1.0]))
                .unwrap();
            assert_eq!(frame.n_columns(), 4);
            assert_eq!(frame.numeric_column("ratio").unwrap(), vec![1.0, 1.0, 1.0]);
        }

        #[test]
        fn test_set_column_rejects_wrong_length() {
            let mut frame = sample_frame();
            let result = frame.set_column("ratio", Column::Float(vec![0.1]));
            assert!(matches!(
                result,
                Err(AnalysisError::InvalidConfiguration { .. })
            ));
        }

        #[test]
        fn test_filter_eq_keeps_matching_rows() {
            let frame = sample_frame();
            let filtered = frame.filter_eq("variant", &FilterValue::from("A")).unwrap();
            assert_eq!(filtered.n_rows(), 2);
            assert_eq!(filtered.numeric_column("revenue").unwrap(), vec![1.0, 3.0]);
        }

        #[test]
        fn test_filter_eq_can_produce_empty_frame() {
            let frame = sample_frame();
            let filtered = frame.filter_eq("variant", &FilterValue::from("C")).unwrap();
            assert!(filtered.is_empty());
            assert_eq!(filtered.n_columns(), 3);
        }

        #[test]
        fn test_filter_eq_missing_column() {
            let frame = sample_frame();
            assert!(matches!(
                frame.filter_eq("missing", &FilterValue::from("A")),
                Err(AnalysisError::ColumnNotFound { .. })
            ));
        }

        #[test]
        fn test_serialization_round_trip() {
            let frame = sample_frame();
            let json = serde_json::to_string(&frame).unwrap();
            let back: DataFrame = serde_json::from_str(&json).unwrap();
            assert_eq!(back, frame);
        }
    }
}
