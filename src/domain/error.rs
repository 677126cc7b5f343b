use thiserror::Error;

/// Core analysis errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Empty partition: {message}")]
    EmptyPartition { message: String },

    #[error("Degenerate sample: {message}")]
    DegenerateSample { message: String },
}

impl AnalysisError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    pub fn empty_partition(message: impl Into<String>) -> Self {
        Self::EmptyPartition {
            message: message.into(),
        }
    }

    pub fn degenerate_sample(message: impl Into<String>) -> Self {
        Self::DegenerateSample {
            message: message.into(),
        }
    }
}

impl From<statrs::StatsError> for AnalysisError {
    fn from(err: statrs::StatsError) -> Self {
        Self::degenerate_sample(err.to_string())
    }
}
