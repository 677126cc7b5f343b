use serde::{Deserialize, Serialize};

/// Auxiliary description of an experiment dataset.
///
/// Consumed for validation and logging only; statistics never depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    /// Experiment name.
    #[serde(default)]
    pub experiment: Option<String>,

    /// Where the dataset came from.
    #[serde(default)]
    pub source: Option<String>,

    /// The KPI the experiment was primarily sized for.
    #[serde(default)]
    pub primary_kpi: Option<String>,

    /// Rows dropped by outlier filtering.
    #[serde(default)]
    pub filtered_rows: usize,
}

impl ExperimentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = Some(experiment.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_primary_kpi(mut self, primary_kpi: impl Into<String>) -> Self {
        self.primary_kpi = Some(primary_kpi.into());
        self
    }
}
