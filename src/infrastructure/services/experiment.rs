//! Experiment facade
//!
//! Provides the analysis entry points over one dataset: single statistical
//! tests, test suites with multiple-testing correction, and outlier
//! filtering.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    AnalysisConfig, AnalysisError, CorrectedTestResult, DataFrame, ExperimentMetadata,
    StatisticalTest, StatisticalTestResult, StatisticalTestSuite, SuiteResult, TestMethod,
};
use crate::infrastructure::analysis::{correct, fixed_horizon_test, partition};

// ============================================================================
// ThresholdKind
// ============================================================================

/// Which side of the percentile threshold outlier filtering drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    /// Drop rows above the percentile
    Upper,
    /// Drop rows below the percentile
    Lower,
}

// ============================================================================
// Experiment
// ============================================================================

/// An experiment dataset together with its analysis entry points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    data: DataFrame,
    metadata: ExperimentMetadata,
}

impl Experiment {
    /// Create a new experiment. The dataset must have at least one row.
    pub fn new(data: DataFrame, metadata: ExperimentMetadata) -> Result<Self, AnalysisError> {
        if data.is_empty() {
            return Err(AnalysisError::invalid_configuration("dataset has no rows"));
        }
        Ok(Self { data, metadata })
    }

    /// Get the dataset
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Get the metadata
    pub fn metadata(&self) -> &ExperimentMetadata {
        &self.metadata
    }

    // ========================================================================
    // Analysis Operations
    // ========================================================================

    /// Analyze one statistical test: derive the metric column if needed,
    /// partition the dataset, and run the configured test method.
    pub fn analyze_statistical_test(
        &mut self,
        test: &StatisticalTest,
        config: &AnalysisConfig,
    ) -> Result<StatisticalTestResult, AnalysisError> {
        config.validate()?;

        debug!(
            kpi = %test.kpi_name(),
            control = %test.variants().control_name(),
            treatment = %test.variants().treatment_name(),
            n_filters = test.features().len(),
            "Analyzing statistical test"
        );

        test.metric().ensure_column(&mut self.data)?;
        let (control_values, treatment_values) = partition(&self.data, test)?;

        let statistics = match config.test_method {
            TestMethod::FixedHorizon => {
                fixed_horizon_test(&control_values, &treatment_values, config.alpha)?
            }
        };

        info!(
            kpi = %test.kpi_name(),
            p_value = statistics.p_value,
            effect_size = statistics.effect_size,
            stop_decision = statistics.stop_decision,
            "Statistical test analyzed"
        );

        Ok(StatisticalTestResult::new(
            test.clone(),
            statistics,
            config.test_method,
        ))
    }

    /// Analyze every test in a suite, in order, then apply the suite's
    /// multiple-testing correction. The first failing test aborts the suite.
    pub fn analyze_statistical_test_suite(
        &mut self,
        suite: &StatisticalTestSuite,
        config: &AnalysisConfig,
    ) -> Result<SuiteResult, AnalysisError> {
        config.validate()?;

        debug!(
            size = suite.size(),
            correction_method = %suite.correction_method(),
            "Analyzing statistical test suite"
        );

        let mut raw_results = Vec::with_capacity(suite.size());
        for test in suite.tests() {
            raw_results.push(self.analyze_statistical_test(test, config)?);
        }

        let p_values: Vec<f64> = raw_results.iter().map(|r| r.result.p_value).collect();
        let corrections = correct(&p_values, config.alpha, suite.correction_method());

        let results = raw_results
            .into_iter()
            .zip(corrections)
            .map(|(result, correction)| {
                CorrectedTestResult::new(result, correction.reject, correction.adjusted_p_value)
            })
            .collect();

        info!(
            size = suite.size(),
            correction_method = %suite.correction_method(),
            "Statistical test suite analyzed"
        );

        Ok(SuiteResult::new(
            results,
            suite.correction_method(),
            config.alpha,
        ))
    }

    // ========================================================================
    // Dataset Operations
    // ========================================================================

    /// Drop rows whose value in any of the listed KPI columns lies strictly
    /// beyond the given percentile of that column. NaN values are never
    /// treated as outliers. Returns the number of dropped rows, which is also
    /// added to the metadata.
    pub fn filter_outliers(
        &mut self,
        kpis: &[&str],
        percentile: f64,
        threshold_kind: ThresholdKind,
    ) -> Result<usize, AnalysisError> {
        if !(percentile > 0.0 && percentile < 100.0) {
            return Err(AnalysisError::invalid_configuration(format!(
                "percentile must lie in (0, 100), got {}",
                percentile
            )));
        }

        debug!(percentile, ?threshold_kind, "Filtering outliers");

        let mut keep = vec![true; self.data.n_rows()];
        for kpi in kpis {
            let values = self.data.numeric_column(kpi)?;
            let threshold = percentile_of(&values, percentile).ok_or_else(|| {
                AnalysisError::degenerate_sample(format!(
                    "column '{}' has no usable observations",
                    kpi
                ))
            })?;

            for (flag, value) in keep.iter_mut().zip(&values) {
                let beyond = match threshold_kind {
                    ThresholdKind::Upper => *value > threshold,
                    ThresholdKind::Lower => *value < threshold,
                };
                if beyond {
                    *flag = false;
                }
            }
        }

        let dropped = keep.iter().filter(|flag| !**flag).count();
        if dropped > 0 {
            self.data = self.data.retain_rows(&keep);
        }
        self.metadata.filtered_rows += dropped;

        info!(dropped, percentile, "Outlier rows filtered");

        Ok(dropped)
    }
}

/// Percentile of the non-NaN values, using the index method on the sorted
/// sample
fn percentile_of(values: &[f64], percentile: f64) -> Option<f64> {
    let mut observed: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if observed.is_empty() {
        return None;
    }

    observed.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let index = (percentile / 100.0 * (observed.len() - 1) as f64) as usize;
    Some(observed[index.min(observed.len() - 1)])
}
