//! Statistical test domain entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::{
    TestValidationError, validate_column_name, validate_kpi_name, validate_variant_name,
};
use crate::domain::dataset::{Column, DataFrame, FilterValue};
use crate::domain::error::AnalysisError;

// ============================================================================
// Kpi
// ============================================================================

/// A metric column to analyze, identified by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    name: String,
}

impl Kpi {
    /// Create a new KPI with validation
    pub fn new(name: impl Into<String>) -> Result<Self, TestValidationError> {
        let name = name.into();
        validate_kpi_name(&name)?;
        Ok(Self { name })
    }

    /// Get the KPI column name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// DerivedKpi
// ============================================================================

/// A ratio metric computed from two base columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKpi {
    name: String,
    numerator_column: String,
    denominator_column: String,
}

impl DerivedKpi {
    /// Create a new derived KPI with validation
    pub fn new(
        name: impl Into<String>,
        numerator_column: impl Into<String>,
        denominator_column: impl Into<String>,
    ) -> Result<Self, TestValidationError> {
        let name = name.into();
        let numerator_column = numerator_column.into();
        let denominator_column = denominator_column.into();

        validate_kpi_name(&name)?;
        validate_column_name(&numerator_column)?;
        validate_column_name(&denominator_column)?;

        if name == numerator_column || name == denominator_column {
            return Err(TestValidationError::DerivedNameCollision(name));
        }

        Ok(Self {
            name,
            numerator_column,
            denominator_column,
        })
    }

    /// Get the derived KPI column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the numerator column name
    pub fn numerator_column(&self) -> &str {
        &self.numerator_column
    }

    /// Get the denominator column name
    pub fn denominator_column(&self) -> &str {
        &self.denominator_column
    }

    /// Compute the row-wise ratio of the source columns and store it as a
    /// float column named after this KPI, overwriting any existing column of
    /// that name. Rows with a zero denominator yield NaN rather than failing;
    /// downstream statistics exclude them.
    ///
    /// This mutates the dataset. Calling it twice produces the same column.
    pub fn make_derived_kpi(&self, data: &mut DataFrame) -> Result<(), AnalysisError> {
        let numerator = data.numeric_column(&self.numerator_column)?;
        let denominator = data.numeric_column(&self.denominator_column)?;

        let ratio: Vec<f64> = numerator
            .iter()
            .zip(&denominator)
            .map(|(num, den)| if *den == 0.0 { f64::NAN } else { num / den })
            .collect();

        data.set_column(self.name.clone(), Column::Float(ratio))
    }
}

impl fmt::Display for DerivedKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Metric
// ============================================================================

/// A simple or derived KPI, unified behind one resolution capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Metric {
    Simple(Kpi),
    Derived(DerivedKpi),
}

impl Metric {
    /// The column name this metric resolves to
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(kpi) => kpi.name(),
            Self::Derived(kpi) => kpi.name(),
        }
    }

    /// Check if this metric requires derivation
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }

    /// Make sure the metric's column exists in the dataset, deriving it when
    /// missing. Simple metrics are left to fail at projection time when their
    /// column is absent; derived metrics are computed once and reused on
    /// later calls.
    pub fn ensure_column(&self, data: &mut DataFrame) -> Result<(), AnalysisError> {
        match self {
            Self::Simple(_) => Ok(()),
            Self::Derived(kpi) => {
                if data.has_column(kpi.name()) {
                    return Ok(());
                }
                kpi.make_derived_kpi(data)
            }
        }
    }
}

impl From<Kpi> for Metric {
    fn from(kpi: Kpi) -> Self {
        Self::Simple(kpi)
    }
}

impl From<DerivedKpi> for Metric {
    fn from(kpi: DerivedKpi) -> Self {
        Self::Derived(kpi)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// FeatureFilter
// ============================================================================

/// An equality predicate restricting analysis to a sub-population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFilter {
    column_name: String,
    column_value: FilterValue,
}

impl FeatureFilter {
    /// Create a new feature filter with validation
    pub fn new(
        column_name: impl Into<String>,
        column_value: impl Into<FilterValue>,
    ) -> Result<Self, TestValidationError> {
        let column_name = column_name.into();
        validate_column_name(&column_name)?;
        Ok(Self {
            column_name,
            column_value: column_value.into(),
        })
    }

    /// Get the filtered column name
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Get the value rows must equal to pass the filter
    pub fn column_value(&self) -> &FilterValue {
        &self.column_value
    }
}

// ============================================================================
// Variants
// ============================================================================

/// The column identifying experiment arms and the two arms to compare
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    variant_column_name: String,
    control_name: String,
    treatment_name: String,
}

impl Variants {
    /// Create a new variant definition with validation
    pub fn new(
        variant_column_name: impl Into<String>,
        control_name: impl Into<String>,
        treatment_name: impl Into<String>,
    ) -> Result<Self, TestValidationError> {
        let variant_column_name = variant_column_name.into();
        let control_name = control_name.into();
        let treatment_name = treatment_name.into();

        validate_column_name(&variant_column_name)?;
        validate_variant_name(&control_name)?;
        validate_variant_name(&treatment_name)?;

        if control_name == treatment_name {
            return Err(TestValidationError::IdenticalVariants(control_name));
        }

        Ok(Self {
            variant_column_name,
            control_name,
            treatment_name,
        })
    }

    /// Get the variant column name
    pub fn variant_column_name(&self) -> &str {
        &self.variant_column_name
    }

    /// Get the control arm label
    pub fn control_name(&self) -> &str {
        &self.control_name
    }

    /// Get the treatment arm label
    pub fn treatment_name(&self) -> &str {
        &self.treatment_name
    }

    /// The rows belonging to the named arm, as a new frame. Read-only: the
    /// input dataset is not modified.
    pub fn get_variant(
        &self,
        data: &DataFrame,
        variant_name: &str,
    ) -> Result<DataFrame, AnalysisError> {
        data.filter_eq(&self.variant_column_name, &FilterValue::from(variant_name))
    }
}

// ============================================================================
// StatisticalTest
// ============================================================================

/// One unit of analysis: a metric compared between two arms over an optional
/// filtered sub-population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalTest {
    metric: Metric,
    features: Vec<FeatureFilter>,
    variants: Variants,
}

impl StatisticalTest {
    /// Create a new statistical test. Filters apply in the given order,
    /// combined with logical AND.
    pub fn new(
        metric: impl Into<Metric>,
        features: Vec<FeatureFilter>,
        variants: Variants,
    ) -> Self {
        Self {
            metric: metric.into(),
            features,
            variants,
        }
    }

    /// Get the metric under test
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// Get the feature filters, in application order
    pub fn features(&self) -> &[FeatureFilter] {
        &self.features
    }

    /// Get the variant definition
    pub fn variants(&self) -> &Variants {
        &self.variants
    }

    /// The KPI column name this test analyzes
    pub fn kpi_name(&self) -> &str {
        self.metric.name()
    }
}

// ============================================================================
// TestMethod
// ============================================================================

/// The hypothesis-testing procedure to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    /// Single evaluation after a predetermined sample has been collected
    #[default]
    FixedHorizon,
}

impl TestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedHorizon => "fixed_horizon",
        }
    }
}

impl FromStr for TestMethod {
    type Err = TestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_horizon" => Ok(Self::FixedHorizon),
            other => Err(TestValidationError::UnknownTestMethod(other.to_string())),
        }
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CorrectionMethod
// ============================================================================

/// Multiple-testing correction applied across a suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CorrectionMethod {
    /// No correction; each test is judged at the raw alpha
    #[serde(rename = "none")]
    #[default]
    None,
    /// Bonferroni family-wise error rate control
    #[serde(rename = "bf", alias = "bonferroni")]
    Bonferroni,
    /// Benjamini-Hochberg false discovery rate control
    #[serde(rename = "bh", alias = "benjamini_hochberg")]
    BenjaminiHochberg,
}

impl CorrectionMethod {
    /// The canonical short form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bonferroni => "bf",
            Self::BenjaminiHochberg => "bh",
        }
    }
}

impl FromStr for CorrectionMethod {
    type Err = TestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "bonferroni" | "bf" => Ok(Self::Bonferroni),
            "benjamini_hochberg" | "bh" => Ok(Self::BenjaminiHochberg),
            other => Err(TestValidationError::UnknownCorrectionMethod(
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// StatisticalTestSuite
// ============================================================================

/// A batch of tests analyzed together under one correction method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalTestSuite {
    tests: Vec<StatisticalTest>,
    correction_method: CorrectionMethod,
}

impl StatisticalTestSuite {
    /// Create a new suite. At least one test is required.
    pub fn new(
        tests: Vec<StatisticalTest>,
        correction_method: CorrectionMethod,
    ) -> Result<Self, TestValidationError> {
        if tests.is_empty() {
            return Err(TestValidationError::EmptySuite);
        }
        Ok(Self {
            tests,
            correction_method,
        })
    }

    /// Get the tests, in analysis order
    pub fn tests(&self) -> &[StatisticalTest] {
        &self.tests
    }

    /// Get the correction method
    pub fn correction_method(&self) -> CorrectionMethod {
        self.correction_method
    }

    /// Number of tests in the suite
    pub fn size(&self) -> usize {
        self.tests.len()
    }
}
