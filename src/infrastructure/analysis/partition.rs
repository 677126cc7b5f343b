//! Variant partitioning

use crate::domain::{AnalysisError, DataFrame, FeatureFilter, StatisticalTest};

/// Apply every feature filter in order, combined with logical AND.
pub fn apply_filters(
    data: &DataFrame,
    features: &[FeatureFilter],
) -> Result<DataFrame, AnalysisError> {
    let mut filtered = data.clone();
    for feature in features {
        filtered = filtered.filter_eq(feature.column_name(), feature.column_value())?;
    }
    Ok(filtered)
}

/// Split the dataset into control and treatment KPI samples for one test:
/// filters first, then the variant split, then the KPI projection. Either
/// arm coming up empty is an error.
pub fn partition(
    data: &DataFrame,
    test: &StatisticalTest,
) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
    let filtered = apply_filters(data, test.features())?;

    let variants = test.variants();
    let control = variants.get_variant(&filtered, variants.control_name())?;
    let treatment = variants.get_variant(&filtered, variants.treatment_name())?;

    if control.is_empty() {
        return Err(AnalysisError::empty_partition(format!(
            "no rows for control variant '{}'",
            variants.control_name()
        )));
    }
    if treatment.is_empty() {
        return Err(AnalysisError::empty_partition(format!(
            "no rows for treatment variant '{}'",
            variants.treatment_name()
        )));
    }

    let control_values = control.numeric_column(test.kpi_name())?;
    let treatment_values = treatment.numeric_column(test.kpi_name())?;
    Ok((control_values, treatment_values))
}
