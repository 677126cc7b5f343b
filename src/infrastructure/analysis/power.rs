//! Post-hoc statistical power

use statrs::distribution::{ContinuousCDF, Normal};

use crate::domain::AnalysisError;

/// Calculate the pooled standard deviation of two samples
pub fn pooled_std(
    variance_control: f64,
    n_control: usize,
    variance_treatment: f64,
    n_treatment: usize,
) -> f64 {
    let n1 = n_control as f64;
    let n2 = n_treatment as f64;
    (((n1 - 1.0) * variance_control + (n2 - 1.0) * variance_treatment) / (n1 + n2 - 2.0)).sqrt()
}

/// Calculate the power of a two-sample test at the observed mean difference,
/// sample sizes, and two-sided significance level, using the normal
/// approximation.
///
/// A zero mean difference yields the baseline `Phi(-z_(1-alpha/2))` without
/// touching the pooled standard deviation, so both-constant samples are
/// well defined.
pub fn statistical_power(
    mean_diff: f64,
    pooled_std: f64,
    n_control: usize,
    n_treatment: usize,
    alpha: f64,
) -> Result<f64, AnalysisError> {
    let standard_normal = Normal::new(0.0, 1.0)?;
    let z_alpha = standard_normal.inverse_cdf(1.0 - alpha / 2.0);

    let n1 = n_control as f64;
    let n2 = n_treatment as f64;

    let noncentrality = if mean_diff == 0.0 {
        0.0
    } else {
        ((n1 * n2 * mean_diff * mean_diff) / ((n1 + n2) * pooled_std * pooled_std)).sqrt()
    };

    Ok(standard_normal.cdf(noncentrality - z_alpha))
}
