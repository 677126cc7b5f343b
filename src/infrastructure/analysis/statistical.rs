//! Fixed-horizon hypothesis testing

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::power::{pooled_std, statistical_power};
use crate::domain::experiment::validate_alpha;
use crate::domain::{AnalysisError, ConfidenceInterval, GroupStatistics, TestStatistics};

/// Fewest usable observations per arm for a t-test
const MIN_SAMPLE_SIZE: usize = 2;

/// Run a fixed-horizon Welch t-test on two samples.
///
/// Computes per-arm summary statistics (NaN observations excluded), the
/// difference in means, a two-sided p-value and confidence interval from the
/// Student-t distribution at Welch-Satterthwaite degrees of freedom, and the
/// post-hoc power at the observed effect.
pub fn fixed_horizon_test(
    control_values: &[f64],
    treatment_values: &[f64],
    alpha: f64,
) -> Result<TestStatistics, AnalysisError> {
    validate_alpha(alpha)?;

    let control = GroupStatistics::from_values(control_values);
    let treatment = GroupStatistics::from_values(treatment_values);

    if control.sample_size < MIN_SAMPLE_SIZE {
        return Err(AnalysisError::degenerate_sample(format!(
            "control arm has {} usable observations, at least {} required",
            control.sample_size, MIN_SAMPLE_SIZE
        )));
    }
    if treatment.sample_size < MIN_SAMPLE_SIZE {
        return Err(AnalysisError::degenerate_sample(format!(
            "treatment arm has {} usable observations, at least {} required",
            treatment.sample_size, MIN_SAMPLE_SIZE
        )));
    }

    let effect_size = treatment.mean - control.mean;

    if (control.variance == 0.0 || treatment.variance == 0.0) && effect_size != 0.0 {
        return Err(AnalysisError::degenerate_sample(
            "an arm has zero variance while the means differ",
        ));
    }

    if control.variance == 0.0 && treatment.variance == 0.0 {
        // Both arms constant at the same value: nothing to infer.
        let power = statistical_power(0.0, 0.0, control.sample_size, treatment.sample_size, alpha)?;
        return Ok(TestStatistics {
            control_statistics: control,
            treatment_statistics: treatment,
            effect_size: 0.0,
            p_value: 1.0,
            confidence_interval: ConfidenceInterval {
                lower: 0.0,
                upper: 0.0,
                confidence_level: 1.0 - alpha,
            },
            statistical_power: power,
            stop_decision: false,
        });
    }

    let n1 = control.sample_size as f64;
    let n2 = treatment.sample_size as f64;

    let squared_error = control.variance / n1 + treatment.variance / n2;
    let standard_error = squared_error.sqrt();
    let t_statistic = effect_size / standard_error;
    let degrees_of_freedom =
        welch_satterthwaite_df(control.variance, n1, treatment.variance, n2);

    let t_dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)?;
    let p_value = 2.0 * (1.0 - t_dist.cdf(t_statistic.abs()));
    let critical_value = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    let confidence_interval = ConfidenceInterval {
        lower: effect_size - critical_value * standard_error,
        upper: effect_size + critical_value * standard_error,
        confidence_level: 1.0 - alpha,
    };

    let pooled = pooled_std(
        control.variance,
        control.sample_size,
        treatment.variance,
        treatment.sample_size,
    );
    let power = statistical_power(
        effect_size,
        pooled,
        control.sample_size,
        treatment.sample_size,
        alpha,
    )?;

    Ok(TestStatistics {
        control_statistics: control,
        treatment_statistics: treatment,
        effect_size,
        p_value,
        confidence_interval,
        statistical_power: power,
        stop_decision: p_value < alpha,
    })
}

/// Welch-Satterthwaite degrees of freedom for unequal variances
fn welch_satterthwaite_df(
    variance_control: f64,
    n_control: f64,
    variance_treatment: f64,
    n_treatment: f64,
) -> f64 {
    let se_control = variance_control / n_control;
    let se_treatment = variance_treatment / n_treatment;
    (se_control + se_treatment).powi(2)
        / (se_control.powi(2) / (n_control - 1.0) + se_treatment.powi(2) / (n_treatment - 1.0))
}
