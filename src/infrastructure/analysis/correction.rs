//! Multiple-testing correction

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::CorrectionMethod;

/// Corrected decision for one test in a suite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Reject decision after correction
    pub reject: bool,
    /// P-value adjusted for the number of tests
    pub adjusted_p_value: f64,
}

/// Apply a multiple-testing correction to a batch of raw p-values, returning
/// one decision per input in input order.
pub fn correct(p_values: &[f64], alpha: f64, method: CorrectionMethod) -> Vec<Correction> {
    match method {
        CorrectionMethod::None => no_correction(p_values, alpha),
        CorrectionMethod::Bonferroni => bonferroni(p_values, alpha),
        CorrectionMethod::BenjaminiHochberg => benjamini_hochberg(p_values, alpha),
    }
}

fn no_correction(p_values: &[f64], alpha: f64) -> Vec<Correction> {
    p_values
        .iter()
        .map(|p| Correction {
            reject: *p < alpha,
            adjusted_p_value: *p,
        })
        .collect()
}

fn bonferroni(p_values: &[f64], alpha: f64) -> Vec<Correction> {
    let m = p_values.len() as f64;
    p_values
        .iter()
        .map(|p| Correction {
            reject: *p < alpha / m,
            adjusted_p_value: (p * m).min(1.0),
        })
        .collect()
}

/// Benjamini-Hochberg step-up procedure. P-values are ranked ascending with a
/// stable sort so equal values keep their input order; the largest rank k
/// with `p_(k) <= (k/m) * alpha` is found and all ranks up to k are rejected.
/// Adjusted p-values are the running minimum of `m * p_(j) / j` taken from
/// the largest rank down, clamped to 1.
fn benjamini_hochberg(p_values: &[f64], alpha: f64) -> Vec<Correction> {
    let m = p_values.len();
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|a, b| {
        p_values[*a]
            .partial_cmp(&p_values[*b])
            .unwrap_or(Ordering::Equal)
    });

    let mut largest_rejected_rank = None;
    for (rank_index, input_index) in order.iter().enumerate() {
        let rank = (rank_index + 1) as f64;
        if p_values[*input_index] <= rank / m as f64 * alpha {
            largest_rejected_rank = Some(rank_index);
        }
    }

    let mut adjusted = vec![0.0; m];
    let mut running_min = 1.0_f64;
    for rank_index in (0..m).rev() {
        let rank = (rank_index + 1) as f64;
        let candidate = (p_values[order[rank_index]] * m as f64 / rank).min(1.0);
        running_min = running_min.min(candidate);
        adjusted[order[rank_index]] = running_min;
    }

    let mut corrections = vec![
        Correction {
            reject: false,
            adjusted_p_value: 0.0,
        };
        m
    ];
    for (rank_index, input_index) in order.iter().enumerate() {
        corrections[*input_index] = Correction {
            reject: largest_rejected_rank.is_some_and(|k| rank_index <= k),
            adjusted_p_value: adjusted[*input_index],
        };
    }
    corrections
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn rejects(corrections: &[Correction]) -> Vec<bool> {
        corrections.iter().map(|c| c.reject).collect()
    }

    #[test]
    fn test_no_correction_uses_raw_alpha() {
        let corrections = correct(&[0.01, 0.2], 0.05, CorrectionMethod::None);
        assert_eq!(rejects(&corrections), vec![true, false]);
        assert!((corrections[0].adjusted_p_value - 0.01).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_bonferroni_divides_alpha() {
        let corrections = correct(&[0.01, 0.2, 0.03], 0.05, CorrectionMethod::Bonferroni);
        assert_eq!(rejects(&corrections), vec![true, false, false]);
        assert!((corrections[0].adjusted_p_value - 0.03).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 0.6).abs() < EPSILON);
        assert!((corrections[2].adjusted_p_value - 0.09).abs() < EPSILON);
    }

    #[test]
    fn test_bonferroni_clamps_adjusted_to_one() {
        let corrections = correct(&[0.7, 0.9], 0.05, CorrectionMethod::Bonferroni);
        assert!((corrections[0].adjusted_p_value - 1.0).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_bh_rejects_all_when_every_rank_passes() {
        let corrections = correct(
            &[0.01, 0.04, 0.03, 0.005],
            0.05,
            CorrectionMethod::BenjaminiHochberg,
        );
        assert_eq!(rejects(&corrections), vec![true, true, true, true]);
        assert!((corrections[0].adjusted_p_value - 0.02).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 0.04).abs() < EPSILON);
        assert!((corrections[2].adjusted_p_value - 0.04).abs() < EPSILON);
        assert!((corrections[3].adjusted_p_value - 0.02).abs() < EPSILON);
    }

    #[test]
    fn test_bh_partial_rejection() {
        let corrections = correct(
            &[0.01, 0.02, 0.2, 0.9],
            0.05,
            CorrectionMethod::BenjaminiHochberg,
        );
        assert_eq!(rejects(&corrections), vec![true, true, false, false]);
        assert!((corrections[0].adjusted_p_value - 0.04).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 0.04).abs() < EPSILON);
        assert!((corrections[2].adjusted_p_value - 0.2 * 4.0 / 3.0).abs() < EPSILON);
        assert!((corrections[3].adjusted_p_value - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_bh_rejects_above_bonferroni_threshold() {
        // 0.03 fails the Bonferroni cut (0.05 / 4) but passes BH at rank 3.
        let p_values = [0.03, 0.002, 0.004, 0.8];
        let bh = correct(&p_values, 0.05, CorrectionMethod::BenjaminiHochberg);
        let bf = correct(&p_values, 0.05, CorrectionMethod::Bonferroni);
        assert!(bh[0].reject);
        assert!(!bf[0].reject);
    }

    #[test]
    fn test_bh_rejects_nothing_without_a_passing_rank() {
        let corrections = correct(&[0.9, 0.8], 0.05, CorrectionMethod::BenjaminiHochberg);
        assert_eq!(rejects(&corrections), vec![false, false]);
        assert!((corrections[0].adjusted_p_value - 0.9).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_bh_ties_share_one_decision() {
        let corrections = correct(&[0.02, 0.02, 0.8], 0.05, CorrectionMethod::BenjaminiHochberg);
        assert_eq!(rejects(&corrections), vec![true, true, false]);
        assert!((corrections[0].adjusted_p_value - 0.03).abs() < EPSILON);
        assert!((corrections[1].adjusted_p_value - 0.03).abs() < EPSILON);
    }

    #[test]
    fn test_bh_never_rejects_fewer_than_bonferroni() {
        let cases: [&[f64]; 4] = [
            &[0.01, 0.02, 0.03, 0.04],
            &[0.001, 0.5, 0.9],
            &[0.012, 0.013, 0.014, 0.2, 0.7],
            &[0.049, 0.051],
        ];
        for p_values in cases {
            let bh = correct(p_values, 0.05, CorrectionMethod::BenjaminiHochberg);
            let bf = correct(p_values, 0.05, CorrectionMethod::Bonferroni);
            for (bh_correction, bf_correction) in bh.iter().zip(&bf) {
                assert!(
                    bh_correction.reject || !bf_correction.reject,
                    "BH must reject everything Bonferroni rejects for {:?}",
                    p_values
                );
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(correct(&[], 0.05, CorrectionMethod::BenjaminiHochberg).is_empty());
    }
}
