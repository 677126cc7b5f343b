use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use crate::domain::dataset::column::Column;
use crate::domain::dataset::frame::DataFrame;
use crate::domain::dataset::metadata::ExperimentMetadata;
use crate::domain::error::AnalysisError;

const N_ROWS: usize = 10_000;
const N_CONTROL_ROWS: usize = 6_108;

/// Generates a deterministic simulated experiment dataset.
///
/// The frame has 10 000 rows and the columns:
/// - `entity`: integer row identifier
/// - `variant`: exactly 6108 `"A"` and 3892 `"B"` labels, shuffled by `seed`
/// - `normal_same`: standard normal in both arms
/// - `normal_shifted`: standard normal in arm A, mean 1.0 in arm B
/// - `feature`: `"has"` or `"non"`, assigned uniformly
/// - `treatment_start_time`: uniform integer in `0..10`
///
/// The variant split is exact by construction, so downstream sample sizes are
/// reproducible for any seed.
pub fn generate_random_data(seed: u64) -> Result<(DataFrame, ExperimentMetadata), AnalysisError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let standard_normal = Normal::new(0.0, 1.0)?;
    let shifted_normal = Normal::new(1.0, 1.0)?;

    let mut variant_labels: Vec<&str> = vec!["A"; N_CONTROL_ROWS];
    variant_labels.extend(vec!["B"; N_ROWS - N_CONTROL_ROWS]);
    variant_labels.shuffle(&mut rng);

    let entity: Vec<i64> = (0..N_ROWS as i64).collect();
    let normal_same: Vec<f64> = (0..N_ROWS).map(|_| rng.sample(standard_normal)).collect();
    let normal_shifted: Vec<f64> = variant_labels
        .iter()
        .map(|label| {
            if *label == "B" {
                rng.sample(shifted_normal)
            } else {
                rng.sample(standard_normal)
            }
        })
        .collect();
    let feature: Vec<String> = (0..N_ROWS)
        .map(|_| {
            if rng.gen_bool(0.5) {
                "has".to_string()
            } else {
                "non".to_string()
            }
        })
        .collect();
    let treatment_start_time: Vec<i64> = (0..N_ROWS).map(|_| rng.gen_range(0..10)).collect();

    let frame = DataFrame::new(vec![
        ("entity".to_string(), Column::Int(entity)),
        (
            "variant".to_string(),
            Column::Text(variant_labels.iter().map(|label| label.to_string()).collect()),
        ),
        ("normal_same".to_string(), Column::Float(normal_same)),
        ("normal_shifted".to_string(), Column::Float(normal_shifted)),
        ("feature".to_string(), Column::Text(feature)),
        (
            "treatment_start_time".to_string(),
            Column::Int(treatment_start_time),
        ),
    ])?;

    let metadata = ExperimentMetadata::new()
        .with_experiment("random_data_generation")
        .with_source("simulated")
        .with_primary_kpi("normal_shifted");

    Ok((frame, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let (frame, _) = generate_random_data(42).unwrap();
        assert_eq!(frame.n_rows(), 10_000);
        assert_eq!(
            frame.column_names(),
            vec![
                "entity",
                "variant",
                "normal_same",
                "normal_shifted",
                "feature",
                "treatment_start_time"
            ]
        );
    }

    #[test]
    fn test_variant_split_is_exact() {
        let (frame, _) = generate_random_data(7).unwrap();
        let Some(Column::Text(labels)) = frame.column("variant") else {
            panic!("variant column missing");
        };
        let control = labels.iter().filter(|label| *label == "A").count();
        let treatment = labels.iter().filter(|label| *label == "B").count();
        assert_eq!(control, 6_108);
        assert_eq!(treatment, 3_892);
    }

    #[test]
    fn test_same_seed_reproduces_frame() {
        let (first, _) = generate_random_data(13).unwrap();
        let (second, _) = generate_random_data(13).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let (first, _) = generate_random_data(1).unwrap();
        let (second, _) = generate_random_data(2).unwrap();
        assert_ne!(
            first.numeric_column("normal_same").unwrap(),
            second.numeric_column("normal_same").unwrap()
        );
    }

    #[test]
    fn test_metadata_describes_simulation() {
        let (_, metadata) = generate_random_data(42).unwrap();
        assert_eq!(metadata.experiment.as_deref(), Some("random_data_generation"));
        assert_eq!(metadata.source.as_deref(), Some("simulated"));
        assert_eq!(metadata.primary_kpi.as_deref(), Some("normal_shifted"));
    }
}
