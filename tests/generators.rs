//! Integration tests for the three dataset generators against reference outputs.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::DMatrix;
use simplex_sim::data::labels;
use simplex_sim::prelude::*;

/// Build the expected table: `reps` copies of each profile, closed row-wise.
fn two_group_table(group0: &[f64], group1: &[f64], reps: usize) -> LabeledTable {
    let n = group0.len();
    let raw = DMatrix::from_fn(2 * reps, n, |i, j| if i < reps { group0[j] } else { group1[j] });
    LabeledTable::new(closure_rows(&raw).unwrap(), labels("S", 2 * reps), labels("F", n)).unwrap()
}

fn assert_group_metadata(metadata: &Metadata, n_diff: i64, effect_size: f64) {
    let sample_ids: Vec<String> = labels("S", 10);
    assert_eq!(metadata.sample_ids(), sample_ids.as_slice());

    let mut columns = metadata.column_names().to_vec();
    columns.sort();
    assert_eq!(columns, vec!["effect_size", "group", "library_size", "n_diff"]);

    for (i, sid) in sample_ids.iter().enumerate() {
        let expected_group = if i < 5 { "0" } else { "1" };
        assert_eq!(metadata.get(sid, "group").unwrap().as_categorical(), Some(expected_group));
        assert_eq!(metadata.get(sid, "n_diff").unwrap().as_ordinal(), Some(n_diff));
        assert_eq!(metadata.get(sid, "library_size").unwrap().as_ordinal(), Some(10_000));
        assert_relative_eq!(
            metadata.get(sid, "effect_size").unwrap().as_continuous().unwrap(),
            effect_size,
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_effect_size_null_then_perturbed() {
    let mut gen = compositional_effect_size_generator(1.0, 5, 2, 5, 1).unwrap();

    // First dataset: alpha = 1, every row is the flat baseline.
    let (table, metadata, truth) = gen.next().unwrap().unwrap().into_parts();
    let expected = two_group_table(&[1.0; 5], &[1.0; 5], 5);
    assert!(table.approx_eq(&expected, 1e-12));
    for i in 0..10 {
        for j in 0..5 {
            assert_relative_eq!(table.get(i, j), 0.2, epsilon = 1e-12);
        }
    }
    assert_group_metadata(&metadata, 2, 1.0);
    assert_eq!(truth, vec!["F0", "F4"]);

    // Second dataset: the two groups differ at opposite ends.
    let (table, metadata, truth) = gen.next().unwrap().unwrap().into_parts();
    let expected = two_group_table(
        &[10.0, 1.0, 1.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0, 1.0, 10.0],
        5,
    );
    assert!(table.approx_eq(&expected, 1e-12));
    assert_group_metadata(&metadata, 2, 10.0);
    assert_eq!(truth, vec!["F0", "F4"]);

    assert!(gen.next().is_none());
}

#[test]
fn test_variable_features_second_position() {
    let mut gen = compositional_variable_features_generator(2, 2.0, 5, 2, 5).unwrap();

    let _ = gen.next().unwrap().unwrap();
    let (table, metadata, truth) = gen.next().unwrap().unwrap().into_parts();

    let expected = two_group_table(
        &[2.0, 2.0, 1.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0, 2.0, 2.0],
        5,
    );
    assert!(table.approx_eq(&expected, 1e-12));
    assert_group_metadata(&metadata, 4, 2.0);
    assert_eq!(truth, vec!["F0", "F1", "F3", "F4"]);
}

/// Causal values (F0..F4) shared by every production, one row per sample.
const REFERENCE_CAUSAL: [[f64; 5]; 10] = [
    [0.332744, 0.152341, 0.014620, 0.000294, 0.000001],
    [0.238071, 0.218276, 0.041949, 0.001690, 0.000014],
    [0.138861, 0.254962, 0.098126, 0.007916, 0.000134],
    [0.062624, 0.230263, 0.177471, 0.028671, 0.000971],
    [0.021137, 0.155643, 0.240229, 0.077721, 0.005271],
    [0.005271, 0.077721, 0.240229, 0.155643, 0.021137],
    [0.000971, 0.028671, 0.177471, 0.230263, 0.062624],
    [0.000134, 0.007916, 0.098126, 0.254962, 0.138861],
    [0.000014, 0.001690, 0.041949, 0.218276, 0.238071],
    [0.000001, 0.000294, 0.014620, 0.152341, 0.332744],
];

const REFERENCE_GRADIENT: [f64; 10] = [
    0.000000, 0.555556, 1.111111, 1.666667, 2.222222, 2.777778, 3.333333, 3.888889, 4.444444,
    5.000000,
];

fn assert_regression_dataset(dataset: &Dataset, contaminants: &[f64]) {
    let table = &dataset.table;
    assert_eq!(table.n_samples(), 10);
    assert_eq!(table.n_features(), 5 + contaminants.len());

    let mut expected_ids = labels("F", 5);
    expected_ids.extend(labels("X", contaminants.len()));
    assert_eq!(table.feature_ids(), expected_ids.as_slice());
    assert_eq!(table.sample_ids(), labels("S", 10).as_slice());

    for (i, causal) in REFERENCE_CAUSAL.iter().enumerate() {
        for (j, &v) in causal.iter().chain(contaminants).enumerate() {
            assert_abs_diff_eq!(table.get(i, j), v, epsilon = 1e-3);
        }
    }

    let gradient = dataset.metadata.column_f64("gradient").unwrap();
    for (g, expected) in gradient.iter().zip(REFERENCE_GRADIENT) {
        assert_abs_diff_eq!(*g, expected, epsilon = 1e-6);
    }
    assert_eq!(dataset.metadata.column_f64("n_diff").unwrap(), vec![5.0; 10]);
    assert_eq!(dataset.metadata.column_f64("library_size").unwrap(), vec![10_000.0; 10]);

    assert_eq!(dataset.truth, vec!["F0", "F1", "F2", "F3", "F4"]);
}

#[test]
fn test_regression_prefilter_reference() {
    let mut gen = compositional_regression_prefilter_generator(5.0, 10, 1.0, 5, 0.1, 3, 2).unwrap();

    let first = gen.next().unwrap().unwrap();
    assert_regression_dataset(&first, &[0.499977, 0.000023]);

    let second = gen.next().unwrap().unwrap();
    assert_regression_dataset(&second, &[0.496631, 0.003346, 0.000023]);

    assert!(gen.next().is_none());
}

#[test]
fn test_every_row_is_closed() {
    let configs = [
        GeneratorConfig::EffectSize(EffectSizeParams::new(2.0, 4, 5, 12, 3)),
        GeneratorConfig::VariableFeatures(VariableFeaturesParams::new(6, 3.0, 4, 7, 12)),
        GeneratorConfig::RegressionPrefilter(RegressionPrefilterParams::new(
            8.0, 25, 1.5, 10, 0.05, 12, 6,
        )),
    ];

    for config in &configs {
        for dataset in config.build().unwrap() {
            let dataset = dataset.unwrap();
            dataset.check_closed(1e-6).unwrap();
            assert!(dataset.table.is_closed(1e-6));
            assert_eq!(dataset.metadata.sample_ids(), dataset.table.sample_ids());
            for feature in &dataset.truth {
                assert!(dataset.table.feature_ids().contains(feature));
            }
        }
    }
}

#[test]
fn test_reconstruction_is_reproducible() {
    let first: Vec<Dataset> = compositional_regression_prefilter_generator(5.0, 10, 1.0, 5, 0.1, 6, 4)
        .unwrap()
        .map(|d| d.unwrap())
        .collect();
    let second: Vec<Dataset> = compositional_regression_prefilter_generator(5.0, 10, 1.0, 5, 0.1, 6, 4)
        .unwrap()
        .map(|d| d.unwrap())
        .collect();
    assert_eq!(first, second);

    let gen = compositional_effect_size_generator(1.0, 3, 4, 6, 2).unwrap();
    let mut walked = gen.clone();
    let _ = walked.advance().unwrap();
    let _ = walked.advance().unwrap();
    assert_eq!(walked.advance().unwrap(), gen.dataset_at(2).unwrap());
}

#[test]
fn test_exhaustion_signal() {
    let mut gen = compositional_variable_features_generator(1, 2.0, 2, 3, 4).unwrap();
    assert_eq!(gen.len(), 3);

    for _ in 0..3 {
        gen.advance().unwrap();
    }
    assert!(matches!(
        gen.advance(),
        Err(SimError::SweepExhausted { position: 3, len: 3 })
    ));
    assert!(gen.next().is_none());
    assert!(matches!(
        gen.dataset_at(7),
        Err(SimError::SweepExhausted { position: 7, len: 3 })
    ));
}

#[test]
fn test_invalid_parameters_fail_fast() {
    assert!(matches!(
        compositional_effect_size_generator(1.0, 5, 2, 5, 6),
        Err(SimError::InvalidParameter { ref name, .. }) if name == "n_diff"
    ));
    assert!(matches!(
        compositional_variable_features_generator(6, 2.0, 5, 2, 5),
        Err(SimError::InvalidParameter { ref name, .. }) if name == "max_changing"
    ));
    assert!(matches!(
        compositional_effect_size_generator(1.0, 0, 2, 5, 1),
        Err(SimError::InvalidParameter { ref name, .. }) if name == "reps"
    ));
    assert!(matches!(
        compositional_regression_prefilter_generator(5.0, 10, 1.0, 0, 0.1, 3, 2),
        Err(SimError::InvalidParameter { ref name, .. }) if name == "n_species"
    ));
}
