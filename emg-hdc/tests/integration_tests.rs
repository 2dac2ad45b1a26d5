//! Integration tests for emg-hdc.
//!
//! These tests run the complete pipeline on synthetic multi-channel signals:
//! item memory construction, n-gram encoding, associative-memory training and
//! windowed prediction.

use emg_hdc::{
    build_trained_model, compute_ngram, compute_sum_hv, hdc_predict, hdc_train_with_rng,
    release_model, vsa, HdcConfig, HdcError, TrainedModel,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Per-channel amplitude profiles for three synthetic gestures.
const PROFILES: [[f64; 4]; 3] = [
    [0.1, 0.2, 0.8, 0.7],
    [0.8, 0.7, 0.1, 0.2],
    [0.5, 0.9, 0.5, 0.1],
];

fn emg_config(num_classes: usize) -> HdcConfig {
    HdcConfig::default()
        .with_num_classes(num_classes)
        .with_dimension(4000)
        .with_ngram_size(3)
        .with_max_level(20)
        .with_precision(20.0)
        .with_cutting_angle(0.9)
}

/// Generate `segments` gesture segments of `len` samples each, cycling through
/// the profiles with bounded uniform noise.
fn synthetic_emg(
    segments: usize,
    len: usize,
    num_classes: usize,
    seed: u64,
) -> (Vec<usize>, Vec<Vec<f64>>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut labels = Vec::with_capacity(segments * len);
    let mut samples = Vec::with_capacity(segments * len);

    for segment in 0..segments {
        let class = segment % num_classes;
        for _ in 0..len {
            let sample: Vec<f64> = PROFILES[class]
                .iter()
                .map(|&p| (p + rng.gen_range(-0.04..0.04)).clamp(0.0, 0.999))
                .collect();
            labels.push(class);
            samples.push(sample);
        }
    }

    (labels, samples)
}

#[test]
fn test_two_constant_signals_separate_perfectly() {
    let config = emg_config(2).with_dimension(10_000).with_max_level(21);
    let samples = [vec![vec![0.0; 4]; 30], vec![vec![1.0; 4]; 30]].concat();
    let labels = [vec![0; 30], vec![1; 30]].concat();

    let model = build_trained_model(&labels, &samples, &config).unwrap();
    let am = model.associative_memory();
    assert_eq!(am.pattern_counts(), &[1, 1]);

    // Level 0 and level 20 are 20 blocks apart, so the prototypes share
    // almost nothing.
    let p0 = am.prototype(0).unwrap();
    let p1 = am.prototype(1).unwrap();
    let sim = p0.cosine(&p1).unwrap();
    assert!(sim < 0.2, "prototype similarity {sim}");

    // Held-out windows from the same two signals.
    let test_samples = [vec![vec![0.0; 4]; 8], vec![vec![1.0; 4]; 8]].concat();
    let test_labels = [vec![0; 8], vec![1; 8]].concat();
    let report = hdc_predict(&model, &test_labels, &test_samples, 3, 20.0).unwrap();
    assert_eq!(report.accuracy_excluding_transitions, Some(1.0));
    assert_eq!(report.evaluated, 14);
}

#[test]
fn test_noisy_gestures_held_out() {
    let config = emg_config(3);
    let (train_labels, train_samples) = synthetic_emg(9, 40, 3, 1);
    let (test_labels, test_samples) = synthetic_emg(6, 40, 3, 2);

    let model = build_trained_model(&train_labels, &train_samples, &config).unwrap();
    let training = model.training_report();
    assert!(training.patterns_per_class.iter().all(|&c| c > 0));
    assert!(training.redundant > 0, "cutting angle should drop repeats");
    assert_eq!(training.transition_skips, 8);

    let report = model.predict(&test_labels, &test_samples).unwrap();
    let steady = report.accuracy_excluding_transitions.unwrap();
    println!(
        "accuracy = {:.3}, excluding transitions = {steady:.3}",
        report.accuracy
    );
    assert!(steady >= 0.9);
    assert!(report.accuracy >= 0.85);
    assert_eq!(report.transition_windows, 10);
}

#[test]
fn test_prediction_never_mutates_model() {
    let config = emg_config(3);
    let (labels, samples) = synthetic_emg(3, 30, 3, 5);
    let model = build_trained_model(&labels, &samples, &config).unwrap();
    let before = model.associative_memory().clone();

    let first = model.predict(&labels, &samples).unwrap();
    let second = model.predict(&labels, &samples).unwrap();

    assert_eq!(first, second);
    assert_eq!(model.associative_memory(), &before);
}

#[test]
fn test_sum_hv_prototype_matches_class() {
    let config = emg_config(3);
    let (labels, samples) = synthetic_emg(3, 40, 3, 9);
    let model = build_trained_model(&labels, &samples, &config).unwrap();
    let memory = model.item_memory();

    for class in 0..3 {
        let segment = &samples[class * 40..(class + 1) * 40];
        let prototype = compute_sum_hv(segment, memory, 3, config.precision).unwrap();
        let (nearest, _) = model
            .associative_memory()
            .nearest(prototype.as_slice())
            .unwrap();
        assert_eq!(nearest, class);
    }
}

#[test]
fn test_ngram_encoding_matches_primitives() {
    let config = emg_config(1);
    let (labels, samples) = synthetic_emg(1, 10, 1, 3);
    let model = build_trained_model(&labels, &samples, &config).unwrap();
    let memory = model.item_memory();

    let window = &samples[2..5];
    let record = |s: &[f64]| {
        let mut acc = vec![0.0; memory.dimension()];
        for (c, &x) in s.iter().enumerate() {
            let level = memory.lookup_level(x, 20.0).unwrap();
            let id = memory.channel(c).unwrap();
            let bound = vsa::entrywise_product(level.as_slice(), id.as_slice()).unwrap();
            acc = vsa::entrywise_sum(&acc, &bound).unwrap();
        }
        acc
    };

    let mut expected = record(window[0].as_slice());
    for sample in &window[1..] {
        let shifted = vsa::circ_shift(&expected);
        expected = vsa::entrywise_product(&shifted, &record(sample.as_slice())).unwrap();
    }

    let ngram = compute_ngram(window, memory, 20.0).unwrap();
    assert_eq!(ngram.as_slice(), expected.as_slice());
}

#[test]
fn test_seeded_builds_are_reproducible() {
    let config = emg_config(3).with_seed(1234);
    let (labels, samples) = synthetic_emg(3, 20, 3, 4);

    let a = build_trained_model(&labels, &samples, &config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let b = hdc_train_with_rng(&labels, &samples, &config, &mut rng).unwrap();
    let c = build_trained_model(&labels, &samples, &config.clone().with_seed(4321)).unwrap();

    assert_eq!(a.item_memory(), b.item_memory());
    assert_eq!(a.associative_memory(), b.associative_memory());
    assert_ne!(a.item_memory(), c.item_memory());
}

#[test]
fn test_transition_accuracy_semantics() {
    let config = emg_config(2).with_ngram_size(4);
    let samples = [vec![vec![0.1; 4]; 10], vec![vec![0.9; 4]; 10]].concat();
    let labels = [vec![0; 10], vec![1; 10]].concat();
    let model = build_trained_model(&labels, &samples, &config).unwrap();

    let report = model.predict(&labels, &samples).unwrap();
    // 17 windows; starts 7, 8 and 9 straddle the boundary.
    assert_eq!(report.evaluated, 17);
    assert_eq!(report.transition_windows, 3);
    assert_eq!(report.accuracy_excluding_transitions, Some(1.0));
    assert!(report.accuracy <= 1.0 && report.accuracy >= 14.0 / 17.0);
}

#[test]
fn test_error_surface() {
    let config = emg_config(2);
    let (labels, samples) = synthetic_emg(2, 10, 2, 8);

    assert!(matches!(
        build_trained_model(&labels, &samples, &config.clone().with_dimension(4001)),
        Err(HdcError::InvalidArgument(_))
    ));
    assert!(matches!(
        build_trained_model(&labels, &samples, &config.clone().with_max_level(0)),
        Err(HdcError::InvalidArgument(_))
    ));
    assert!(matches!(
        build_trained_model(&labels[1..], &samples, &config),
        Err(HdcError::DimensionMismatch { .. })
    ));

    let model: TrainedModel = build_trained_model(&labels, &samples, &config).unwrap();
    let out_of_range = vec![vec![2.0; 4]; 20];
    assert_eq!(
        model.predict(&labels, &out_of_range),
        Err(HdcError::NoEligibleWindows)
    );
    release_model(model);
}

#[test]
fn test_untrained_model_surfaces_degenerate_vector() {
    let config = HdcConfig::default()
        .with_num_classes(2)
        .with_dimension(1000)
        .with_ngram_size(2)
        .with_max_level(10)
        .with_precision(10.0);
    let labels = vec![0, 0, 0, 1, 1, 1];

    // Every amplitude quantizes past the last level, so nothing is learned.
    let model = build_trained_model(&labels, &vec![vec![5.0; 4]; 6], &config).unwrap();
    assert_eq!(model.training_report().patterns_per_class, vec![0, 0]);
    assert_eq!(model.training_report().out_of_range_skips, 4);
    assert_eq!(model.training_report().transition_skips, 1);

    let valid = vec![vec![0.1; 4]; 6];
    assert_eq!(
        model.predict(&labels, &valid),
        Err(HdcError::DegenerateVector)
    );
    assert_eq!(
        model.classify(&valid[..2]).map(|c| c.label),
        Err(HdcError::DegenerateVector)
    );
}
