//! Train and evaluate a classifier on synthetic four-channel EMG.
//!
//! Run with: `cargo run --example synthetic_emg`
//! Set `RUST_LOG=emg_hdc=debug` for training and prediction traces.

use emg_hdc::{build_trained_model, predict, release_model, HdcConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Mean channel amplitudes for five gestures.
const GESTURES: [[f64; 4]; 5] = [
    [0.05, 0.05, 0.05, 0.05],
    [0.60, 0.20, 0.15, 0.10],
    [0.15, 0.65, 0.30, 0.10],
    [0.10, 0.20, 0.70, 0.45],
    [0.45, 0.40, 0.35, 0.75],
];

fn record(segments: usize, len: usize, seed: u64) -> (Vec<usize>, Vec<Vec<f64>>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut labels = Vec::new();
    let mut samples = Vec::new();

    for segment in 0..segments {
        let gesture = segment % GESTURES.len();
        for _ in 0..len {
            labels.push(gesture);
            samples.push(
                GESTURES[gesture]
                    .iter()
                    .map(|&m| (m + rng.gen_range(-0.05..0.05)).clamp(0.0, 1.0))
                    .collect(),
            );
        }
    }

    (labels, samples)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("emg_hdc=info".parse()?))
        .init();

    println!("=== emg-hdc synthetic EMG example ===\n");

    let config = HdcConfig::default();
    println!("Configuration:\n{}\n", config.to_json()?);

    let (train_labels, train_samples) = record(15, 60, 1);
    let (test_labels, test_samples) = record(10, 60, 2);
    println!(
        "Training on {} samples, testing on {} samples",
        train_samples.len(),
        test_samples.len()
    );

    let model = build_trained_model(&train_labels, &train_samples, &config)?;
    let training = model.training_report();
    println!("\nTraining:");
    println!("  windows examined  = {}", training.windows_examined);
    println!("  accepted          = {}", training.accepted);
    println!("  redundant         = {}", training.redundant);
    println!("  transition skips  = {}", training.transition_skips);
    println!("  patterns/class    = {:?}", training.patterns_per_class);

    let report = predict(
        &model,
        &test_labels,
        &test_samples,
        config.ngram_size,
        config.precision,
    )?;
    println!("\nPrediction:");
    println!("  accuracy                       = {:.3}", report.accuracy);
    match report.accuracy_excluding_transitions {
        Some(steady) => println!("  accuracy excluding transitions = {steady:.3}"),
        None => println!("  accuracy excluding transitions = n/a (all windows are transitions)"),
    }
    println!("  windows evaluated              = {}", report.evaluated);

    release_model(model);
    println!("\n=== Example Complete ===");
    Ok(())
}
