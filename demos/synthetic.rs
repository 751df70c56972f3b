/// Synthetic training-chart demo for trainplot.
///
/// Fabricates a 30-epoch training log (accuracy climbing towards ~90 %, losses
/// decaying, a hardware penalty shrinking as the run settles) plus a quick
/// fine-tune result every five epochs, then renders both figures into the
/// current directory.
///
/// Run with:
///   cargo run --example synthetic --release
///   RUST_LOG=debug cargo run --example synthetic --release -- _int_only

use rand::Rng;
use trainplot::{
    plot_quick_finetune_results, CurveOptions, CurveSeries, EpochMetrics, FinetuneOptions,
    FinetuneRecord, TrainingHistory,
};

fn main() -> trainplot::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mode_suffix = std::env::args().nth(1).unwrap_or_default();
    let mut rng = rand::thread_rng();

    let mut curves = CurveSeries::default();
    for epoch in 1..=30 {
        let t = epoch as f64;
        let ce_loss = 2.3 * (-t / 8.0).exp() + 0.25 + rng.gen_range(-0.03..0.03);
        let hw_penalty = 0.6 * (-t / 12.0).exp() + 0.05;
        curves.push(EpochMetrics {
            epoch: t,
            accuracy: 90.0 - 80.0 * (-t / 6.0).exp() + rng.gen_range(-0.8..0.8),
            ce_loss,
            hw_penalty,
            total_loss: ce_loss + 0.5 * hw_penalty,
        });
    }

    let finetune: Vec<FinetuneRecord> = (1..=6)
        .map(|i| {
            let epoch = (i * 5) as f64;
            let val = 90.0 - 80.0 * (-epoch / 6.0).exp();
            FinetuneRecord::new(epoch, val, val + rng.gen_range(-1.0..3.0))
        })
        .collect();

    let mut history = TrainingHistory::new();
    history.set_training_curves(&curves)?;
    history.set_finetune_results(&finetune)?;
    history.save_json("training_history.json")?;

    curves.plot(&CurveOptions::new("training_curves.png", mode_suffix))?;
    plot_quick_finetune_results(&history, &FinetuneOptions::default())?;

    println!("Wrote training_history.json, training_curves.png and quick_finetune_curves.png");
    Ok(())
}
