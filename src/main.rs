// Renders the charts for a saved training history.
//
//   cargo run -- history.json --out-dir plots --mode-suffix _int_only
//
// All chart logic lives in the library (src/lib.rs and its modules).
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use trainplot::{
    plot_quick_finetune_results, CurveOptions, FinetuneOptions, Result, TrainingHistory,
};
use trainplot::plot::{DEFAULT_CURVES_PATH, DEFAULT_FINETUNE_PATH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Training history JSON written by the trainer
    history: PathBuf,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Run suffix; one containing `_int_only` selects the INT-only titles
    #[arg(short, long, default_value = "")]
    mode_suffix: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let history = TrainingHistory::load_json(&args.history)?;
    log::info!("loaded training history from {}", args.history.display());

    match history.training_curves()? {
        Some(curves) => {
            let options = CurveOptions::new(
                args.out_dir.join(DEFAULT_CURVES_PATH),
                args.mode_suffix.clone(),
            );
            curves.plot(&options)?;
        }
        None => log::info!("history has no per-epoch curves, skipping {DEFAULT_CURVES_PATH}"),
    }

    plot_quick_finetune_results(
        &history,
        &FinetuneOptions::new(args.out_dir.join(DEFAULT_FINETUNE_PATH)),
    )
}
