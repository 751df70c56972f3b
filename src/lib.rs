pub mod error;
pub mod history;
pub mod plot;

// Convenience re-exports
pub use error::{PlotError, Result};
pub use history::{CurveSeries, EpochMetrics, FinetuneRecord, TrainingHistory};
pub use plot::{
    plot_quick_finetune_results, plot_training_curves, CurveOptions, FinetuneOptions,
    FinetuneSummary, PlotMode,
};
