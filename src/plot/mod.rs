pub mod plot_mode;
pub mod options;
pub mod style;
pub mod training_curves;
pub mod finetune;
pub(crate) mod panel;
pub(crate) mod raster;

pub use plot_mode::PlotMode;
pub use options::{CurveOptions, FinetuneOptions, DEFAULT_CURVES_PATH, DEFAULT_FINETUNE_PATH};
pub use training_curves::plot_training_curves;
pub use finetune::{plot_quick_finetune_results, FinetuneSummary};
