pub mod epoch_metrics;
pub mod finetune_record;
pub mod curve_series;
pub mod training_history;

pub use epoch_metrics::EpochMetrics;
pub use finetune_record::FinetuneRecord;
pub use curve_series::CurveSeries;
pub use training_history::{TrainingHistory, FINETUNE_RESULTS_KEY};
