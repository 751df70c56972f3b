use serde::{Deserialize, Serialize};

/// One row of the per-epoch training log.
///
/// The training loop that produces these lives outside this crate; callers
/// typically push one `EpochMetrics` per completed epoch and hand the whole
/// slice to `CurveSeries::from_metrics` when it is time to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Epoch index as reported by the trainer (usually 1-based).
    pub epoch: f64,
    /// Test accuracy in percent.
    pub accuracy: f64,
    /// Mean cross-entropy loss for the epoch.
    pub ce_loss: f64,
    /// Hardware penalty term added to the loss.
    pub hw_penalty: f64,
    /// `ce_loss` plus the weighted hardware penalty.
    pub total_loss: f64,
}
