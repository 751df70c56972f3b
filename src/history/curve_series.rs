use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};
use crate::history::epoch_metrics::EpochMetrics;
use crate::plot::options::CurveOptions;
use crate::plot::training_curves::plot_training_curves;

/// Parallel per-epoch series, the column-oriented form of a training log.
///
/// Every series must hold exactly one value per entry of `epochs`; see
/// [`CurveSeries::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    pub epochs: Vec<f64>,
    pub accuracies: Vec<f64>,
    pub ce_losses: Vec<f64>,
    pub hw_penalties: Vec<f64>,
    pub total_losses: Vec<f64>,
}

impl CurveSeries {
    /// Transposes row-oriented metrics into parallel series.
    pub fn from_metrics(rows: &[EpochMetrics]) -> Self {
        CurveSeries {
            epochs: rows.iter().map(|r| r.epoch).collect(),
            accuracies: rows.iter().map(|r| r.accuracy).collect(),
            ce_losses: rows.iter().map(|r| r.ce_loss).collect(),
            hw_penalties: rows.iter().map(|r| r.hw_penalty).collect(),
            total_losses: rows.iter().map(|r| r.total_loss).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Appends one epoch to every series.
    pub fn push(&mut self, row: EpochMetrics) {
        self.epochs.push(row.epoch);
        self.accuracies.push(row.accuracy);
        self.ce_losses.push(row.ce_loss);
        self.hw_penalties.push(row.hw_penalty);
        self.total_losses.push(row.total_loss);
    }

    /// Checks that every series has one value per epoch.
    pub fn validate(&self) -> Result<()> {
        check_lengths(
            &self.epochs,
            &[
                ("accuracies", self.accuracies.as_slice()),
                ("ce_losses", self.ce_losses.as_slice()),
                ("hw_penalties", self.hw_penalties.as_slice()),
                ("total_losses", self.total_losses.as_slice()),
            ],
        )
    }

    /// Renders the 2×2 training-curve figure for these series.
    pub fn plot(&self, options: &CurveOptions) -> Result<()> {
        plot_training_curves(
            &self.epochs,
            &self.accuracies,
            &self.ce_losses,
            &self.hw_penalties,
            &self.total_losses,
            options,
        )
    }
}

/// Fails on the first named series whose length differs from `epochs`.
pub(crate) fn check_lengths(epochs: &[f64], series: &[(&'static str, &[f64])]) -> Result<()> {
    for &(name, values) in series {
        if values.len() != epochs.len() {
            return Err(PlotError::LengthMismatch {
                series: name,
                expected: epochs.len(),
                actual: values.len(),
            });
        }
    }
    Ok(())
}
