use log::{debug, info};
use plotters::prelude::{SeriesLabelPosition, WHITE};

use crate::error::Result;
use crate::history::finetune_record::FinetuneRecord;
use crate::history::training_history::TrainingHistory;
use crate::plot::options::FinetuneOptions;
use crate::plot::panel::{draw_bars, draw_lines, Bars, Frame, Line, Marker, Reference};
use crate::plot::raster::Canvas;
use crate::plot::style::{BLUE, FINETUNE_FIGURE_IN, GREEN, RED};

/// Per-epoch values derived from a list of fine-tune records.
#[derive(Debug, Clone, PartialEq)]
pub struct FinetuneSummary {
    pub epochs: Vec<f64>,
    pub validation_accs: Vec<f64>,
    pub test_accs: Vec<f64>,
    /// `test_accs[i] - validation_accs[i]`.
    pub improvements: Vec<f64>,
    /// Arithmetic mean of `improvements`; `None` when there are no records.
    pub mean_improvement: Option<f64>,
}

impl FinetuneSummary {
    pub fn from_records(records: &[FinetuneRecord]) -> Self {
        let improvements: Vec<f64> = records.iter().map(FinetuneRecord::improvement).collect();
        let mean_improvement = if improvements.is_empty() {
            None
        } else {
            Some(improvements.iter().sum::<f64>() / improvements.len() as f64)
        };

        FinetuneSummary {
            epochs: records.iter().map(|r| r.epoch).collect(),
            validation_accs: records.iter().map(|r| r.validation_acc).collect(),
            test_accs: records.iter().map(|r| r.test_acc_after_finetune).collect(),
            improvements,
            mean_improvement,
        }
    }

    /// Legend text of the mean-improvement line, e.g. `"Average: 0.50%"`.
    pub fn average_label(&self) -> Option<String> {
        self.mean_improvement.map(average_label)
    }
}

fn average_label(mean: f64) -> String {
    format!("Average: {mean:.2}%")
}

/// Renders the quick fine-tune comparison for `history` to
/// `options.save_path`.
///
/// Left panel: validation accuracy against post-fine-tune test accuracy per
/// epoch. Right panel: the improvement per epoch as bars, with a dashed line
/// at the mean improvement.
///
/// Returns `Ok(())` without writing anything when the history has no
/// fine-tune results or they are empty (`null`, `[]`, `0`, `""` and the
/// like). A malformed record is reported as `MalformedRecord`.
pub fn plot_quick_finetune_results(
    history: &TrainingHistory,
    options: &FinetuneOptions,
) -> Result<()> {
    let summary = match history.finetune_results()? {
        Some(records) if !records.is_empty() => FinetuneSummary::from_records(&records),
        _ => {
            debug!("no quick fine-tune results, skipping {}", options.save_path.display());
            return Ok(());
        }
    };
    // Non-empty here, so the mean is always `Some`.
    let mean = summary.mean_improvement.unwrap_or_default();
    let mean_label = average_label(mean);

    let mut canvas = Canvas::new(FINETUNE_FIGURE_IN);
    debug!(
        "fine-tune results: {} records, mean improvement {mean:.4} on a {:?} canvas",
        summary.epochs.len(),
        canvas.size()
    );
    {
        let root = canvas.drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 2));

        draw_lines(
            &panels[0],
            &Frame {
                title: "Quick Finetune Results",
                x_desc: "Epoch",
                y_desc: "Accuracy (%)",
                legend_at: SeriesLabelPosition::LowerRight,
            },
            &[
                Line {
                    label: "Validation Accuracy",
                    color: BLUE,
                    marker: Marker::Circle,
                    xs: &summary.epochs,
                    ys: &summary.validation_accs,
                },
                Line {
                    label: "Test Accuracy (After Finetune)",
                    color: RED,
                    marker: Marker::Square,
                    xs: &summary.epochs,
                    ys: &summary.test_accs,
                },
            ],
        )?;

        draw_bars(
            &panels[1],
            &Frame {
                title: "Finetune Improvement",
                x_desc: "Epoch",
                y_desc: "Improvement (%)",
                legend_at: SeriesLabelPosition::UpperRight,
            },
            &Bars {
                label: "Improvement",
                color: GREEN,
                xs: &summary.epochs,
                heights: &summary.improvements,
                reference: Some(Reference { label: &mean_label, color: RED, y: mean }),
            },
        )?;

        root.present()?;
    }

    canvas.save_png(&options.save_path)?;
    info!("quick fine-tune results written to {}", options.save_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_record_mean_is_its_improvement() {
        let summary = FinetuneSummary::from_records(&[FinetuneRecord::new(1.0, 80.0, 82.5)]);
        assert_eq!(summary.improvements, vec![2.5]);
        assert_eq!(summary.mean_improvement, Some(2.5));
        assert_eq!(summary.average_label().as_deref(), Some("Average: 2.50%"));
    }

    #[test]
    fn mean_of_mixed_gains_and_losses() {
        let summary = FinetuneSummary::from_records(&[
            FinetuneRecord::new(1.0, 80.0, 82.0),
            FinetuneRecord::new(2.0, 85.0, 84.0),
        ]);
        assert_eq!(summary.epochs, vec![1.0, 2.0]);
        assert_eq!(summary.validation_accs, vec![80.0, 85.0]);
        assert_eq!(summary.test_accs, vec![82.0, 84.0]);
        assert_eq!(summary.improvements, vec![2.0, -1.0]);
        assert_eq!(summary.mean_improvement, Some(0.5));
        assert_eq!(summary.average_label().as_deref(), Some("Average: 0.50%"));
    }

    #[test]
    fn no_records_no_mean() {
        let summary = FinetuneSummary::from_records(&[]);
        assert!(summary.improvements.is_empty());
        assert_eq!(summary.mean_improvement, None);
        assert_eq!(summary.average_label(), None);
    }

    #[test]
    fn absent_or_empty_results_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finetune.png");
        let options = FinetuneOptions::new(&path);

        plot_quick_finetune_results(&TrainingHistory::new(), &options).unwrap();
        assert!(!path.exists());

        for raw in ["null", "[]", "0", r#""""#] {
            let json = format!(r#"{{"quick_finetune_results": {raw}}}"#);
            let empty = TrainingHistory::from_json_str(&json).unwrap();
            plot_quick_finetune_results(&empty, &options).unwrap();
            assert!(!path.exists(), "{raw}");
        }
    }
}
