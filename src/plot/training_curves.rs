use log::{debug, info};
use plotters::prelude::{SeriesLabelPosition, WHITE};

use crate::error::Result;
use crate::history::curve_series::check_lengths;
use crate::plot::options::CurveOptions;
use crate::plot::panel::{draw_lines, Frame, Line, Marker};
use crate::plot::plot_mode::PlotMode;
use crate::plot::raster::Canvas;
use crate::plot::style::{BLUE, CURVES_FIGURE_IN, GREEN, MAGENTA, RED};

/// Series names of the four panels, in grid order.
const PANEL_NAMES: [&str; 4] =
    ["Test Accuracy", "Cross Entropy Loss", "Hardware Penalty", "Total Loss"];

/// Full panel titles for `mode`, in grid order.
pub(crate) fn panel_titles(mode: PlotMode) -> [String; 4] {
    PANEL_NAMES.map(|name| format!("{name}{}", mode.title_suffix()))
}

/// Renders test accuracy, cross-entropy loss, hardware penalty and total loss
/// against `epochs` as a 2×2 grid and writes it to `options.save_path`.
///
/// Panel titles end in " (INT Only)" or " (Mixed Precision)" depending on
/// `options.mode_suffix`.
///
/// # Errors
/// - `LengthMismatch` if any series is not the length of `epochs`; nothing is
///   written in that case
/// - `Io` if the destination cannot be created
/// - `Drawing` / `Image` / `Png` for rendering or encoding failures
pub fn plot_training_curves(
    epochs: &[f64],
    accuracies: &[f64],
    ce_losses: &[f64],
    hw_penalties: &[f64],
    total_losses: &[f64],
    options: &CurveOptions,
) -> Result<()> {
    check_lengths(
        epochs,
        &[
            ("accuracies", accuracies),
            ("ce_losses", ce_losses),
            ("hw_penalties", hw_penalties),
            ("total_losses", total_losses),
        ],
    )?;

    let titles = panel_titles(options.mode());
    let panels = [
        ("Accuracy (%)", BLUE, accuracies, SeriesLabelPosition::LowerRight),
        ("Loss", RED, ce_losses, SeriesLabelPosition::UpperRight),
        ("Penalty", GREEN, hw_penalties, SeriesLabelPosition::UpperRight),
        ("Loss", MAGENTA, total_losses, SeriesLabelPosition::UpperRight),
    ];

    let mut canvas = Canvas::new(CURVES_FIGURE_IN);
    debug!("training curves: {} epochs on a {:?} canvas", epochs.len(), canvas.size());
    {
        let root = canvas.drawing_area();
        root.fill(&WHITE)?;

        let areas = root.split_evenly((2, 2));
        for (((area, name), title), (y_desc, color, values, legend_at)) in
            areas.iter().zip(PANEL_NAMES).zip(&titles).zip(panels)
        {
            debug!("drawing panel `{title}`");
            draw_lines(
                area,
                &Frame { title, x_desc: "Epoch", y_desc, legend_at },
                &[Line { label: name, color, marker: Marker::None, xs: epochs, ys: values }],
            )?;
        }

        root.present()?;
    }

    canvas.save_png(&options.save_path)?;
    info!("training curves written to {}", options.save_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;

    #[test]
    fn titles_follow_mode_suffix() {
        for suffix in ["", "_foo", "_mixed_lr0.01"] {
            let titles = panel_titles(PlotMode::from_suffix(suffix));
            assert!(titles.iter().all(|t| t.ends_with(" (Mixed Precision)")), "{suffix:?}");
        }

        let titles = panel_titles(PlotMode::from_suffix("_int_only"));
        assert_eq!(
            titles,
            [
                "Test Accuracy (INT Only)",
                "Cross Entropy Loss (INT Only)",
                "Hardware Penalty (INT Only)",
                "Total Loss (INT Only)",
            ]
        );
    }

    #[test]
    fn mismatched_lengths_fail_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curves.png");
        let options = CurveOptions::new(&path, "");

        let err = plot_training_curves(
            &[1.0, 2.0, 3.0],
            &[10.0, 20.0, 30.0],
            &[2.0, 1.5],
            &[0.1, 0.1, 0.1],
            &[2.1, 1.6, 1.2],
            &options,
        )
        .unwrap_err();

        assert!(matches!(err, PlotError::LengthMismatch { series: "ce_losses", .. }));
        assert!(!path.exists());
    }
}
