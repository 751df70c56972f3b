use std::ops::Range;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::Result;
use crate::plot::style::{
    pt_to_px, BAR_ALPHA, BAR_WIDTH, FONT_FAMILY, GRID_ALPHA, LABEL_FONT_PT, LEGEND_FONT_PT,
    LINE_WIDTH_PT, MARKER_SIZE_PT, TICK_FONT_PT, TITLE_FONT_PT,
};

/// One subplot of a figure.
pub(crate) type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    None,
    Circle,
    Square,
}

/// A labelled polyline.
pub(crate) struct Line<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub marker: Marker,
    pub xs: &'a [f64],
    pub ys: &'a [f64],
}

/// Title, axis descriptions and legend placement of a panel.
pub(crate) struct Frame<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub legend_at: SeriesLabelPosition,
}

/// Labelled bars with an optional dashed horizontal reference line.
pub(crate) struct Bars<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub xs: &'a [f64],
    pub heights: &'a [f64],
    pub reference: Option<Reference<'a>>,
}

pub(crate) struct Reference<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub y: f64,
}

/// Padded `[min, max]` range of the finite values. Degenerate spans are
/// widened so the axis never collapses; no values gives `0..1`.
pub(crate) fn axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else if lo != 0.0 {
        lo.abs() * AXIS_MARGIN
    } else {
        0.5
    };
    (lo - pad)..(hi + pad)
}

fn font(pt: f64) -> (&'static str, u32) {
    (FONT_FAMILY, pt_to_px(pt))
}

fn line_style(color: RGBColor) -> ShapeStyle {
    color.stroke_width(pt_to_px(LINE_WIDTH_PT))
}

fn legend_swatch_px() -> i32 {
    2 * pt_to_px(LEGEND_FONT_PT) as i32
}

/// Draws a line chart with gridlines and a legend onto `area`.
pub(crate) fn draw_lines(area: &Panel<'_>, frame: &Frame<'_>, lines: &[Line<'_>]) -> Result<()> {
    let x_range = axis_range(lines.iter().flat_map(|l| l.xs.iter().copied()));
    let y_range = axis_range(lines.iter().flat_map(|l| l.ys.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(frame.title, font(TITLE_FONT_PT).into_font())
        .margin(pt_to_px(TICK_FONT_PT))
        .x_label_area_size(3 * pt_to_px(TICK_FONT_PT))
        .y_label_area_size(5 * pt_to_px(TICK_FONT_PT))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(frame.x_desc)
        .y_desc(frame.y_desc)
        .axis_desc_style(font(LABEL_FONT_PT))
        .label_style(font(TICK_FONT_PT))
        .bold_line_style(BLACK.mix(GRID_ALPHA))
        .light_line_style(TRANSPARENT)
        .draw()?;

    let swatch = legend_swatch_px();
    let marker_r = pt_to_px(MARKER_SIZE_PT) as i32 / 2;

    for line in lines {
        let style = line_style(line.color);
        let points = || line.xs.iter().copied().zip(line.ys.iter().copied());

        chart
            .draw_series(LineSeries::new(points(), style))?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + swatch, y)], style));

        let fill = line.color.filled();
        match line.marker {
            Marker::None => {}
            Marker::Circle => {
                chart.draw_series(points().map(|p| Circle::new(p, marker_r, fill)))?;
            }
            Marker::Square => {
                chart.draw_series(points().map(|p| {
                    EmptyElement::at(p)
                        + Rectangle::new([(-marker_r, -marker_r), (marker_r, marker_r)], fill)
                }))?;
            }
        }
    }

    draw_legend(&mut chart, &frame.legend_at)
}

/// Draws a bar chart, plus the reference line if any, onto `area`.
pub(crate) fn draw_bars(area: &Panel<'_>, frame: &Frame<'_>, bars: &Bars<'_>) -> Result<()> {
    let half = BAR_WIDTH / 2.0;
    let x_range = axis_range(bars.xs.iter().flat_map(|&x| [x - half, x + half]));
    // Bars grow from zero, so zero is always on the axis.
    let y_range = axis_range(
        bars.heights
            .iter()
            .copied()
            .chain(std::iter::once(0.0))
            .chain(bars.reference.as_ref().map(|r| r.y)),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(frame.title, font(TITLE_FONT_PT).into_font())
        .margin(pt_to_px(TICK_FONT_PT))
        .x_label_area_size(3 * pt_to_px(TICK_FONT_PT))
        .y_label_area_size(5 * pt_to_px(TICK_FONT_PT))
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc(frame.x_desc)
        .y_desc(frame.y_desc)
        .axis_desc_style(font(LABEL_FONT_PT))
        .label_style(font(TICK_FONT_PT))
        .bold_line_style(BLACK.mix(GRID_ALPHA))
        .light_line_style(TRANSPARENT)
        .draw()?;

    let swatch = legend_swatch_px();
    let fill = bars.color.mix(BAR_ALPHA).filled();

    chart
        .draw_series(bars.xs.iter().zip(bars.heights.iter()).map(|(&x, &h)| {
            Rectangle::new([(x - half, h.min(0.0)), (x + half, h.max(0.0))], fill)
        }))?
        .label(bars.label)
        .legend(move |(x, y)| Rectangle::new([(x, y - swatch / 4), (x + swatch, y + swatch / 4)], fill));

    if let Some(reference) = &bars.reference {
        let style = line_style(reference.color);
        let dash = pt_to_px(3.7 * LINE_WIDTH_PT);
        let gap = pt_to_px(1.6 * LINE_WIDTH_PT);
        chart
            .draw_series(DashedLineSeries::new(
                vec![(x_range.start, reference.y), (x_range.end, reference.y)],
                dash,
                gap,
                style,
            ))?
            .label(reference.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + swatch, y)], style));
    }

    draw_legend(&mut chart, &frame.legend_at)
}

fn draw_legend<'a>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    position: &SeriesLabelPosition,
) -> Result<()> {
    let swatch = legend_swatch_px();
    chart
        .configure_series_labels()
        .position(position.clone())
        .label_font(font(LEGEND_FONT_PT))
        .legend_area_size(swatch + swatch / 4)
        .margin(pt_to_px(LEGEND_FONT_PT))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(GRID_ALPHA))
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_pads_five_percent_of_span() {
        let r = axis_range([1.0, 11.0]);
        assert!((r.start - 0.5).abs() < 1e-12);
        assert!((r.end - 11.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_ranges_do_not_collapse() {
        let single = axis_range([2.5]);
        assert!(single.start < 2.5 && single.end > 2.5);

        let zero = axis_range([0.0, 0.0]);
        assert_eq!(zero, -0.5..0.5);

        assert_eq!(axis_range(std::iter::empty::<f64>()), 0.0..1.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let r = axis_range([f64::NAN, 1.0, f64::INFINITY, 3.0]);
        assert!(r.start < 1.0 && r.end > 3.0 && r.end.is_finite());
    }
}
