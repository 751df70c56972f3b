//! Fixed look of every figure: resolution, sizes, fonts and colours.
//!
//! Sizes are given in typographic points or inches and converted to pixels
//! at the output resolution, so changing `DPI` scales the whole figure.

use plotters::style::RGBColor;

/// Output resolution in dots per inch.
pub const DPI: u32 = 300;

/// 2×2 training-curve figure, inches.
pub const CURVES_FIGURE_IN: (f64, f64) = (15.0, 10.0);

/// 1×2 fine-tune figure, inches.
pub const FINETUNE_FIGURE_IN: (f64, f64) = (15.0, 6.0);

/// Whitespace kept around the tight bounding box, inches.
pub const PAD_IN: f64 = 0.1;

pub const FONT_FAMILY: &str = "sans-serif";

pub const LINE_WIDTH_PT: f64 = 2.0;
pub const MARKER_SIZE_PT: f64 = 6.0;
pub const TITLE_FONT_PT: f64 = 12.0;
pub const LABEL_FONT_PT: f64 = 10.0;
pub const TICK_FONT_PT: f64 = 10.0;
pub const LEGEND_FONT_PT: f64 = 10.0;

/// Gridline opacity.
pub const GRID_ALPHA: f64 = 0.3;
pub const BAR_ALPHA: f64 = 0.7;
/// Bar width in epoch units.
pub const BAR_WIDTH: f64 = 0.8;

// Single-letter colour codes of the classic plotting palette.
pub const BLUE: RGBColor = RGBColor(0, 0, 255);
pub const RED: RGBColor = RGBColor(255, 0, 0);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);
pub const MAGENTA: RGBColor = RGBColor(191, 0, 191);

pub fn pt_to_px(pt: f64) -> u32 {
    (pt * DPI as f64 / 72.0).round() as u32
}

pub fn in_to_px(inches: f64) -> u32 {
    (inches * DPI as f64).round() as u32
}

/// Canvas size in pixels for a figure size in inches.
pub fn figure_px(size_in: (f64, f64)) -> (u32, u32) {
    (in_to_px(size_in.0), in_to_px(size_in.1))
}
