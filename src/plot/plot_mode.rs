/// Which precision regime a training run used; only affects chart titles.
///
/// - `IntOnly`        — every layer quantised to integers.
/// - `MixedPrecision` — anything else, including an unspecified mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    IntOnly,
    #[default]
    MixedPrecision,
}

/// Marker the trainer puts in output-file suffixes for integer-only runs.
const INT_ONLY_MARKER: &str = "_int_only";

impl PlotMode {
    /// Picks the mode from a file-name style suffix such as `"_int_only"` or
    /// `"_mixed_lr0.01"`. Only the presence of the int-only marker matters.
    pub fn from_suffix(suffix: &str) -> Self {
        if suffix.contains(INT_ONLY_MARKER) {
            PlotMode::IntOnly
        } else {
            PlotMode::MixedPrecision
        }
    }

    /// Text appended to every panel title, leading space included.
    pub fn title_suffix(self) -> &'static str {
        match self {
            PlotMode::IntOnly => " (INT Only)",
            PlotMode::MixedPrecision => " (Mixed Precision)",
        }
    }
}
