use std::path::PathBuf;

use crate::plot::plot_mode::PlotMode;

/// Default destination of the training-curve figure.
pub const DEFAULT_CURVES_PATH: &str = "training_curves.png";

/// Default destination of the fine-tune comparison figure.
pub const DEFAULT_FINETUNE_PATH: &str = "quick_finetune_curves.png";

/// Options for `plot_training_curves`.
///
/// # Fields
/// - `save_path`   — PNG destination; parent directories must already exist
/// - `mode_suffix` — run suffix used to pick the title wording (see `PlotMode`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveOptions {
    pub save_path: PathBuf,
    pub mode_suffix: String,
}

impl CurveOptions {
    pub fn new(save_path: impl Into<PathBuf>, mode_suffix: impl Into<String>) -> Self {
        CurveOptions {
            save_path: save_path.into(),
            mode_suffix: mode_suffix.into(),
        }
    }

    pub fn mode(&self) -> PlotMode {
        PlotMode::from_suffix(&self.mode_suffix)
    }
}

impl Default for CurveOptions {
    fn default() -> Self {
        CurveOptions::new(DEFAULT_CURVES_PATH, "")
    }
}

/// Options for `plot_quick_finetune_results`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinetuneOptions {
    pub save_path: PathBuf,
}

impl FinetuneOptions {
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        FinetuneOptions { save_path: save_path.into() }
    }
}

impl Default for FinetuneOptions {
    fn default() -> Self {
        FinetuneOptions::new(DEFAULT_FINETUNE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_paths() {
        let curves = CurveOptions::default();
        assert_eq!(curves.save_path, PathBuf::from("training_curves.png"));
        assert_eq!(curves.mode(), PlotMode::MixedPrecision);
        assert_eq!(
            FinetuneOptions::default().save_path,
            PathBuf::from("quick_finetune_curves.png")
        );
    }

    #[test]
    fn mode_follows_suffix() {
        assert_eq!(CurveOptions::new("a.png", "_int_only").mode(), PlotMode::IntOnly);
    }
}
