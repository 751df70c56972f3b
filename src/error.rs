use plotters::drawing::DrawingAreaErrorKind;

/// Errors raised while preparing or rendering a chart.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// A parallel series does not line up with the epoch axis.
    #[error("series `{series}` has {actual} values, expected {expected} (one per epoch)")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A fine-tune result entry is missing a field or holds a non-numeric value.
    #[error("malformed fine-tune record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Any failure reported by the plotters drawing area.
    #[error("drawing error: {0}")]
    Drawing(String),

    /// Raster encoding or buffer error.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// PNG encoding failure.
    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, PlotError>;
