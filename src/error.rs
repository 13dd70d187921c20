use thiserror::Error;

/// Stage-wide error type
///
/// Initialization failures (`CannotGetDefaultFilter`, `CannotGetContext`) are
/// terminal: the stage transitions to `Failed` and every subsequent `run`
/// surfaces the recorded error. `RowCountMismatch` indicates a latent setup
/// defect rather than a transient condition and also poisons the stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("Cannot build default blur/sharpen filter from the configured parameters")]
    CannotGetDefaultFilter,

    #[error("Cannot get conversion context: {0}")]
    CannotGetContext(String),

    #[error("Converter wrote {written} rows, expected {expected}")]
    RowCountMismatch { written: i32, expected: i32 },

    #[error("Stage has not been initialized")]
    NotInitialized,

    #[error("Stage is already initialized")]
    AlreadyInitialized,

    #[error("Unsupported source format {0}: capture frames are packed RGBX")]
    UnsupportedSourceFormat(String),

    #[error("Frame does not match negotiated conversion: got {got}, expected {expected}")]
    FrameMismatch { got: String, expected: String },
}

/// Result type alias for stage operations
pub type Result<T> = std::result::Result<T, ScaleError>;
