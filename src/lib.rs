//! frame-scale - Pixel format conversion and scaling stage
//!
//! One stage of a video capture pipeline: converts the fixed-layout
//! captured frame (packed RGBX) into an arbitrary destination resolution
//! and pixel format. The numerically heavy resampling and color-space math
//! is delegated to an external conversion library behind the
//! [`engine::ScaleEngine`] seam; this crate owns the stage logic around it:
//! choosing the canonical input layout per destination format, building and
//! caching the conversion context and optional blur/sharpen filter kernel,
//! correcting the vertical scan-direction mismatch for YUV-family
//! destinations, and executing the conversion per frame with strict
//! invariant checking.

pub mod config;
pub mod engine;
pub mod error;
pub mod flip;
pub mod format;
pub mod image;
pub mod stage;

pub use config::ScaleConfig;
pub use engine::{ContextParams, FilterParams, FilterPlacement, ScaleEngine};
pub use error::{Result, ScaleError};
pub use format::{CanonicalInput, FormatFamily, PixelFormat, Resolution, CAPTURE_FORMAT};
pub use image::{DestImage, ImageDesc, SourceImage};
pub use stage::{ScaleStage, Stage, StageState};

#[cfg(feature = "swscale")]
pub use engine::sws::SwsEngine;
