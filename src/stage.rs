//! The conversion stage: context negotiation and per-frame execution

use tracing::{error, info};

use crate::config::ScaleConfig;
use crate::engine::{ContextParams, ScaleEngine};
use crate::error::{Result, ScaleError};
use crate::flip::correct_orientation;
use crate::format::CAPTURE_FORMAT;
use crate::image::{DestImage, ImageDesc, SourceImage};

/// Minimal capability interface the pipeline framework drives
pub trait Stage {
    /// Invoked once before any `run`
    fn initialize(&mut self) -> Result<()>;

    /// Invoked once per frame, strictly serialized by the pipeline
    fn run(&mut self, src: &SourceImage<'_>, dst: &mut DestImage<'_>) -> Result<()>;
}

/// Stage lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum StageState {
    Uninitialized,
    Ready,
    /// Terminal: the recorded error surfaces on every subsequent call
    Failed(ScaleError),
}

/// Converts the fixed-layout captured frame to the negotiated destination
/// geometry and pixel format.
///
/// One instance covers exactly one negotiated conversion: the filter kernel
/// and conversion context are built once during [`Stage::initialize`] and
/// stay immutable until the stage is dropped. Changing size or format means
/// building a new stage. Single-threaded and non-reentrant; the surrounding
/// pipeline serializes all calls.
pub struct ScaleStage<E: ScaleEngine> {
    engine: E,
    config: ScaleConfig,
    src_desc: ImageDesc,
    dst_desc: ImageDesc,
    state: StageState,
    filter: Option<E::Filter>,
    context: Option<E::Context>,
}

impl<E: ScaleEngine> ScaleStage<E> {
    /// Create a stage for one negotiated conversion.
    ///
    /// `src` describes the captured frame (always the canonical capture
    /// layout), `dst` the destination geometry and format every later frame
    /// must match.
    pub fn new(engine: E, config: ScaleConfig, src: ImageDesc, dst: ImageDesc) -> Self {
        Self {
            engine,
            config,
            src_desc: src,
            dst_desc: dst,
            state: StageState::Uninitialized,
            filter: None,
            context: None,
        }
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    pub fn source_desc(&self) -> ImageDesc {
        self.src_desc
    }

    pub fn dest_desc(&self) -> ImageDesc {
        self.dst_desc
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == StageState::Ready
    }

    fn fail(&mut self, error: ScaleError) -> Result<()> {
        error!(%error, src = %self.src_desc, dst = %self.dst_desc, "scale stage failed");
        self.state = StageState::Failed(error.clone());
        Err(error)
    }
}

impl<E: ScaleEngine> Stage for ScaleStage<E> {
    fn initialize(&mut self) -> Result<()> {
        match &self.state {
            StageState::Uninitialized => {}
            StageState::Ready => return Err(ScaleError::AlreadyInitialized),
            StageState::Failed(error) => return Err(error.clone()),
        }

        if self.src_desc.format != CAPTURE_FORMAT {
            return self.fail(ScaleError::UnsupportedSourceFormat(
                self.src_desc.format.to_string(),
            ));
        }
        if !self.src_desc.resolution.is_valid() || !self.dst_desc.resolution.is_valid() {
            return self.fail(ScaleError::CannotGetContext(format!(
                "invalid dimensions {} -> {}",
                self.src_desc, self.dst_desc
            )));
        }

        let mut filter = match self.engine.build_filter(&self.config.filter_params()) {
            Some(filter) => filter,
            None => return self.fail(ScaleError::CannotGetDefaultFilter),
        };

        let params = ContextParams {
            src: self.src_desc.resolution,
            src_input: self.dst_desc.format.canonical_input(),
            dst: self.dst_desc.resolution,
            dst_format: self.dst_desc.format,
            flags: self.config.effective_flags(),
        };
        let context =
            match self
                .engine
                .build_context(&params, &mut filter, self.config.filter_placement())
            {
                Some(context) => context,
                // `filter` goes out of scope here and is released even
                // though the context never came to be.
                None => {
                    return self.fail(ScaleError::CannotGetContext(format!(
                        "{} -> {}",
                        self.src_desc, self.dst_desc
                    )))
                }
            };

        self.filter = Some(filter);
        self.context = Some(context);
        self.state = StageState::Ready;
        info!(src = %self.src_desc, dst = %self.dst_desc, flags = params.flags, "scale stage ready");
        Ok(())
    }

    fn run(&mut self, src: &SourceImage<'_>, dst: &mut DestImage<'_>) -> Result<()> {
        match &self.state {
            StageState::Ready => {}
            StageState::Uninitialized => return Err(ScaleError::NotInitialized),
            StageState::Failed(error) => return Err(error.clone()),
        }

        // One instance, one negotiated conversion: frames must match the
        // descriptors the context was built from.
        if src.desc() != self.src_desc || dst.desc() != self.dst_desc {
            return Err(ScaleError::FrameMismatch {
                got: format!("{} -> {}", src.desc(), dst.desc()),
                expected: format!("{} -> {}", self.src_desc, self.dst_desc),
            });
        }

        let context = match self.context.as_mut() {
            Some(context) => context,
            None => return Err(ScaleError::NotInitialized),
        };

        let src_planes = correct_orientation(&src.plane_pointers(), src.height(), self.dst_desc.format);
        let mut dst_planes = dst.plane_pointers_mut();
        let written = self.engine.convert(
            context,
            &src_planes,
            0,
            src.height() as i32,
            &mut dst_planes,
        );

        let expected = self.dst_desc.height() as i32;
        if written != expected {
            // Deterministic for a fixed context and buffer shape, so a short
            // write is a setup defect, not a transient condition.
            let error = ScaleError::RowCountMismatch { written, expected };
            error!(%error, "converter row count mismatch");
            self.state = StageState::Failed(error.clone());
            return Err(error);
        }
        Ok(())
    }
}
