//! Conversion-library boundary
//!
//! Everything the stage needs from the external converter is expressed by
//! the [`ScaleEngine`] trait: building a blur/sharpen filter kernel,
//! negotiating an immutable conversion context, and running one frame
//! through it. The production backend is [`sws::SwsEngine`] (libswscale,
//! behind the `swscale` feature); tests substitute a stub.

#[cfg(feature = "swscale")]
pub mod sws;

use crate::format::{CanonicalInput, PixelFormat, Resolution};
use crate::image::{PlanePointers, PlanePointersMut};

/// Algorithm selection bits for the conversion context.
///
/// Values match the libswscale vocabulary so a configured bitmask passes
/// straight through to the production backend.
pub mod flags {
    pub const FAST_BILINEAR: i32 = 0x1;
    pub const BILINEAR: i32 = 0x2;
    pub const BICUBIC: i32 = 0x4;
    pub const POINT: i32 = 0x10;
    pub const AREA: i32 = 0x20;
    pub const BICUBLIN: i32 = 0x40;
    pub const GAUSS: i32 = 0x80;
    pub const SINC: i32 = 0x100;
    pub const LANCZOS: i32 = 0x200;
    pub const SPLINE: i32 = 0x400;

    /// Higher-precision rounding in the conversion math
    pub const ACCURATE_RND: i32 = 0x40000;
}

/// The six tuning scalars the default filter kernel is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub luma_gblur: f32,
    pub chroma_gblur: f32,
    pub luma_sharpen: f32,
    pub chroma_sharpen: f32,
    pub chroma_hshift: f32,
    pub chroma_vshift: f32,
}

/// Which side of the conversion the filter kernel applies to.
///
/// Placement is mutually exclusive: the kernel goes on exactly one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPlacement {
    /// Filter the source picture before conversion
    Source,
    /// Filter the destination picture after conversion
    Destination,
}

/// Everything a conversion context is negotiated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextParams {
    pub src: Resolution,
    /// Layout the capture buffer is reinterpreted as (see
    /// [`PixelFormat::canonical_input`])
    pub src_input: CanonicalInput,
    pub dst: Resolution,
    pub dst_format: PixelFormat,
    /// Algorithm bitmask, [`flags`] vocabulary
    pub flags: i32,
}

/// External conversion library boundary.
///
/// `Filter` and `Context` are opaque handles exclusively owned by one stage
/// instance; their `Drop` implementations release the underlying resources,
/// so every exit path releases exactly what was acquired, including a
/// context build failing after the filter was already built.
pub trait ScaleEngine {
    type Filter;
    type Context;

    /// Build a blur/sharpen filter kernel, `None` if the library rejects
    /// the parameter combination.
    fn build_filter(&self, params: &FilterParams) -> Option<Self::Filter>;

    /// Negotiate a conversion context with the kernel attached on the side
    /// `placement` selects (the other side gets no filter). `None` if the
    /// library cannot satisfy the requested conversion.
    fn build_context(
        &self,
        params: &ContextParams,
        filter: &mut Self::Filter,
        placement: FilterPlacement,
    ) -> Option<Self::Context>;

    /// Convert source rows `[row_offset, row_offset + row_count)` into the
    /// destination picture. Returns the number of destination rows written.
    fn convert(
        &self,
        context: &mut Self::Context,
        src: &PlanePointers,
        row_offset: i32,
        row_count: i32,
        dst: &mut PlanePointersMut,
    ) -> i32;
}
