//! libswscale-backed conversion engine

use std::ptr::{self, NonNull};

use ffmpeg_sys_next as ffi;

use crate::engine::{ContextParams, FilterParams, FilterPlacement, ScaleEngine};
use crate::format::{CanonicalInput, PixelFormat};
use crate::image::{PlanePointers, PlanePointersMut};

/// Stateless entry point to libswscale; all per-conversion state lives in
/// the handles it builds.
#[derive(Debug, Default)]
pub struct SwsEngine;

impl SwsEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Owned `SwsFilter` handle, freed exactly once on drop
pub struct SwsFilterKernel {
    ptr: NonNull<ffi::SwsFilter>,
}

impl Drop for SwsFilterKernel {
    fn drop(&mut self) {
        unsafe { ffi::sws_freeFilter(self.ptr.as_ptr()) }
    }
}

// The handle is exclusively owned and never aliased.
unsafe impl Send for SwsFilterKernel {}

/// Owned `SwsContext` handle, freed exactly once on drop
pub struct SwsConversionContext {
    ptr: NonNull<ffi::SwsContext>,
}

impl Drop for SwsConversionContext {
    fn drop(&mut self) {
        unsafe { ffi::sws_freeContext(self.ptr.as_ptr()) }
    }
}

unsafe impl Send for SwsConversionContext {}

impl ScaleEngine for SwsEngine {
    type Filter = SwsFilterKernel;
    type Context = SwsConversionContext;

    fn build_filter(&self, params: &FilterParams) -> Option<SwsFilterKernel> {
        let ptr = unsafe {
            ffi::sws_getDefaultFilter(
                params.luma_gblur,
                params.chroma_gblur,
                params.luma_sharpen,
                params.chroma_sharpen,
                params.chroma_hshift,
                params.chroma_vshift,
                0,
            )
        };
        NonNull::new(ptr).map(|ptr| SwsFilterKernel { ptr })
    }

    fn build_context(
        &self,
        params: &ContextParams,
        filter: &mut SwsFilterKernel,
        placement: FilterPlacement,
    ) -> Option<SwsConversionContext> {
        let (src_filter, dst_filter) = match placement {
            FilterPlacement::Source => (filter.ptr.as_ptr(), ptr::null_mut()),
            FilterPlacement::Destination => (ptr::null_mut(), filter.ptr.as_ptr()),
        };
        let ptr = unsafe {
            ffi::sws_getContext(
                params.src.width as i32,
                params.src.height as i32,
                av_input_format(params.src_input),
                params.dst.width as i32,
                params.dst.height as i32,
                av_pixel_format(params.dst_format),
                params.flags,
                src_filter,
                dst_filter,
                ptr::null(),
            )
        };
        NonNull::new(ptr).map(|ptr| SwsConversionContext { ptr })
    }

    fn convert(
        &self,
        context: &mut SwsConversionContext,
        src: &PlanePointers,
        row_offset: i32,
        row_count: i32,
        dst: &mut PlanePointersMut,
    ) -> i32 {
        unsafe {
            ffi::sws_scale(
                context.ptr.as_ptr(),
                src.data.as_ptr(),
                src.stride.as_ptr(),
                row_offset,
                row_count,
                dst.data.as_ptr(),
                dst.stride.as_ptr(),
            )
        }
    }
}

fn av_input_format(input: CanonicalInput) -> ffi::AVPixelFormat {
    match input {
        CanonicalInput::Rgbx => ffi::AVPixelFormat::AV_PIX_FMT_RGB0,
        CanonicalInput::Bgrx => ffi::AVPixelFormat::AV_PIX_FMT_BGR0,
    }
}

/// Destination format as libswscale knows it.
///
/// V-before-U planar layouts (YV12, YVU9) use the converter's U-first
/// pixel format; the plane order difference is expressed by the pipeline
/// attaching the destination's V plane buffer in the U slot and vice versa.
fn av_pixel_format(format: PixelFormat) -> ffi::AVPixelFormat {
    use ffi::AVPixelFormat::*;
    match format {
        PixelFormat::Rgb0 => AV_PIX_FMT_RGB0,
        PixelFormat::Rgb24 => AV_PIX_FMT_RGB24,
        PixelFormat::Rgb555 => AV_PIX_FMT_RGB555LE,
        PixelFormat::Rgb565 => AV_PIX_FMT_RGB565LE,
        PixelFormat::Rgb8 => AV_PIX_FMT_RGB8,
        PixelFormat::Iyuv | PixelFormat::I420 | PixelFormat::Yv12 => AV_PIX_FMT_YUV420P,
        PixelFormat::Yuy2 => AV_PIX_FMT_YUYV422,
        PixelFormat::Uyvy => AV_PIX_FMT_UYVY422,
        PixelFormat::Yvyu => AV_PIX_FMT_YVYU422,
        PixelFormat::Yvu9 => AV_PIX_FMT_YUV410P,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_input_mapping() {
        assert_eq!(
            av_input_format(CanonicalInput::Rgbx),
            ffi::AVPixelFormat::AV_PIX_FMT_RGB0
        );
        assert_eq!(
            av_input_format(CanonicalInput::Bgrx),
            ffi::AVPixelFormat::AV_PIX_FMT_BGR0
        );
    }

    #[test]
    fn test_planar_yuv_shares_backend_format() {
        assert_eq!(
            av_pixel_format(PixelFormat::I420),
            av_pixel_format(PixelFormat::Yv12)
        );
        assert_eq!(
            av_pixel_format(PixelFormat::Yvu9),
            ffi::AVPixelFormat::AV_PIX_FMT_YUV410P
        );
    }
}
