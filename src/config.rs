//! Stage configuration

use serde::{Deserialize, Serialize};

use crate::engine::{flags, FilterParams, FilterPlacement};

/// Conversion stage configuration, fixed at construction.
///
/// The six scalars feed the default blur/sharpen filter kernel;
/// `is_src_filter` selects which side of the conversion the kernel applies
/// to; `flags` carries the algorithm bitmask ([`flags`] vocabulary) and
/// `accurate_rnd` folds the higher-precision rounding bit in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Luma-plane Gaussian blur strength
    pub luma_gblur: f32,
    /// Chroma-plane Gaussian blur strength
    pub chroma_gblur: f32,
    /// Luma-plane sharpen strength
    pub luma_sharpen: f32,
    /// Chroma-plane sharpen strength
    pub chroma_sharpen: f32,
    /// Chroma horizontal phase shift
    pub chroma_hshift: f32,
    /// Chroma vertical phase shift
    pub chroma_vshift: f32,
    /// Apply the filter kernel before conversion (after when false)
    pub is_src_filter: bool,
    /// Algorithm selection bitmask
    pub flags: i32,
    /// Enable higher-precision rounding in the conversion math
    pub accurate_rnd: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            luma_gblur: 0.0,
            chroma_gblur: 0.0,
            luma_sharpen: 0.0,
            chroma_sharpen: 0.0,
            chroma_hshift: 0.0,
            chroma_vshift: 0.0,
            is_src_filter: true,
            flags: flags::FAST_BILINEAR,
            accurate_rnd: false,
        }
    }
}

impl ScaleConfig {
    /// Filter kernel inputs
    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            luma_gblur: self.luma_gblur,
            chroma_gblur: self.chroma_gblur,
            luma_sharpen: self.luma_sharpen,
            chroma_sharpen: self.chroma_sharpen,
            chroma_hshift: self.chroma_hshift,
            chroma_vshift: self.chroma_vshift,
        }
    }

    /// Which side of the conversion the kernel applies to
    pub fn filter_placement(&self) -> FilterPlacement {
        if self.is_src_filter {
            FilterPlacement::Source
        } else {
            FilterPlacement::Destination
        }
    }

    /// Algorithm bitmask with the rounding bit folded in
    pub fn effective_flags(&self) -> i32 {
        let mut bits = self.flags;
        if self.accurate_rnd {
            bits |= flags::ACCURATE_RND;
        }
        bits
    }
}
