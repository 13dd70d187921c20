//! Pixel format definitions and the canonical-input mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed canonical layout of captured frames.
///
/// The upstream capture stage always hands this stage packed 32-bit RGBX
/// frames; every conversion is negotiated from this layout.
pub const CAPTURE_FORMAT: PixelFormat = PixelFormat::Rgb0;

/// Destination pixel formats supported by the conversion stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PixelFormat {
    /// 32-bit packed RGB with padding byte (RGBX)
    Rgb0,
    /// 24-bit packed RGB
    Rgb24,
    /// 16-bit RGB, 5:5:5
    Rgb555,
    /// 16-bit RGB, 5:6:5
    Rgb565,
    /// 8-bit palettized RGB
    Rgb8,
    /// YUV 4:2:0 planar (IYUV ordering)
    Iyuv,
    /// YUV 4:2:0 planar
    I420,
    /// YUV 4:2:2 packed, Y0 U Y1 V
    Yuy2,
    /// YUV 4:2:2 packed, U Y0 V Y1
    Uyvy,
    /// YUV 4:2:0 planar, V plane before U
    Yv12,
    /// YUV 4:2:2 packed, Y0 V Y1 U
    Yvyu,
    /// YUV 4:1:0 planar, V plane before U
    Yvu9,
}

/// The two destination-format partitions driving orientation correction
/// and channel-swap behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Yuv,
    Rgb,
}

/// Layout the fixed capture buffer is reinterpreted as before conversion
///
/// `Bgrx` is the same bytes as `Rgbx` read with red and blue swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalInput {
    Rgbx,
    Bgrx,
}

impl PixelFormat {
    /// Which family this destination format belongs to
    pub const fn family(self) -> FormatFamily {
        match self {
            PixelFormat::Iyuv
            | PixelFormat::I420
            | PixelFormat::Yuy2
            | PixelFormat::Uyvy
            | PixelFormat::Yv12
            | PixelFormat::Yvyu
            | PixelFormat::Yvu9 => FormatFamily::Yuv,
            PixelFormat::Rgb24
            | PixelFormat::Rgb0
            | PixelFormat::Rgb555
            | PixelFormat::Rgb565
            | PixelFormat::Rgb8 => FormatFamily::Rgb,
        }
    }

    /// Canonical input layout required for a correct conversion to `self`.
    ///
    /// One row per format; the match is checked for completeness at compile
    /// time, so adding a format is a single edit here.
    pub const fn canonical_input(self) -> CanonicalInput {
        match self {
            // The converter's RGB->YUV math assumes the opposite channel
            // order from the capture layout; reading the source as BGRX
            // compensates.
            PixelFormat::Iyuv
            | PixelFormat::I420
            | PixelFormat::Yuy2
            | PixelFormat::Uyvy
            | PixelFormat::Yv12
            | PixelFormat::Yvyu
            | PixelFormat::Yvu9 => CanonicalInput::Bgrx,
            // RGB555/RGB565 output has R and B swapped unless the source is
            // read as BGRX. Root cause never diagnosed; kept as-is for
            // compatibility with existing consumers.
            PixelFormat::Rgb555 | PixelFormat::Rgb565 => CanonicalInput::Bgrx,
            PixelFormat::Rgb24 | PixelFormat::Rgb0 | PixelFormat::Rgb8 => CanonicalInput::Rgbx,
        }
    }

    /// Nominal bits per pixel of the destination layout
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgb0 => 32,
            PixelFormat::Rgb24 => 24,
            PixelFormat::Rgb555 | PixelFormat::Rgb565 => 16,
            PixelFormat::Rgb8 => 8,
            PixelFormat::Iyuv | PixelFormat::I420 | PixelFormat::Yv12 => 12,
            PixelFormat::Yuy2 | PixelFormat::Uyvy | PixelFormat::Yvyu => 16,
            PixelFormat::Yvu9 => 9,
        }
    }

    /// Get all supported formats
    pub fn all() -> &'static [PixelFormat] {
        &[
            PixelFormat::Rgb0,
            PixelFormat::Rgb24,
            PixelFormat::Rgb555,
            PixelFormat::Rgb565,
            PixelFormat::Rgb8,
            PixelFormat::Iyuv,
            PixelFormat::I420,
            PixelFormat::Yuy2,
            PixelFormat::Uyvy,
            PixelFormat::Yv12,
            PixelFormat::Yvyu,
            PixelFormat::Yvu9,
        ]
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Rgb0 => "RGB0",
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Rgb555 => "RGB555",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Rgb8 => "RGB8",
            PixelFormat::Iyuv => "IYUV",
            PixelFormat::I420 => "I420",
            PixelFormat::Yuy2 => "YUY2",
            PixelFormat::Uyvy => "UYVY",
            PixelFormat::Yv12 => "YV12",
            PixelFormat::Yvyu => "YVYU",
            PixelFormat::Yvu9 => "YVU9",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for PixelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RGB0" | "RGB32" => Ok(PixelFormat::Rgb0),
            "RGB24" => Ok(PixelFormat::Rgb24),
            "RGB555" => Ok(PixelFormat::Rgb555),
            "RGB565" => Ok(PixelFormat::Rgb565),
            "RGB8" => Ok(PixelFormat::Rgb8),
            "IYUV" => Ok(PixelFormat::Iyuv),
            "I420" => Ok(PixelFormat::I420),
            "YUY2" => Ok(PixelFormat::Yuy2),
            "UYVY" => Ok(PixelFormat::Uyvy),
            "YV12" => Ok(PixelFormat::Yv12),
            "YVYU" => Ok(PixelFormat::Yvyu),
            "YVU9" => Ok(PixelFormat::Yvu9),
            _ => Err(format!("Unknown pixel format: {}", s)),
        }
    }
}

/// Resolution (width x height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if resolution is usable as a conversion endpoint
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.width <= 15360 && self.height <= 8640
    }

    /// Get total pixels
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Common resolutions
    pub const VGA: Resolution = Resolution {
        width: 640,
        height: 480,
    };
    pub const HD720: Resolution = Resolution {
        width: 1280,
        height: 720,
    };
    pub const HD1080: Resolution = Resolution {
        width: 1920,
        height: 1080,
    };
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Resolution {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}
