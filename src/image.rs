//! Image buffer views shared with the surrounding pipeline
//!
//! The pipeline owns all frame storage; this stage only borrows it for the
//! extent of one call. [`SourceImage`] is the fixed-layout captured frame,
//! [`DestImage`] the write target, and the `PlanePointers` pair is the raw
//! pointer/stride form handed across the conversion-library boundary.

use std::fmt;

use crate::format::{PixelFormat, Resolution};

/// Maximum number of planes a destination layout can carry
pub const MAX_PLANES: usize = 4;

/// Negotiated geometry and format of one conversion endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDesc {
    pub resolution: Resolution,
    pub format: PixelFormat,
}

impl ImageDesc {
    pub fn new(resolution: Resolution, format: PixelFormat) -> Self {
        Self { resolution, format }
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }
}

impl fmt::Display for ImageDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resolution, self.format)
    }
}

/// Read-only view of one captured frame (packed single plane)
pub struct SourceImage<'a> {
    desc: ImageDesc,
    data: &'a [u8],
    stride: i32,
}

impl<'a> SourceImage<'a> {
    /// Wrap a pipeline-owned capture buffer.
    ///
    /// `stride` is in bytes and must cover `height` rows of `data`.
    pub fn new(desc: ImageDesc, data: &'a [u8], stride: i32) -> Self {
        assert!(stride > 0, "source stride must be positive");
        assert!(
            data.len() >= stride as usize * desc.height() as usize,
            "source buffer too small for {}",
            desc
        );
        Self { desc, data, stride }
    }

    pub fn desc(&self) -> ImageDesc {
        self.desc
    }

    pub fn width(&self) -> u32 {
        self.desc.width()
    }

    pub fn height(&self) -> u32 {
        self.desc.height()
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Pointer/stride form for the converter boundary
    pub fn plane_pointers(&self) -> PlanePointers {
        let mut planes = PlanePointers::empty();
        planes.data[0] = self.data.as_ptr();
        planes.stride[0] = self.stride;
        planes
    }
}

/// Write-target view of one destination frame (up to [`MAX_PLANES`] planes)
pub struct DestImage<'a> {
    desc: ImageDesc,
    planes: [Option<&'a mut [u8]>; MAX_PLANES],
    strides: [i32; MAX_PLANES],
    plane_count: usize,
}

impl<'a> DestImage<'a> {
    pub fn new(desc: ImageDesc) -> Self {
        Self {
            desc,
            planes: [None, None, None, None],
            strides: [0; MAX_PLANES],
            plane_count: 0,
        }
    }

    /// Single-plane convenience constructor for packed destination layouts
    pub fn packed(desc: ImageDesc, data: &'a mut [u8], stride: i32) -> Self {
        let mut image = Self::new(desc);
        image.push_plane(data, stride);
        image
    }

    /// Attach the next plane buffer; planes are passed to the converter in
    /// attachment order.
    pub fn push_plane(&mut self, data: &'a mut [u8], stride: i32) {
        assert!(
            self.plane_count < MAX_PLANES,
            "destination carries at most {} planes",
            MAX_PLANES
        );
        self.planes[self.plane_count] = Some(data);
        self.strides[self.plane_count] = stride;
        self.plane_count += 1;
    }

    pub fn desc(&self) -> ImageDesc {
        self.desc
    }

    pub fn width(&self) -> u32 {
        self.desc.width()
    }

    pub fn height(&self) -> u32 {
        self.desc.height()
    }

    pub fn plane_count(&self) -> usize {
        self.plane_count
    }

    /// Read back an attached plane
    pub fn plane(&self, index: usize) -> Option<&[u8]> {
        self.planes.get(index).and_then(|p| p.as_deref())
    }

    /// Pointer/stride form for the converter boundary
    pub fn plane_pointers_mut(&mut self) -> PlanePointersMut {
        let mut planes = PlanePointersMut::empty();
        for (index, plane) in self.planes.iter_mut().enumerate() {
            if let Some(data) = plane {
                planes.data[index] = data.as_mut_ptr();
                planes.stride[index] = self.strides[index];
            }
        }
        planes
    }
}

/// Plane base pointers and strides of a read-only picture
#[derive(Debug, Clone, Copy)]
pub struct PlanePointers {
    pub data: [*const u8; MAX_PLANES],
    pub stride: [i32; MAX_PLANES],
}

impl PlanePointers {
    pub const fn empty() -> Self {
        Self {
            data: [std::ptr::null(); MAX_PLANES],
            stride: [0; MAX_PLANES],
        }
    }
}

impl Default for PlanePointers {
    fn default() -> Self {
        Self::empty()
    }
}

/// Plane base pointers and strides of a write-target picture
#[derive(Debug, Clone, Copy)]
pub struct PlanePointersMut {
    pub data: [*mut u8; MAX_PLANES],
    pub stride: [i32; MAX_PLANES],
}

impl PlanePointersMut {
    pub const fn empty() -> Self {
        Self {
            data: [std::ptr::null_mut(); MAX_PLANES],
            stride: [0; MAX_PLANES],
        }
    }
}

impl Default for PlanePointersMut {
    fn default() -> Self {
        Self::empty()
    }
}
