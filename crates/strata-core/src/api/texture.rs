// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Texture targets, pixel formats, texel element types, and the tagged
//! [`Texture`] value type.
//!
//! There is deliberately one `Texture` type parameterized by
//! [`TextureTarget`] rather than one type per dimensionality: lifecycle
//! and bind/unbind behavior are identical for every target.

use super::handle::RawHandle;

/// The binding target (and shape) of a texture object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// One-dimensional texture.
    D1,
    /// Two-dimensional texture.
    D2,
    /// Three-dimensional (volumetric) texture.
    D3,
    /// Array of 1D textures.
    D1Array,
    /// Array of 2D textures.
    D2Array,
    /// Non-normalized-coordinate 2D texture.
    Rectangle,
    /// Six-faced cubemap.
    Cubemap,
    /// Array of cubemaps.
    CubemapArray,
    /// Buffer-backed texture.
    Buffer,
    /// Multisampled 2D texture.
    D2Multisample,
    /// Array of multisampled 2D textures.
    D2MultisampleArray,
}

/// Internal pixel layout of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Three-channel color.
    Rgb,
    /// Three 8-bit channels.
    Rgb8,
    /// Four-channel color.
    Rgba,
    /// Reversed three-channel color.
    Bgr,
    /// Reversed four-channel color.
    Bgra,
    /// Packed 3-3-2 bits per channel.
    R3G3B2,
    /// 5-bit color channels with 1-bit alpha.
    Rgb5A1,
    /// 10-bit color channels with 2-bit alpha.
    Rgb10A2,
    /// Unsigned-integer 10-10-10-2 layout.
    Rgb10A2Ui,
    /// Packed small floats, 11-11-10 bits.
    R11G11B10F,
    /// Shared-exponent RGB.
    Rgb9E5,
    /// Three channels in sRGB color space.
    Srgb8,
    /// sRGB color with linear 8-bit alpha.
    Srgb8Alpha8,
}

/// Texture coordinate wrap behavior outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Coordinates repeat.
    Repeat,
    /// Coordinates repeat, mirrored at integer boundaries.
    MirroredRepeat,
    /// Coordinates clamp to the edge texel.
    ClampToEdge,
    /// Coordinates outside the range sample the border color.
    ClampToBorder,
}

/// The texture coordinate axis a wrap mode applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapAxis {
    /// Horizontal axis.
    S,
    /// Vertical axis.
    T,
    /// Depth axis.
    R,
}

/// Sampling filter, including mipmap-combined variants for minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Weighted average of neighboring texels.
    Linear,
    /// Nearest texel of the nearest mip level.
    NearestMipmapNearest,
    /// Nearest texel, interpolated between mip levels.
    NearestMipmapLinear,
    /// Linear within the nearest mip level.
    LinearMipmapNearest,
    /// Linear within and between mip levels (trilinear).
    LinearMipmapLinear,
}

/// Whether a filter applies to minification or magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Sampling footprint larger than one texel.
    Minify,
    /// Sampling footprint smaller than one texel.
    Magnify,
}

/// One face of a cubemap, in upload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubemapFace {
    /// +X face.
    PositiveX,
    /// −X face.
    NegativeX,
    /// +Y face.
    PositiveY,
    /// −Y face.
    NegativeY,
    /// +Z face.
    PositiveZ,
    /// −Z face.
    NegativeZ,
}

impl CubemapFace {
    /// All six faces in native upload order (+X −X +Y −Y +Z −Z).
    pub const ALL: [CubemapFace; 6] = [
        CubemapFace::PositiveX,
        CubemapFace::NegativeX,
        CubemapFace::PositiveY,
        CubemapFace::NegativeY,
        CubemapFace::PositiveZ,
        CubemapFace::NegativeZ,
    ];

    /// Zero-based index of this face within [`CubemapFace::ALL`].
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            CubemapFace::PositiveX => 0,
            CubemapFace::NegativeX => 1,
            CubemapFace::PositiveY => 2,
            CubemapFace::NegativeY => 3,
            CubemapFace::PositiveZ => 4,
            CubemapFace::NegativeZ => 5,
        }
    }
}

/// The semantic element type of an uploaded pixel slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelKind {
    /// 32-bit signed integer elements.
    I32,
    /// 32-bit float elements.
    F32,
    /// 64-bit float elements.
    F64,
    /// 16-bit signed integer elements.
    I16,
    /// Unsigned byte elements.
    U8,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i16 {}
    impl Sealed for u8 {}
}

/// Element types accepted as texture pixel data.
///
/// Sealed: exactly `i32`, `f32`, `f64`, `i16`, and `u8` implement it, so
/// passing any other element type to a texture constructor is a compile
/// error rather than a runtime check.
pub trait Texel: sealed::Sealed + bytemuck::Pod {
    /// The driver-facing element tag for this type.
    const KIND: TexelKind;
}

impl Texel for i32 {
    const KIND: TexelKind = TexelKind::I32;
}
impl Texel for f32 {
    const KIND: TexelKind = TexelKind::F32;
}
impl Texel for f64 {
    const KIND: TexelKind = TexelKind::F64;
}
impl Texel for i16 {
    const KIND: TexelKind = TexelKind::I16;
}
impl Texel for u8 {
    const KIND: TexelKind = TexelKind::U8;
}

/// A texture object: handle, target tag, dimensions, and bind state.
///
/// Pixel data is uploaded once at creation. The `bound_unit` mirror is
/// maintained by [`BindingCache::bind_texture`](crate::BindingCache::bind_texture)
/// and its unbind counterpart; `None` is the "not bound" sentinel.
#[derive(Debug, Clone)]
pub struct Texture {
    pub(crate) handle: RawHandle,
    pub(crate) target: TextureTarget,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) depth: u32,
    pub(crate) format: PixelFormat,
    pub(crate) bound_unit: Option<u32>,
}

impl Texture {
    pub(crate) fn new(
        handle: RawHandle,
        target: TextureTarget,
        width: u32,
        height: u32,
        depth: u32,
        format: PixelFormat,
    ) -> Self {
        Self {
            handle,
            target,
            width,
            height,
            depth,
            format,
            bound_unit: None,
        }
    }

    /// The driver handle, or [`RawHandle::INVALID`] after destruction.
    #[inline]
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// The binding target this texture was created for.
    #[inline]
    pub fn target(&self) -> TextureTarget {
        self.target
    }

    /// Width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels; `1` for 1D textures.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth in texels, or layer count for array targets; `1` otherwise.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The internal pixel layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The unit this texture is currently bound to, if any.
    #[inline]
    pub fn bound_unit(&self) -> Option<u32> {
        self.bound_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texel_kinds_match_their_types() {
        assert_eq!(<i32 as Texel>::KIND, TexelKind::I32);
        assert_eq!(<f32 as Texel>::KIND, TexelKind::F32);
        assert_eq!(<f64 as Texel>::KIND, TexelKind::F64);
        assert_eq!(<i16 as Texel>::KIND, TexelKind::I16);
        assert_eq!(<u8 as Texel>::KIND, TexelKind::U8);
    }

    #[test]
    fn new_texture_is_unbound() {
        let tex = Texture::new(RawHandle(4), TextureTarget::D2, 8, 8, 1, PixelFormat::Rgba);
        assert_eq!(tex.bound_unit(), None);
        assert_eq!(tex.target(), TextureTarget::D2);
        assert_eq!((tex.width(), tex.height(), tex.depth()), (8, 8, 1));
    }

    #[test]
    fn cubemap_faces_are_in_upload_order() {
        for (i, face) in CubemapFace::ALL.iter().enumerate() {
            assert_eq!(face.index() as usize, i);
        }
    }
}
