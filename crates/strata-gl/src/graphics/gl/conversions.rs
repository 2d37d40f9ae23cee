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

//! Conversions from `strata-core` enums to native GL constants.

use gl::types::{GLenum, GLint};
use strata_core::{
    BufferKind, CubemapFace, DrawUsage, DriverErrorCode, FilterKind, FilterMode, PixelFormat,
    PrimitiveKind, ShaderStageKind, TexelKind, TextureTarget, WrapAxis, WrapMode,
};

/// Converts a `strata-core` enum into its native GL constant.
pub(crate) trait IntoGl {
    /// The native representation.
    type GlType;

    /// Performs the conversion.
    fn into_gl(self) -> Self::GlType;
}

impl IntoGl for TextureTarget {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            TextureTarget::D1 => gl::TEXTURE_1D,
            TextureTarget::D2 => gl::TEXTURE_2D,
            TextureTarget::D3 => gl::TEXTURE_3D,
            TextureTarget::D1Array => gl::TEXTURE_1D_ARRAY,
            TextureTarget::D2Array => gl::TEXTURE_2D_ARRAY,
            TextureTarget::Rectangle => gl::TEXTURE_RECTANGLE,
            TextureTarget::Cubemap => gl::TEXTURE_CUBE_MAP,
            TextureTarget::CubemapArray => gl::TEXTURE_CUBE_MAP_ARRAY,
            TextureTarget::Buffer => gl::TEXTURE_BUFFER,
            TextureTarget::D2Multisample => gl::TEXTURE_2D_MULTISAMPLE,
            TextureTarget::D2MultisampleArray => gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
        }
    }
}

impl IntoGl for CubemapFace {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        gl::TEXTURE_CUBE_MAP_POSITIVE_X + self.index()
    }
}

/// The two halves of a GL pixel format: the internal (storage) format
/// and the external (client data) format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlPixelFormat {
    pub internal: GLint,
    pub external: GLenum,
}

impl IntoGl for PixelFormat {
    type GlType = GlPixelFormat;

    fn into_gl(self) -> GlPixelFormat {
        let (internal, external) = match self {
            PixelFormat::Rgb => (gl::RGB, gl::RGB),
            PixelFormat::Rgb8 => (gl::RGB8, gl::RGB),
            PixelFormat::Rgba => (gl::RGBA, gl::RGBA),
            PixelFormat::Bgr => (gl::RGB8, gl::BGR),
            PixelFormat::Bgra => (gl::RGBA8, gl::BGRA),
            PixelFormat::R3G3B2 => (gl::R3_G3_B2, gl::RGB),
            PixelFormat::Rgb5A1 => (gl::RGB5_A1, gl::RGBA),
            PixelFormat::Rgb10A2 => (gl::RGB10_A2, gl::RGBA),
            PixelFormat::Rgb10A2Ui => (gl::RGB10_A2UI, gl::RGBA_INTEGER),
            PixelFormat::R11G11B10F => (gl::R11F_G11F_B10F, gl::RGB),
            PixelFormat::Rgb9E5 => (gl::RGB9_E5, gl::RGB),
            PixelFormat::Srgb8 => (gl::SRGB8, gl::RGB),
            PixelFormat::Srgb8Alpha8 => (gl::SRGB8_ALPHA8, gl::RGBA),
        };
        GlPixelFormat {
            internal: internal as GLint,
            external,
        }
    }
}

impl IntoGl for TexelKind {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            TexelKind::I32 => gl::INT,
            TexelKind::F32 => gl::FLOAT,
            TexelKind::F64 => gl::DOUBLE,
            TexelKind::I16 => gl::SHORT,
            TexelKind::U8 => gl::UNSIGNED_BYTE,
        }
    }
}

impl IntoGl for WrapAxis {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            WrapAxis::S => gl::TEXTURE_WRAP_S,
            WrapAxis::T => gl::TEXTURE_WRAP_T,
            WrapAxis::R => gl::TEXTURE_WRAP_R,
        }
    }
}

impl IntoGl for WrapMode {
    type GlType = GLint;

    fn into_gl(self) -> GLint {
        let mode = match self {
            WrapMode::Repeat => gl::REPEAT,
            WrapMode::MirroredRepeat => gl::MIRRORED_REPEAT,
            WrapMode::ClampToEdge => gl::CLAMP_TO_EDGE,
            WrapMode::ClampToBorder => gl::CLAMP_TO_BORDER,
        };
        mode as GLint
    }
}

impl IntoGl for FilterKind {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            FilterKind::Minify => gl::TEXTURE_MIN_FILTER,
            FilterKind::Magnify => gl::TEXTURE_MAG_FILTER,
        }
    }
}

impl IntoGl for FilterMode {
    type GlType = GLint;

    fn into_gl(self) -> GLint {
        let mode = match self {
            FilterMode::Nearest => gl::NEAREST,
            FilterMode::Linear => gl::LINEAR,
            FilterMode::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
            FilterMode::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
            FilterMode::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
            FilterMode::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        };
        mode as GLint
    }
}

impl IntoGl for ShaderStageKind {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            ShaderStageKind::Vertex => gl::VERTEX_SHADER,
            ShaderStageKind::Fragment => gl::FRAGMENT_SHADER,
            ShaderStageKind::Geometry => gl::GEOMETRY_SHADER,
            ShaderStageKind::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderStageKind::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderStageKind::Compute => gl::COMPUTE_SHADER,
        }
    }
}

impl IntoGl for BufferKind {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            BufferKind::Array => gl::ARRAY_BUFFER,
            BufferKind::Element => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl IntoGl for DrawUsage {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            DrawUsage::Static => gl::STATIC_DRAW,
            DrawUsage::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

impl IntoGl for PrimitiveKind {
    type GlType = GLenum;

    fn into_gl(self) -> GLenum {
        match self {
            PrimitiveKind::Points => gl::POINTS,
            PrimitiveKind::Lines => gl::LINES,
            PrimitiveKind::LineStrip => gl::LINE_STRIP,
            PrimitiveKind::Triangles => gl::TRIANGLES,
            PrimitiveKind::TriangleStrip => gl::TRIANGLE_STRIP,
            PrimitiveKind::TriangleFan => gl::TRIANGLE_FAN,
        }
    }
}

/// Maps a native error code into the layer's error taxonomy. `NO_ERROR`
/// must be filtered out before calling.
pub(crate) fn error_from_native(code: GLenum) -> DriverErrorCode {
    match code {
        gl::INVALID_OPERATION => DriverErrorCode::InvalidOperation,
        gl::INVALID_ENUM => DriverErrorCode::InvalidEnum,
        gl::INVALID_VALUE => DriverErrorCode::InvalidValue,
        gl::OUT_OF_MEMORY => DriverErrorCode::OutOfMemory,
        gl::INVALID_FRAMEBUFFER_OPERATION => DriverErrorCode::InvalidFramebufferOperation,
        other => DriverErrorCode::Unknown(other),
    }
}
