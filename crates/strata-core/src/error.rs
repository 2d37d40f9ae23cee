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

//! Defines the hierarchy of error types for the layer.
//!
//! Every failure is recovered locally: the offending object is left in a
//! well-defined unusable state and the error returned to the caller.
//! Nothing in this module escalates to process termination.
//!
//! Handle misuse (operating on a destroyed object, or on the registry
//! before init) is a programming error, not a runtime condition: in
//! debug builds those paths also `debug_assert!` so the bug trips at
//! the call site, while release builds keep only the checked returns.

use std::fmt;

/// An error in the shader stage/program lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The operation was invoked on the invalid (zero) handle.
    InvalidHandle,
    /// Source text was required but empty.
    EmptySource,
    /// Compilation was requested before any source was attached.
    NoSource,
    /// Compilation was requested on an already-compiled stage.
    AlreadyCompiled,
    /// A stage must be compiled before it can be attached to a program.
    StageNotCompiled,
    /// The driver rejected the stage source. The stage's driver object
    /// has been released; the failure is terminal.
    CompileFailed {
        /// The compiler's diagnostic text.
        log: String,
    },
    /// The driver rejected program linkage. The program has been deleted
    /// and is unusable.
    LinkFailed {
        /// The linker's diagnostic text.
        log: String,
    },
    /// Link was skipped because an attached stage no longer refers to a
    /// live object. A program is all-or-nothing linkable.
    InvalidStageAttached,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::InvalidHandle => {
                write!(f, "operation on an invalid shader handle")
            }
            ShaderError::EmptySource => write!(f, "shader source text is empty"),
            ShaderError::NoSource => {
                write!(f, "cannot compile a stage with no source attached")
            }
            ShaderError::AlreadyCompiled => {
                write!(f, "stage is already compiled")
            }
            ShaderError::StageNotCompiled => {
                write!(f, "stage must be compiled before it can be attached")
            }
            ShaderError::CompileFailed { log } => {
                write!(f, "shader compilation failed: {log}")
            }
            ShaderError::LinkFailed { log } => {
                write!(f, "program link failed: {log}")
            }
            ShaderError::InvalidStageAttached => {
                write!(f, "link skipped: program has an invalid stage attached")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error in texture creation or binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// The operation was invoked on the invalid (zero) handle.
    InvalidHandle,
    /// Pixel data was required but empty.
    EmptyPixels,
    /// A requested dimension exceeds the driver-reported maximum.
    SizeExceeded {
        /// The offending dimension.
        requested: u32,
        /// The driver's limit per axis.
        max: u32,
    },
    /// The requested unit is outside the driver's combined unit range.
    UnitOutOfRange {
        /// The requested unit.
        unit: u32,
        /// Number of available units.
        max: u32,
    },
    /// The texture is not bound, so it cannot be unbound.
    NotBound,
    /// The texture is still bound to a unit; unbind it before destroying.
    StillBound {
        /// The unit it is bound to.
        unit: u32,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::InvalidHandle => {
                write!(f, "operation on an invalid texture handle")
            }
            TextureError::EmptyPixels => write!(f, "texture pixel data is empty"),
            TextureError::SizeExceeded { requested, max } => {
                write!(
                    f,
                    "texture dimension {requested} exceeds the driver maximum {max}"
                )
            }
            TextureError::UnitOutOfRange { unit, max } => {
                write!(f, "texture unit {unit} out of range (have {max})")
            }
            TextureError::NotBound => {
                write!(f, "texture is not bound to any unit")
            }
            TextureError::StillBound { unit } => {
                write!(f, "texture is still bound to unit {unit}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// An error in vertex buffer/array creation or binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The operation was invoked on the invalid (zero) handle.
    InvalidHandle,
    /// Vertex data was required but empty.
    EmptyData,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidHandle => {
                write!(f, "operation on an invalid buffer or array handle")
            }
            GeometryError::EmptyData => write!(f, "vertex data is empty"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// The top-level error type returned by every layer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The registry was used before [`init`](crate::ResourceRegistry::init).
    NotInitialised,
    /// [`init`](crate::ResourceRegistry::init) was called twice.
    AlreadyInitialised,
    /// The driver reported capabilities this layer cannot work with.
    UnsupportedDriver {
        /// Human-readable reason.
        detail: String,
    },
    /// A shader lifecycle error.
    Shader(ShaderError),
    /// A texture lifecycle or binding error.
    Texture(TextureError),
    /// A vertex data lifecycle error.
    Geometry(GeometryError),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerError::NotInitialised => {
                write!(f, "layer used before init()")
            }
            LayerError::AlreadyInitialised => {
                write!(f, "init() called on an already-initialised layer")
            }
            LayerError::UnsupportedDriver { detail } => {
                write!(f, "unsupported driver: {detail}")
            }
            LayerError::Shader(e) => write!(f, "shader error: {e}"),
            LayerError::Texture(e) => write!(f, "texture error: {e}"),
            LayerError::Geometry(e) => write!(f, "geometry error: {e}"),
        }
    }
}

impl std::error::Error for LayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayerError::Shader(e) => Some(e),
            LayerError::Texture(e) => Some(e),
            LayerError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for LayerError {
    fn from(value: ShaderError) -> Self {
        LayerError::Shader(value)
    }
}

impl From<TextureError> for LayerError {
    fn from(value: TextureError) -> Self {
        LayerError::Texture(value)
    }
}

impl From<GeometryError> for LayerError {
    fn from(value: GeometryError) -> Self {
        LayerError::Geometry(value)
    }
}
