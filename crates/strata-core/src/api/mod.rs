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

//! Backend-agnostic data model of the layer.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`handle`]**: The opaque driver-assigned object handle.
//! - **[`caps`]**: Capabilities reported by the driver at init time.
//! - **[`shader`]**: Shader stage and program value types.
//! - **[`texture`]**: Texture targets, formats, texel types, and the
//!   tagged texture value type.
//! - **[`vertex`]**: Vertex buffer/array value types.
//! - **[`draw`]**: Draw command snapshots consumed by the queue.

pub mod caps;
pub mod draw;
pub mod handle;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use caps::DriverCaps;
pub use draw::{DrawCommand, PrimitiveKind, TextureBinding};
pub use handle::RawHandle;
pub use shader::{ShaderProgram, ShaderStage, ShaderStageKind};
pub use texture::{
    CubemapFace, FilterKind, FilterMode, PixelFormat, Texel, TexelKind, Texture, TextureTarget,
    WrapAxis, WrapMode,
};
pub use vertex::{BufferKind, DrawUsage, VertexArray, VertexBuffer};
