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

//! Draw command snapshots consumed by the [`DrawQueue`](crate::DrawQueue).
//!
//! A command records handles, not references: resources stay owned by
//! the caller, and processing happens later through the binding cache.

use super::handle::RawHandle;
use super::shader::ShaderProgram;
use super::texture::{Texture, TextureTarget};
use super::vertex::VertexArray;
use crate::error::{GeometryError, LayerError, ShaderError, TextureError};

/// The primitive topology of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Individual points.
    Points,
    /// Individual line segments.
    Lines,
    /// Connected line segments.
    LineStrip,
    /// Individual triangles.
    Triangles,
    /// Connected triangle strip.
    TriangleStrip,
    /// Triangles fanning from the first vertex.
    TriangleFan,
}

/// The texture slot a draw command wants populated before it is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBinding {
    /// The unit to bind into.
    pub unit: u32,
    /// The texture's binding target.
    pub target: TextureTarget,
    /// The texture handle.
    pub handle: RawHandle,
}

/// One pending draw request.
///
/// Construction snapshots the handles of live resources and rejects
/// invalid ones, so a queued command cannot silently reference a
/// destroyed-then-recreated object through the zero sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub(crate) program: RawHandle,
    pub(crate) texture: Option<TextureBinding>,
    pub(crate) vertex_array: RawHandle,
    pub(crate) primitive: PrimitiveKind,
    pub(crate) vertex_count: u32,
    pub(crate) wireframe: bool,
}

impl DrawCommand {
    /// Builds a command referencing the given resources.
    ///
    /// `texture` optionally names the unit a texture should be bound to
    /// when the command is processed.
    ///
    /// # Errors
    ///
    /// Fails if the program, vertex array, or texture handle is the
    /// invalid sentinel.
    pub fn new(
        program: &ShaderProgram,
        texture: Option<(u32, &Texture)>,
        vertex_array: &VertexArray,
        primitive: PrimitiveKind,
        vertex_count: u32,
        wireframe: bool,
    ) -> Result<Self, LayerError> {
        debug_assert!(program.handle().is_valid(), "shader program used after destroy");
        if !program.handle().is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        debug_assert!(
            vertex_array.handle().is_valid(),
            "vertex array used after destroy"
        );
        if !vertex_array.handle().is_valid() {
            return Err(GeometryError::InvalidHandle.into());
        }
        let texture = match texture {
            Some((unit, tex)) => {
                debug_assert!(tex.handle().is_valid(), "texture used after destroy");
                if !tex.handle().is_valid() {
                    return Err(TextureError::InvalidHandle.into());
                }
                Some(TextureBinding {
                    unit,
                    target: tex.target(),
                    handle: tex.handle(),
                })
            }
            None => None,
        };
        Ok(Self {
            program: program.handle(),
            texture,
            vertex_array: vertex_array.handle(),
            primitive,
            vertex_count,
            wireframe,
        })
    }

    /// The program handle this command draws with.
    #[inline]
    pub fn program(&self) -> RawHandle {
        self.program
    }

    /// The texture binding this command wants, if any.
    #[inline]
    pub fn texture(&self) -> Option<TextureBinding> {
        self.texture
    }

    /// The texture handle, or [`RawHandle::INVALID`] for untextured
    /// commands. Convenient as a sort key.
    #[inline]
    pub fn texture_handle(&self) -> RawHandle {
        self.texture.map_or(RawHandle::INVALID, |t| t.handle)
    }

    /// The vertex array handle this command draws from.
    #[inline]
    pub fn vertex_array(&self) -> RawHandle {
        self.vertex_array
    }

    /// The primitive topology.
    #[inline]
    pub fn primitive(&self) -> PrimitiveKind {
        self.primitive
    }

    /// Number of vertices to draw.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// `true` if the command draws outlines instead of filled polygons.
    #[inline]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayerError;

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "used after destroy"))]
    fn command_rejects_a_destroyed_program() {
        let program = ShaderProgram::new(RawHandle::INVALID);
        let array = VertexArray::new(RawHandle(2));
        let err = DrawCommand::new(&program, None, &array, PrimitiveKind::Triangles, 3, false)
            .unwrap_err();
        assert!(matches!(err, LayerError::Shader(ShaderError::InvalidHandle)));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "used after destroy"))]
    fn command_rejects_a_destroyed_vertex_array() {
        let program = ShaderProgram::new(RawHandle(1));
        let dead_array = VertexArray::new(RawHandle::INVALID);
        let err = DrawCommand::new(
            &program,
            None,
            &dead_array,
            PrimitiveKind::Triangles,
            3,
            false,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LayerError::Geometry(GeometryError::InvalidHandle)
        ));
    }

    #[test]
    fn command_snapshots_texture_binding() {
        let program = ShaderProgram::new(RawHandle(1));
        let array = VertexArray::new(RawHandle(2));
        let tex = Texture::new(
            RawHandle(3),
            TextureTarget::D2,
            4,
            4,
            1,
            super::super::texture::PixelFormat::Rgba,
        );
        let cmd = DrawCommand::new(
            &program,
            Some((5, &tex)),
            &array,
            PrimitiveKind::Triangles,
            6,
            true,
        )
        .unwrap();
        assert_eq!(
            cmd.texture(),
            Some(TextureBinding {
                unit: 5,
                target: TextureTarget::D2,
                handle: RawHandle(3),
            })
        );
        assert_eq!(cmd.texture_handle(), RawHandle(3));
        assert!(cmd.wireframe());
    }
}
