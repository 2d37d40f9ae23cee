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

use crate::api::{
    BufferKind, CubemapFace, DrawUsage, DriverCaps, FilterKind, FilterMode, PixelFormat,
    PrimitiveKind, RawHandle, ShaderStageKind, TexelKind, TextureTarget, WrapAxis, WrapMode,
};
use crate::diag::DriverErrorCode;
use std::fmt::Debug;

/// The opaque native-API capability everything in this crate calls into.
///
/// Each method is a direct, synchronous projection of one driver entry
/// point. Implementations perform no validation, no state shadowing, and
/// no error translation beyond what [`poll_error`](GlDriver::poll_error)
/// exposes; all of that is the job of the
/// [`ResourceRegistry`](crate::ResourceRegistry) and
/// [`BindingCache`](crate::BindingCache) driving this trait.
///
/// A valid native context must be current on the calling thread for the
/// lifetime of the implementation; the driver itself is not thread-safe
/// and no locking happens at this seam.
pub trait GlDriver: Debug {
    /// Reports the driver's limits and identity strings.
    ///
    /// Called once at registry init; the result is cached there.
    fn capabilities(&self) -> DriverCaps;

    // --- Shader objects ---

    /// Creates an empty program object. Returns [`RawHandle::INVALID`]
    /// on driver failure.
    fn create_program(&self) -> RawHandle;

    /// Creates an empty shader object for the given stage.
    fn create_shader(&self, kind: ShaderStageKind) -> RawHandle;

    /// Replaces the source text of a shader object.
    fn shader_source(&self, shader: RawHandle, source: &str);

    /// Compiles the attached source.
    fn compile_shader(&self, shader: RawHandle);

    /// Whether the last compilation succeeded.
    fn compile_status(&self, shader: RawHandle) -> bool;

    /// The compiler's diagnostic text for the shader object.
    fn shader_info_log(&self, shader: RawHandle) -> String;

    /// Deletes a shader object.
    fn delete_shader(&self, shader: RawHandle);

    /// Attaches a shader object to a program.
    fn attach_shader(&self, program: RawHandle, shader: RawHandle);

    /// Detaches a shader object from a program.
    fn detach_shader(&self, program: RawHandle, shader: RawHandle);

    /// Links the program from its attached shader objects.
    fn link_program(&self, program: RawHandle);

    /// Whether the last link succeeded.
    fn link_status(&self, program: RawHandle) -> bool;

    /// The linker's diagnostic text for the program.
    fn program_info_log(&self, program: RawHandle) -> String;

    /// Deletes a program object.
    fn delete_program(&self, program: RawHandle);

    /// Makes a program current for drawing. [`RawHandle::INVALID`]
    /// unbinds.
    fn use_program(&self, program: RawHandle);

    // --- Textures ---

    /// Allocates a texture name.
    fn gen_texture(&self) -> RawHandle;

    /// Selects the active texture unit (zero-based).
    fn active_texture(&self, unit: u32);

    /// Binds a texture to a target on the active unit.
    /// [`RawHandle::INVALID`] clears the target.
    fn bind_texture(&self, target: TextureTarget, texture: RawHandle);

    /// Uploads level-0 pixel data for a 1D texture bound to
    /// [`TextureTarget::D1`].
    fn tex_image_1d(&self, width: u32, format: PixelFormat, kind: TexelKind, pixels: &[u8]);

    /// Uploads level-0 pixel data for the 2D-shaped `target`.
    fn tex_image_2d(
        &self,
        target: TextureTarget,
        width: u32,
        height: u32,
        format: PixelFormat,
        kind: TexelKind,
        pixels: &[u8],
    );

    /// Uploads level-0 pixel data for the 3D-shaped `target` (the third
    /// dimension is the layer count for array targets).
    fn tex_image_3d(
        &self,
        target: TextureTarget,
        width: u32,
        height: u32,
        depth: u32,
        format: PixelFormat,
        kind: TexelKind,
        pixels: &[u8],
    );

    /// Uploads one square cubemap face of the cubemap bound to
    /// [`TextureTarget::Cubemap`].
    fn tex_image_cube_face(
        &self,
        face: CubemapFace,
        size: u32,
        format: PixelFormat,
        kind: TexelKind,
        pixels: &[u8],
    );

    /// Sets the wrap mode of one coordinate axis.
    fn tex_wrap(&self, target: TextureTarget, axis: WrapAxis, mode: WrapMode);

    /// Sets the minification or magnification filter.
    fn tex_filter(&self, target: TextureTarget, filter: FilterKind, mode: FilterMode);

    /// Sets the anisotropic filtering ratio.
    fn tex_anisotropy(&self, target: TextureTarget, amount: f32);

    /// Generates the full mip chain for the bound texture.
    fn generate_mipmaps(&self, target: TextureTarget);

    /// Deletes a texture object.
    fn delete_texture(&self, texture: RawHandle);

    // --- Vertex data ---

    /// Allocates a buffer name.
    fn gen_buffer(&self) -> RawHandle;

    /// Binds a buffer to a target. [`RawHandle::INVALID`] clears it.
    fn bind_buffer(&self, kind: BufferKind, buffer: RawHandle);

    /// Uploads data into the buffer bound to `kind`.
    fn buffer_data(&self, kind: BufferKind, data: &[u8], usage: DrawUsage);

    /// Deletes a buffer object.
    fn delete_buffer(&self, buffer: RawHandle);

    /// Allocates a vertex array name.
    fn gen_vertex_array(&self) -> RawHandle;

    /// Binds a vertex array. [`RawHandle::INVALID`] clears it.
    fn bind_vertex_array(&self, array: RawHandle);

    /// Configures a float attribute pointer into the currently bound
    /// array buffer: `components` floats per vertex, non-normalized,
    /// tightly packed when `stride` is 0, starting at `offset` bytes.
    fn vertex_attrib_pointer(&self, index: u32, components: i32, stride: i32, offset: usize);

    /// Enables an attribute slot of the bound vertex array.
    fn enable_vertex_attrib(&self, index: u32);

    /// Deletes a vertex array object.
    fn delete_vertex_array(&self, array: RawHandle);

    // --- Draw submission ---

    /// Draws `count` vertices starting at `first` from the bound state.
    fn draw_arrays(&self, primitive: PrimitiveKind, first: i32, count: i32);

    /// Switches between filled and outline polygon rasterization.
    fn polygon_mode(&self, wireframe: bool);

    // --- Diagnostics ---

    /// Pops one entry from the driver's error queue, or `None` when the
    /// queue is empty. The queue is asynchronous relative to the call
    /// that caused an error, which is why faults are reported with
    /// call-site context instead of as typed failures.
    fn poll_error(&self) -> Option<DriverErrorCode>;
}
