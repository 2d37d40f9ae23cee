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

//! The loaded-function-pointer GL driver.
//!
//! Thin and deliberately unvalidating: preconditions are the caller's
//! job (the registry and binding cache enforce them), and native errors
//! surface through [`poll_error`](strata_core::GlDriver::poll_error).

use super::conversions::{error_from_native, IntoGl};
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use std::ffi::{c_char, c_void, CStr};
use strata_core::{
    BufferKind, CubemapFace, DrawUsage, DriverCaps, DriverErrorCode, FilterKind, FilterMode,
    GlDriver, PixelFormat, PrimitiveKind, RawHandle, ShaderStageKind, TexelKind, TextureTarget,
    WrapAxis, WrapMode,
};

// Anisotropy enums were promoted to core in GL 4.6; the `gl` crate's
// generated 4.5 bindings omit them, so use the spec values directly.
const TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FE;
const MAX_TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FF;

/// A [`GlDriver`] over globally loaded GL function pointers.
///
/// Loading is process-global, so only one context's functions can be
/// live at a time; that matches the layer's one-registry-per-context
/// model. All calls must happen on the thread owning the context.
#[derive(Debug)]
pub struct GlNativeDriver {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl GlNativeDriver {
    /// Loads the GL function pointers through the context's proc
    /// address loader and returns the driver.
    pub fn from_loader<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        log::debug!(target: "strata::gl", "native GL function pointers loaded");
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    fn get_integer(name: GLenum) -> i32 {
        let mut value: GLint = 0;
        unsafe { gl::GetIntegerv(name, &mut value) };
        value
    }

    fn get_string(name: GLenum) -> String {
        let ptr = unsafe { gl::GetString(name) };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr as *const c_char) }
            .to_string_lossy()
            .into_owned()
    }
}

impl GlDriver for GlNativeDriver {
    fn capabilities(&self) -> DriverCaps {
        let mut max_anisotropy: f32 = 1.0;
        unsafe { gl::GetFloatv(MAX_TEXTURE_MAX_ANISOTROPY, &mut max_anisotropy) };
        DriverCaps {
            max_texture_size: Self::get_integer(gl::MAX_TEXTURE_SIZE).max(0) as u32,
            max_texture_units: Self::get_integer(gl::MAX_TEXTURE_IMAGE_UNITS).max(0) as u32,
            max_combined_texture_units: Self::get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS)
                .max(0) as u32,
            max_anisotropy,
            version: (
                Self::get_integer(gl::MAJOR_VERSION).max(0) as u32,
                Self::get_integer(gl::MINOR_VERSION).max(0) as u32,
            ),
            vendor: Self::get_string(gl::VENDOR),
            renderer: Self::get_string(gl::RENDERER),
        }
    }

    fn create_program(&self) -> RawHandle {
        RawHandle(unsafe { gl::CreateProgram() })
    }

    fn create_shader(&self, kind: ShaderStageKind) -> RawHandle {
        RawHandle(unsafe { gl::CreateShader(kind.into_gl()) })
    }

    fn shader_source(&self, shader: RawHandle, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(shader.0, 1, &ptr, &len) };
    }

    fn compile_shader(&self, shader: RawHandle) {
        unsafe { gl::CompileShader(shader.0) };
    }

    fn compile_status(&self, shader: RawHandle) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: RawHandle) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetShaderiv(shader.0, gl::INFO_LOG_LENGTH, &mut len) };
        if len <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u8; len as usize];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(shader.0, len, &mut written, buffer.as_mut_ptr() as *mut GLchar)
        };
        buffer.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn delete_shader(&self, shader: RawHandle) {
        unsafe { gl::DeleteShader(shader.0) };
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe { gl::AttachShader(program.0, shader.0) };
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe { gl::DetachShader(program.0, shader.0) };
    }

    fn link_program(&self, program: RawHandle) {
        unsafe { gl::LinkProgram(program.0) };
    }

    fn link_status(&self, program: RawHandle) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: RawHandle) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetProgramiv(program.0, gl::INFO_LOG_LENGTH, &mut len) };
        if len <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u8; len as usize];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program.0,
                len,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            )
        };
        buffer.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn delete_program(&self, program: RawHandle) {
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn use_program(&self, program: RawHandle) {
        unsafe { gl::UseProgram(program.0) };
    }

    fn gen_texture(&self) -> RawHandle {
        let mut id: GLuint = 0;
        unsafe { gl::GenTextures(1, &mut id) };
        RawHandle(id)
    }

    fn active_texture(&self, unit: u32) {
        unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) };
    }

    fn bind_texture(&self, target: TextureTarget, texture: RawHandle) {
        unsafe { gl::BindTexture(target.into_gl(), texture.0) };
    }

    fn tex_image_1d(&self, width: u32, format: PixelFormat, kind: TexelKind, pixels: &[u8]) {
        let format = format.into_gl();
        unsafe {
            gl::TexImage1D(
                gl::TEXTURE_1D,
                0,
                format.internal,
                width as GLsizei,
                0,
                format.external,
                kind.into_gl(),
                pixels.as_ptr() as *const c_void,
            )
        };
    }

    fn tex_image_2d(
        &self,
        target: TextureTarget,
        width: u32,
        height: u32,
        format: PixelFormat,
        kind: TexelKind,
        pixels: &[u8],
    ) {
        let format = format.into_gl();
        unsafe {
            gl::TexImage2D(
                target.into_gl(),
                0,
                format.internal,
                width as GLsizei,
                height as GLsizei,
                0,
                format.external,
                kind.into_gl(),
                pixels.as_ptr() as *const c_void,
            )
        };
    }

    fn tex_image_3d(
        &self,
        target: TextureTarget,
        width: u32,
        height: u32,
        depth: u32,
        format: PixelFormat,
        kind: TexelKind,
        pixels: &[u8],
    ) {
        let format = format.into_gl();
        unsafe {
            gl::TexImage3D(
                target.into_gl(),
                0,
                format.internal,
                width as GLsizei,
                height as GLsizei,
                depth as GLsizei,
                0,
                format.external,
                kind.into_gl(),
                pixels.as_ptr() as *const c_void,
            )
        };
    }

    fn tex_image_cube_face(
        &self,
        face: CubemapFace,
        size: u32,
        format: PixelFormat,
        kind: TexelKind,
        pixels: &[u8],
    ) {
        let format = format.into_gl();
        unsafe {
            gl::TexImage2D(
                face.into_gl(),
                0,
                format.internal,
                size as GLsizei,
                size as GLsizei,
                0,
                format.external,
                kind.into_gl(),
                pixels.as_ptr() as *const c_void,
            )
        };
    }

    fn tex_wrap(&self, target: TextureTarget, axis: WrapAxis, mode: WrapMode) {
        unsafe { gl::TexParameteri(target.into_gl(), axis.into_gl(), mode.into_gl()) };
    }

    fn tex_filter(&self, target: TextureTarget, filter: FilterKind, mode: FilterMode) {
        unsafe { gl::TexParameteri(target.into_gl(), filter.into_gl(), mode.into_gl()) };
    }

    fn tex_anisotropy(&self, target: TextureTarget, amount: f32) {
        unsafe { gl::TexParameterf(target.into_gl(), TEXTURE_MAX_ANISOTROPY, amount) };
    }

    fn generate_mipmaps(&self, target: TextureTarget) {
        unsafe { gl::GenerateMipmap(target.into_gl()) };
    }

    fn delete_texture(&self, texture: RawHandle) {
        unsafe { gl::DeleteTextures(1, &texture.0) };
    }

    fn gen_buffer(&self) -> RawHandle {
        let mut id: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        RawHandle(id)
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: RawHandle) {
        unsafe { gl::BindBuffer(kind.into_gl(), buffer.0) };
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8], usage: DrawUsage) {
        unsafe {
            gl::BufferData(
                kind.into_gl(),
                data.len() as isize,
                data.as_ptr() as *const c_void,
                usage.into_gl(),
            )
        };
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        unsafe { gl::DeleteBuffers(1, &buffer.0) };
    }

    fn gen_vertex_array(&self) -> RawHandle {
        let mut id: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        RawHandle(id)
    }

    fn bind_vertex_array(&self, array: RawHandle) {
        unsafe { gl::BindVertexArray(array.0) };
    }

    fn vertex_attrib_pointer(&self, index: u32, components: i32, stride: i32, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            )
        };
    }

    fn enable_vertex_attrib(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn delete_vertex_array(&self, array: RawHandle) {
        unsafe { gl::DeleteVertexArrays(1, &array.0) };
    }

    fn draw_arrays(&self, primitive: PrimitiveKind, first: i32, count: i32) {
        unsafe { gl::DrawArrays(primitive.into_gl(), first, count) };
    }

    fn polygon_mode(&self, wireframe: bool) {
        let mode = if wireframe { gl::LINE } else { gl::FILL };
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) };
    }

    fn poll_error(&self) -> Option<DriverErrorCode> {
        match unsafe { gl::GetError() } {
            gl::NO_ERROR => None,
            code => Some(error_from_native(code)),
        }
    }
}
