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

//! A recording mock driver shared by the unit tests.
//!
//! Counts every native call and records the bind/draw call sequence so
//! redundancy-suppression properties are observable. Compile and link
//! outcomes are programmable through `fail_compile`/`fail_link`.

use crate::api::{
    BufferKind, CubemapFace, DrawUsage, DriverCaps, FilterKind, FilterMode, PixelFormat,
    PrimitiveKind, RawHandle, ShaderStageKind, TexelKind, TextureTarget, WrapAxis, WrapMode,
};
use crate::diag::DriverErrorCode;
use crate::traits::GlDriver;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
pub(crate) struct RecordingDriver {
    next_handle: Cell<u32>,
    calls: RefCell<HashMap<&'static str, usize>>,
    events: RefCell<Vec<String>>,
    pub(crate) fail_compile: Cell<bool>,
    pub(crate) fail_link: Cell<bool>,
    errors: RefCell<VecDeque<DriverErrorCode>>,
    caps: DriverCaps,
}

impl RecordingDriver {
    pub(crate) fn new() -> Self {
        Self::with_caps(DriverCaps {
            max_texture_size: 4096,
            max_texture_units: 16,
            max_combined_texture_units: 32,
            max_anisotropy: 8.0,
            version: (4, 1),
            vendor: "mock vendor".to_string(),
            renderer: "mock renderer".to_string(),
        })
    }

    pub(crate) fn with_caps(caps: DriverCaps) -> Self {
        Self {
            next_handle: Cell::new(1),
            calls: RefCell::new(HashMap::new()),
            events: RefCell::new(Vec::new()),
            fail_compile: Cell::new(false),
            fail_link: Cell::new(false),
            errors: RefCell::new(VecDeque::new()),
            caps,
        }
    }

    /// Number of times the named driver entry point was called.
    pub(crate) fn calls(&self, name: &'static str) -> usize {
        self.calls.borrow().get(name).copied().unwrap_or(0)
    }

    /// The recorded bind/draw event sequence.
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Queues an error code for the next `poll_error` drains.
    pub(crate) fn push_error(&self, code: DriverErrorCode) {
        self.errors.borrow_mut().push_back(code);
    }

    fn bump(&self, name: &'static str) {
        *self.calls.borrow_mut().entry(name).or_insert(0) += 1;
    }

    fn record(&self, event: String) {
        self.events.borrow_mut().push(event);
    }

    fn next(&self) -> RawHandle {
        let id = self.next_handle.get();
        self.next_handle.set(id + 1);
        RawHandle(id)
    }
}

impl GlDriver for RecordingDriver {
    fn capabilities(&self) -> DriverCaps {
        self.bump("capabilities");
        self.caps.clone()
    }

    fn create_program(&self) -> RawHandle {
        self.bump("create_program");
        self.next()
    }

    fn create_shader(&self, _kind: ShaderStageKind) -> RawHandle {
        self.bump("create_shader");
        self.next()
    }

    fn shader_source(&self, _shader: RawHandle, _source: &str) {
        self.bump("shader_source");
    }

    fn compile_shader(&self, _shader: RawHandle) {
        self.bump("compile_shader");
    }

    fn compile_status(&self, _shader: RawHandle) -> bool {
        self.bump("compile_status");
        !self.fail_compile.get()
    }

    fn shader_info_log(&self, _shader: RawHandle) -> String {
        self.bump("shader_info_log");
        "mock compile diagnostic".to_string()
    }

    fn delete_shader(&self, _shader: RawHandle) {
        self.bump("delete_shader");
    }

    fn attach_shader(&self, _program: RawHandle, _shader: RawHandle) {
        self.bump("attach_shader");
    }

    fn detach_shader(&self, _program: RawHandle, _shader: RawHandle) {
        self.bump("detach_shader");
    }

    fn link_program(&self, _program: RawHandle) {
        self.bump("link_program");
    }

    fn link_status(&self, _program: RawHandle) -> bool {
        self.bump("link_status");
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: RawHandle) -> String {
        self.bump("program_info_log");
        "mock link diagnostic".to_string()
    }

    fn delete_program(&self, _program: RawHandle) {
        self.bump("delete_program");
    }

    fn use_program(&self, program: RawHandle) {
        self.bump("use_program");
        self.record(format!("use_program {program}"));
    }

    fn gen_texture(&self) -> RawHandle {
        self.bump("gen_texture");
        self.next()
    }

    fn active_texture(&self, unit: u32) {
        self.bump("active_texture");
        self.record(format!("active_texture {unit}"));
    }

    fn bind_texture(&self, target: TextureTarget, texture: RawHandle) {
        self.bump("bind_texture");
        self.record(format!("bind_texture {target:?} {texture}"));
    }

    fn tex_image_1d(&self, _width: u32, _format: PixelFormat, _kind: TexelKind, _pixels: &[u8]) {
        self.bump("tex_image_1d");
    }

    fn tex_image_2d(
        &self,
        _target: TextureTarget,
        _width: u32,
        _height: u32,
        _format: PixelFormat,
        _kind: TexelKind,
        _pixels: &[u8],
    ) {
        self.bump("tex_image_2d");
    }

    fn tex_image_3d(
        &self,
        _target: TextureTarget,
        _width: u32,
        _height: u32,
        _depth: u32,
        _format: PixelFormat,
        _kind: TexelKind,
        _pixels: &[u8],
    ) {
        self.bump("tex_image_3d");
    }

    fn tex_image_cube_face(
        &self,
        _face: CubemapFace,
        _size: u32,
        _format: PixelFormat,
        _kind: TexelKind,
        _pixels: &[u8],
    ) {
        self.bump("tex_image_cube_face");
    }

    fn tex_wrap(&self, _target: TextureTarget, _axis: WrapAxis, _mode: WrapMode) {
        self.bump("tex_wrap");
    }

    fn tex_filter(&self, _target: TextureTarget, _filter: FilterKind, _mode: FilterMode) {
        self.bump("tex_filter");
    }

    fn tex_anisotropy(&self, _target: TextureTarget, _amount: f32) {
        self.bump("tex_anisotropy");
    }

    fn generate_mipmaps(&self, _target: TextureTarget) {
        self.bump("generate_mipmaps");
    }

    fn delete_texture(&self, _texture: RawHandle) {
        self.bump("delete_texture");
    }

    fn gen_buffer(&self) -> RawHandle {
        self.bump("gen_buffer");
        self.next()
    }

    fn bind_buffer(&self, _kind: BufferKind, _buffer: RawHandle) {
        self.bump("bind_buffer");
    }

    fn buffer_data(&self, _kind: BufferKind, _data: &[u8], _usage: DrawUsage) {
        self.bump("buffer_data");
    }

    fn delete_buffer(&self, _buffer: RawHandle) {
        self.bump("delete_buffer");
    }

    fn gen_vertex_array(&self) -> RawHandle {
        self.bump("gen_vertex_array");
        self.next()
    }

    fn bind_vertex_array(&self, array: RawHandle) {
        self.bump("bind_vertex_array");
        self.record(format!("bind_vertex_array {array}"));
    }

    fn vertex_attrib_pointer(&self, _index: u32, _components: i32, _stride: i32, _offset: usize) {
        self.bump("vertex_attrib_pointer");
    }

    fn enable_vertex_attrib(&self, _index: u32) {
        self.bump("enable_vertex_attrib");
    }

    fn delete_vertex_array(&self, _array: RawHandle) {
        self.bump("delete_vertex_array");
    }

    fn draw_arrays(&self, primitive: PrimitiveKind, first: i32, count: i32) {
        self.bump("draw_arrays");
        self.record(format!("draw_arrays {primitive:?} {first} {count}"));
    }

    fn polygon_mode(&self, wireframe: bool) {
        self.bump("polygon_mode");
        self.record(format!("polygon_mode {wireframe}"));
    }

    fn poll_error(&self) -> Option<DriverErrorCode> {
        self.bump("poll_error");
        self.errors.borrow_mut().pop_front()
    }
}
