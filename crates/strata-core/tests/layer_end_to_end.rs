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

//! End-to-end exercise of the layer over a counting mock driver:
//! registry init, the full shader pipeline, texture and vertex data
//! construction, cached binding, and queued drawing.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

use strata_core::{
    BindingCache, BufferKind, CubemapFace, DrawCommand, DrawQueue, DrawUsage, DriverCaps,
    DriverDiagnostics, DriverErrorCode, FilterKind, FilterMode, GlDriver, PixelFormat,
    PrimitiveKind, RawHandle, ResourceRegistry, ShaderStageKind, TexelKind, TextureTarget,
    WrapAxis, WrapMode,
};

/// Minimal counting driver: hands out sequential handles, succeeds at
/// everything, and counts each entry point.
#[derive(Debug, Default)]
struct CountingDriver {
    next_handle: Cell<u32>,
    calls: RefCell<HashMap<&'static str, usize>>,
}

impl CountingDriver {
    fn new() -> Self {
        Self {
            next_handle: Cell::new(1),
            calls: RefCell::new(HashMap::new()),
        }
    }

    fn calls(&self, name: &'static str) -> usize {
        self.calls.borrow().get(name).copied().unwrap_or(0)
    }

    fn hit(&self, name: &'static str) {
        *self.calls.borrow_mut().entry(name).or_insert(0) += 1;
    }

    fn next(&self) -> RawHandle {
        let id = self.next_handle.get();
        self.next_handle.set(id + 1);
        RawHandle(id)
    }
}

impl GlDriver for CountingDriver {
    fn capabilities(&self) -> DriverCaps {
        self.hit("capabilities");
        DriverCaps {
            max_texture_size: 2048,
            max_texture_units: 16,
            max_combined_texture_units: 32,
            max_anisotropy: 4.0,
            version: (4, 1),
            vendor: "test vendor".to_string(),
            renderer: "test renderer".to_string(),
        }
    }

    fn create_program(&self) -> RawHandle {
        self.hit("create_program");
        self.next()
    }

    fn create_shader(&self, _kind: ShaderStageKind) -> RawHandle {
        self.hit("create_shader");
        self.next()
    }

    fn shader_source(&self, _shader: RawHandle, _source: &str) {
        self.hit("shader_source");
    }

    fn compile_shader(&self, _shader: RawHandle) {
        self.hit("compile_shader");
    }

    fn compile_status(&self, _shader: RawHandle) -> bool {
        self.hit("compile_status");
        true
    }

    fn shader_info_log(&self, _shader: RawHandle) -> String {
        self.hit("shader_info_log");
        String::new()
    }

    fn delete_shader(&self, _shader: RawHandle) {
        self.hit("delete_shader");
    }

    fn attach_shader(&self, _program: RawHandle, _shader: RawHandle) {
        self.hit("attach_shader");
    }

    fn detach_shader(&self, _program: RawHandle, _shader: RawHandle) {
        self.hit("detach_shader");
    }

    fn link_program(&self, _program: RawHandle) {
        self.hit("link_program");
    }

    fn link_status(&self, _program: RawHandle) -> bool {
        self.hit("link_status");
        true
    }

    fn program_info_log(&self, _program: RawHandle) -> String {
        self.hit("program_info_log");
        String::new()
    }

    fn delete_program(&self, _program: RawHandle) {
        self.hit("delete_program");
    }

    fn use_program(&self, _program: RawHandle) {
        self.hit("use_program");
    }

    fn gen_texture(&self) -> RawHandle {
        self.hit("gen_texture");
        self.next()
    }

    fn active_texture(&self, _unit: u32) {
        self.hit("active_texture");
    }

    fn bind_texture(&self, _target: TextureTarget, _texture: RawHandle) {
        self.hit("bind_texture");
    }

    fn tex_image_1d(&self, _width: u32, _format: PixelFormat, _kind: TexelKind, _pixels: &[u8]) {
        self.hit("tex_image_1d");
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
        self.hit("tex_image_2d");
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
        self.hit("tex_image_3d");
    }

    fn tex_image_cube_face(
        &self,
        _face: CubemapFace,
        _size: u32,
        _format: PixelFormat,
        _kind: TexelKind,
        _pixels: &[u8],
    ) {
        self.hit("tex_image_cube_face");
    }

    fn tex_wrap(&self, _target: TextureTarget, _axis: WrapAxis, _mode: WrapMode) {
        self.hit("tex_wrap");
    }

    fn tex_filter(&self, _target: TextureTarget, _filter: FilterKind, _mode: FilterMode) {
        self.hit("tex_filter");
    }

    fn tex_anisotropy(&self, _target: TextureTarget, _amount: f32) {
        self.hit("tex_anisotropy");
    }

    fn generate_mipmaps(&self, _target: TextureTarget) {
        self.hit("generate_mipmaps");
    }

    fn delete_texture(&self, _texture: RawHandle) {
        self.hit("delete_texture");
    }

    fn gen_buffer(&self) -> RawHandle {
        self.hit("gen_buffer");
        self.next()
    }

    fn bind_buffer(&self, _kind: BufferKind, _buffer: RawHandle) {
        self.hit("bind_buffer");
    }

    fn buffer_data(&self, _kind: BufferKind, _data: &[u8], _usage: DrawUsage) {
        self.hit("buffer_data");
    }

    fn delete_buffer(&self, _buffer: RawHandle) {
        self.hit("delete_buffer");
    }

    fn gen_vertex_array(&self) -> RawHandle {
        self.hit("gen_vertex_array");
        self.next()
    }

    fn bind_vertex_array(&self, _array: RawHandle) {
        self.hit("bind_vertex_array");
    }

    fn vertex_attrib_pointer(&self, _index: u32, _components: i32, _stride: i32, _offset: usize) {
        self.hit("vertex_attrib_pointer");
    }

    fn enable_vertex_attrib(&self, _index: u32) {
        self.hit("enable_vertex_attrib");
    }

    fn delete_vertex_array(&self, _array: RawHandle) {
        self.hit("delete_vertex_array");
    }

    fn draw_arrays(&self, _primitive: PrimitiveKind, _first: i32, _count: i32) {
        self.hit("draw_arrays");
    }

    fn polygon_mode(&self, _wireframe: bool) {
        self.hit("polygon_mode");
    }

    fn poll_error(&self) -> Option<DriverErrorCode> {
        self.hit("poll_error");
        None
    }
}

fn new_layer() -> (Arc<CountingDriver>, ResourceRegistry, BindingCache) {
    let driver = Arc::new(CountingDriver::new());
    let diagnostics = Arc::new(DriverDiagnostics::new());
    let mut registry = ResourceRegistry::new(driver.clone(), diagnostics.clone());
    registry.init().expect("init");
    let caps = registry.caps().expect("caps").clone();
    let cache = BindingCache::new(driver.clone(), diagnostics, &caps);
    (driver, registry, cache)
}

#[test]
fn full_frame_over_a_mock_context() {
    let (driver, mut registry, mut cache) = new_layer();

    // Shader pipeline.
    let mut program = registry.create_program().expect("program");
    let mut vertex = registry
        .create_stage(ShaderStageKind::Vertex)
        .expect("vertex stage");
    let mut fragment = registry
        .create_stage(ShaderStageKind::Fragment)
        .expect("fragment stage");
    registry
        .attach_source(&mut vertex, "void main() { gl_Position = vec4(0.0); }")
        .expect("vertex source");
    registry
        .attach_source(&mut fragment, "void main() {}")
        .expect("fragment source");
    registry.compile_stage(&mut vertex).expect("vertex compile");
    registry
        .compile_stage(&mut fragment)
        .expect("fragment compile");
    registry
        .attach_stage(&mut program, &vertex)
        .expect("attach vertex");
    registry
        .attach_stage(&mut program, &fragment)
        .expect("attach fragment");
    registry.link_program(&mut program, true).expect("link");
    assert!(program.is_linked());

    // Texture upload.
    let mut texture = registry
        .create_texture_2d::<u8>(
            2,
            2,
            PixelFormat::Rgba,
            WrapMode::Repeat,
            WrapMode::Repeat,
            &[255u8; 16],
        )
        .expect("texture");
    assert_eq!(driver.calls("tex_image_2d"), 1);
    assert_eq!(driver.calls("generate_mipmaps"), 1);

    // Vertex data: one triangle, positions only.
    let positions = [-0.5f32, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
    let buffer = registry
        .create_vertex_buffer(BufferKind::Array, DrawUsage::Static, &positions)
        .expect("buffer");
    let array = registry.create_vertex_array().expect("vertex array");
    registry
        .configure_position_attribute(&array, &buffer)
        .expect("attribute");

    // Two frames of the same draw: all state binds happen once.
    let mut queue = DrawQueue::new();
    for _ in 0..2 {
        let command = DrawCommand::new(
            &program,
            Some((0, &texture)),
            &array,
            PrimitiveKind::Triangles,
            3,
            false,
        )
        .expect("command");
        queue.submit(command);
        queue.submit(command);
        queue.process(&mut cache).expect("process");
    }
    assert_eq!(driver.calls("draw_arrays"), 4);
    assert_eq!(driver.calls("use_program"), 1);
    // Upload-time scratch bind was cleared, so the queue re-binds once.
    assert_eq!(driver.calls("active_texture"), 1);

    // Explicit binding round trip keeps the texture mirror truthful.
    cache.bind_texture(1, &mut texture).expect("bind");
    assert_eq!(texture.bound_unit(), Some(1));
    assert!(registry.destroy_texture(&mut texture).is_err());
    cache.unbind_texture(&mut texture).expect("unbind");
    registry.destroy_texture(&mut texture).expect("destroy");
    assert_eq!(texture.handle(), RawHandle::INVALID);

    // Teardown releases whatever is still alive.
    registry.dispose();
    assert_eq!(driver.calls("delete_program"), 1);
    assert_eq!(driver.calls("delete_buffer"), 1);
    assert_eq!(driver.calls("delete_vertex_array"), 1);
    assert_eq!(driver.calls("delete_texture"), 1);
}

#[test]
fn oversized_texture_never_reaches_the_driver() {
    let (driver, mut registry, _cache) = new_layer();
    let max = registry.caps().expect("caps").max_texture_size;
    let result = registry.create_texture_2d::<f32>(
        max + 1,
        2,
        PixelFormat::Rgb,
        WrapMode::Repeat,
        WrapMode::Repeat,
        &[0.0f32; 12],
    );
    assert!(result.is_err());
    assert_eq!(driver.calls("gen_texture"), 0);
}

#[test]
fn cubemap_round_trip() {
    let (driver, mut registry, mut cache) = new_layer();
    let face = [0u8; 12];
    let mut cubemap = registry
        .create_cubemap::<u8>(2, PixelFormat::Rgb, WrapMode::ClampToEdge, [&face; 6])
        .expect("cubemap");
    assert_eq!(driver.calls("tex_image_cube_face"), 6);
    cache.bind_texture(3, &mut cubemap).expect("bind");
    cache.bind_texture(3, &mut cubemap).expect("rebind");
    // Creation binds twice (upload + clear); the cached bind adds one.
    assert_eq!(driver.calls("bind_texture"), 3);
    cache.unbind_texture(&mut cubemap).expect("unbind");
    registry.destroy_texture(&mut cubemap).expect("destroy");
}
