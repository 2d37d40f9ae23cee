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

//! The resource registry: construction, lifecycle sequencing, and
//! teardown of every driver-side object.
//!
//! The registry owns no GPU memory itself; it tracks the handles it has
//! created so [`dispose`](ResourceRegistry::dispose) can release
//! everything that is still alive, in any order of prior destruction.
//! Every operation validates its preconditions and returns a typed
//! error instead of letting the driver raise an asynchronous fault.

use crate::api::{
    BufferKind, CubemapFace, DrawUsage, DriverCaps, FilterKind, FilterMode, PixelFormat, RawHandle,
    ShaderProgram, ShaderStage, ShaderStageKind, Texel, Texture, TextureTarget, VertexArray,
    VertexBuffer, WrapAxis, WrapMode,
};
use crate::diag::{gl_check, DriverDiagnostics};
use crate::error::{GeometryError, LayerError, ShaderError, TextureError};
use crate::traits::GlDriver;
use std::sync::Arc;

/// Slot index of the position attribute configured by
/// [`ResourceRegistry::configure_position_attribute`].
const POSITION_ATTRIB_INDEX: u32 = 0;
/// Components per vertex of the position attribute.
const POSITION_COMPONENTS: i32 = 3;

/// Creates, sequences, and destroys driver-side resources.
///
/// Must be [`init`](ResourceRegistry::init)-ed before any other
/// operation; every creation is recorded so [`dispose`](ResourceRegistry::dispose)
/// (also run on drop) can release whatever is still alive.
#[derive(Debug)]
pub struct ResourceRegistry {
    driver: Arc<dyn GlDriver>,
    diagnostics: Arc<DriverDiagnostics>,
    initialised: bool,
    caps: Option<DriverCaps>,
    programs: Vec<RawHandle>,
    stages: Vec<RawHandle>,
    textures: Vec<RawHandle>,
    buffers: Vec<RawHandle>,
    arrays: Vec<RawHandle>,
}

impl ResourceRegistry {
    /// Creates an uninitialised registry over the given driver.
    pub fn new(driver: Arc<dyn GlDriver>, diagnostics: Arc<DriverDiagnostics>) -> Self {
        Self {
            driver,
            diagnostics,
            initialised: false,
            caps: None,
            programs: Vec::new(),
            stages: Vec::new(),
            textures: Vec::new(),
            buffers: Vec::new(),
            arrays: Vec::new(),
        }
    }

    /// Queries the driver's capabilities and marks the registry live.
    ///
    /// # Errors
    ///
    /// [`LayerError::AlreadyInitialised`] on a second call, and
    /// [`LayerError::UnsupportedDriver`] when the driver reports zero
    /// combined texture units.
    pub fn init(&mut self) -> Result<(), LayerError> {
        debug_assert!(!self.initialised, "registry initialised twice");
        if self.initialised {
            return Err(LayerError::AlreadyInitialised);
        }
        let caps = gl_check!(self.diagnostics, self.driver, self.driver.capabilities());
        if caps.max_combined_texture_units == 0 {
            return Err(LayerError::UnsupportedDriver {
                detail: "driver reports zero combined texture units".to_string(),
            });
        }
        log::info!(
            target: "strata::registry",
            "context {}.{} | {} | {} | max texture size {}, {} combined units",
            caps.version.0,
            caps.version.1,
            caps.vendor,
            caps.renderer,
            caps.max_texture_size,
            caps.max_combined_texture_units,
        );
        self.caps = Some(caps);
        self.initialised = true;
        Ok(())
    }

    /// `true` between [`init`](Self::init) and [`dispose`](Self::dispose).
    #[inline]
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// The capabilities queried at init, or `None` before init.
    #[inline]
    pub fn caps(&self) -> Option<&DriverCaps> {
        self.caps.as_ref()
    }

    fn ensure_init(&self) -> Result<&DriverCaps, LayerError> {
        debug_assert!(self.initialised, "registry used before init");
        match &self.caps {
            Some(caps) if self.initialised => Ok(caps),
            _ => Err(LayerError::NotInitialised),
        }
    }

    fn untrack(list: &mut Vec<RawHandle>, handle: RawHandle) {
        if let Some(index) = list.iter().position(|h| *h == handle) {
            list.swap_remove(index);
        }
    }

    // --- Shader lifecycle ---

    /// Creates an empty shader program.
    pub fn create_program(&mut self) -> Result<ShaderProgram, LayerError> {
        self.ensure_init()?;
        let handle = gl_check!(self.diagnostics, self.driver, self.driver.create_program());
        self.programs.push(handle);
        Ok(ShaderProgram::new(handle))
    }

    /// Creates an empty shader stage for the given pipeline stage.
    pub fn create_stage(&mut self, kind: ShaderStageKind) -> Result<ShaderStage, LayerError> {
        self.ensure_init()?;
        let handle = gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.create_shader(kind)
        );
        self.stages.push(handle);
        Ok(ShaderStage::new(handle, kind))
    }

    /// Attaches (or replaces) the source text of a stage. Replacing the
    /// source resets the compiled flag so the stage can be recompiled.
    ///
    /// # Errors
    ///
    /// [`ShaderError::InvalidHandle`] for a destroyed stage and
    /// [`ShaderError::EmptySource`] for empty text.
    pub fn attach_source(&self, stage: &mut ShaderStage, source: &str) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(stage.handle.is_valid(), "shader stage used after destroy");
        if !stage.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        if source.is_empty() {
            return Err(ShaderError::EmptySource.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.shader_source(stage.handle, source)
        );
        stage.has_source = true;
        stage.compiled = false;
        Ok(())
    }

    /// Compiles a stage's attached source.
    ///
    /// On driver rejection the stage's object is released and its handle
    /// reset; the compiler's diagnostic text travels in the error.
    ///
    /// # Errors
    ///
    /// [`ShaderError::InvalidHandle`], [`ShaderError::AlreadyCompiled`],
    /// [`ShaderError::NoSource`], or [`ShaderError::CompileFailed`].
    pub fn compile_stage(&mut self, stage: &mut ShaderStage) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(stage.handle.is_valid(), "shader stage used after destroy");
        if !stage.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        if stage.compiled {
            return Err(ShaderError::AlreadyCompiled.into());
        }
        if !stage.has_source {
            return Err(ShaderError::NoSource.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.compile_shader(stage.handle)
        );
        if gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.compile_status(stage.handle)
        ) {
            stage.compiled = true;
            return Ok(());
        }
        let info = gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.shader_info_log(stage.handle)
        );
        log::error!(
            target: "strata::registry",
            "{:?} stage {} failed to compile: {info}",
            stage.kind,
            stage.handle,
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_shader(stage.handle)
        );
        Self::untrack(&mut self.stages, stage.handle);
        stage.handle = RawHandle::INVALID;
        stage.has_source = false;
        Err(ShaderError::CompileFailed { log: info }.into())
    }

    /// Attaches a compiled stage to a program. Attaching a stage that is
    /// already attached is a silent no-op.
    ///
    /// # Errors
    ///
    /// [`ShaderError::InvalidHandle`] for a destroyed program or stage,
    /// [`ShaderError::StageNotCompiled`] for an uncompiled stage.
    pub fn attach_stage(
        &self,
        program: &mut ShaderProgram,
        stage: &ShaderStage,
    ) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(program.handle.is_valid(), "shader program used after destroy");
        debug_assert!(stage.handle.is_valid(), "shader stage used after destroy");
        if !program.handle.is_valid() || !stage.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        if !stage.compiled {
            return Err(ShaderError::StageNotCompiled.into());
        }
        if program.stages.contains(&stage.handle) {
            return Ok(());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.attach_shader(program.handle, stage.handle)
        );
        program.stages.push(stage.handle);
        Ok(())
    }

    /// Detaches a stage from a program. Detaching a stage that is not
    /// attached is a silent no-op.
    pub fn detach_stage(
        &self,
        program: &mut ShaderProgram,
        stage: &ShaderStage,
    ) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(program.handle.is_valid(), "shader program used after destroy");
        debug_assert!(stage.handle.is_valid(), "shader stage used after destroy");
        if !program.handle.is_valid() || !stage.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        if let Some(index) = program.stages.iter().position(|h| *h == stage.handle) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.detach_shader(program.handle, stage.handle)
            );
            program.stages.remove(index);
        }
        Ok(())
    }

    /// Detaches every stage currently attached to a program.
    pub fn detach_all_stages(&self, program: &mut ShaderProgram) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(program.handle.is_valid(), "shader program used after destroy");
        if !program.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        for stage in program.stages.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.detach_shader(program.handle, stage)
            );
        }
        Ok(())
    }

    /// Detaches a stage from a program and releases its driver object.
    pub fn detach_and_delete_stage(
        &mut self,
        program: &mut ShaderProgram,
        stage: &mut ShaderStage,
    ) -> Result<(), LayerError> {
        self.detach_stage(program, stage)?;
        self.destroy_stage(stage)
    }

    /// Detaches every attached stage and releases their driver objects.
    /// Caller-held [`ShaderStage`] wrappers for them become stale.
    pub fn detach_and_delete_all_stages(
        &mut self,
        program: &mut ShaderProgram,
    ) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(program.handle.is_valid(), "shader program used after destroy");
        if !program.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        for stage in program.stages.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.detach_shader(program.handle, stage)
            );
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.delete_shader(stage)
            );
            Self::untrack(&mut self.stages, stage);
        }
        Ok(())
    }

    /// Links a program from its attached stages.
    ///
    /// On success the stages are detached (the linked binary no longer
    /// needs them) and, when `delete_stages` is set, their objects are
    /// released as well. Linking with no stages attached is a warned
    /// no-op that leaves the program unlinked. On driver rejection the
    /// program is deleted and its handle reset.
    ///
    /// # Errors
    ///
    /// [`ShaderError::InvalidHandle`],
    /// [`ShaderError::InvalidStageAttached`] when an attached stage no
    /// longer refers to a live object, or [`ShaderError::LinkFailed`].
    pub fn link_program(
        &mut self,
        program: &mut ShaderProgram,
        delete_stages: bool,
    ) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(program.handle.is_valid(), "shader program used after destroy");
        if !program.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        if program.stages.is_empty() {
            log::warn!(
                target: "strata::registry",
                "link requested on program {} with no stages attached",
                program.handle,
            );
            return Ok(());
        }
        if program.stages.iter().any(|h| !self.stages.contains(h)) {
            return Err(ShaderError::InvalidStageAttached.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.link_program(program.handle)
        );
        if gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.link_status(program.handle)
        ) {
            for stage in program.stages.drain(..) {
                gl_check!(
                    self.diagnostics,
                    self.driver,
                    self.driver.detach_shader(program.handle, stage)
                );
                if delete_stages {
                    gl_check!(
                        self.diagnostics,
                        self.driver,
                        self.driver.delete_shader(stage)
                    );
                    Self::untrack(&mut self.stages, stage);
                }
            }
            program.linked = true;
            return Ok(());
        }
        let info = gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.program_info_log(program.handle)
        );
        log::error!(
            target: "strata::registry",
            "program {} failed to link: {info}",
            program.handle,
        );
        for stage in program.stages.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.detach_shader(program.handle, stage)
            );
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_program(program.handle)
        );
        Self::untrack(&mut self.programs, program.handle);
        program.handle = RawHandle::INVALID;
        program.linked = false;
        Err(ShaderError::LinkFailed { log: info }.into())
    }

    /// Releases a stage's driver object and resets the wrapper.
    pub fn destroy_stage(&mut self, stage: &mut ShaderStage) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(stage.handle.is_valid(), "shader stage used after destroy");
        if !stage.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_shader(stage.handle)
        );
        Self::untrack(&mut self.stages, stage.handle);
        stage.handle = RawHandle::INVALID;
        stage.has_source = false;
        stage.compiled = false;
        Ok(())
    }

    /// Detaches any remaining stages, releases the program's driver
    /// object, and resets the wrapper.
    pub fn destroy_program(&mut self, program: &mut ShaderProgram) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(program.handle.is_valid(), "shader program used after destroy");
        if !program.handle.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        for stage in program.stages.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.detach_shader(program.handle, stage)
            );
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_program(program.handle)
        );
        Self::untrack(&mut self.programs, program.handle);
        program.handle = RawHandle::INVALID;
        program.linked = false;
        Ok(())
    }

    // --- Texture construction ---

    fn check_dimensions(caps: &DriverCaps, dims: &[u32]) -> Result<(), LayerError> {
        for &dim in dims {
            if dim > caps.max_texture_size {
                return Err(TextureError::SizeExceeded {
                    requested: dim,
                    max: caps.max_texture_size,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Applies the sampling state to the texture currently bound to
    /// `target`: the caller's wrap mode per axis, trilinear
    /// minification, linear magnification, and a full mip chain.
    fn setup_sampling(
        &self,
        caps: &DriverCaps,
        target: TextureTarget,
        wraps: &[(WrapAxis, WrapMode)],
    ) {
        for &(axis, mode) in wraps {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.tex_wrap(target, axis, mode)
            );
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver
                .tex_filter(target, FilterKind::Minify, FilterMode::LinearMipmapLinear)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver
                .tex_filter(target, FilterKind::Magnify, FilterMode::Linear)
        );
        #[cfg(feature = "anisotropic-filtering")]
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.tex_anisotropy(target, caps.max_anisotropy)
        );
        #[cfg(not(feature = "anisotropic-filtering"))]
        let _ = caps;
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.generate_mipmaps(target)
        );
    }

    /// Creates and fully uploads a 1D texture.
    ///
    /// # Errors
    ///
    /// [`TextureError::EmptyPixels`] or [`TextureError::SizeExceeded`];
    /// both are checked before any driver handle is allocated.
    pub fn create_texture_1d<T: Texel>(
        &mut self,
        width: u32,
        format: PixelFormat,
        wrap_s: WrapMode,
        pixels: &[T],
    ) -> Result<Texture, LayerError> {
        let caps = self.ensure_init()?.clone();
        if pixels.is_empty() {
            return Err(TextureError::EmptyPixels.into());
        }
        Self::check_dimensions(&caps, &[width])?;
        let target = TextureTarget::D1;
        let handle = self.begin_texture(target);
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver
                .tex_image_1d(width, format, T::KIND, bytemuck::cast_slice(pixels))
        );
        self.setup_sampling(&caps, target, &[(WrapAxis::S, wrap_s)]);
        self.end_texture(target, handle);
        Ok(Texture::new(handle, target, width, 1, 1, format))
    }

    /// Creates and fully uploads a 1D array texture with `layers` rows
    /// of `width` texels; `pixels` holds the rows back to back.
    ///
    /// # Errors
    ///
    /// [`TextureError::EmptyPixels`] or [`TextureError::SizeExceeded`];
    /// both are checked before any driver handle is allocated.
    pub fn create_texture_1d_array<T: Texel>(
        &mut self,
        width: u32,
        layers: u32,
        format: PixelFormat,
        wrap_s: WrapMode,
        pixels: &[T],
    ) -> Result<Texture, LayerError> {
        let caps = self.ensure_init()?.clone();
        if pixels.is_empty() {
            return Err(TextureError::EmptyPixels.into());
        }
        Self::check_dimensions(&caps, &[width])?;
        let target = TextureTarget::D1Array;
        let handle = self.begin_texture(target);
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.tex_image_2d(
                target,
                width,
                layers,
                format,
                T::KIND,
                bytemuck::cast_slice(pixels)
            )
        );
        self.setup_sampling(&caps, target, &[(WrapAxis::S, wrap_s)]);
        self.end_texture(target, handle);
        Ok(Texture::new(handle, target, width, layers, 1, format))
    }

    /// Creates and fully uploads a 2D texture.
    ///
    /// # Errors
    ///
    /// [`TextureError::EmptyPixels`] or [`TextureError::SizeExceeded`];
    /// both are checked before any driver handle is allocated.
    pub fn create_texture_2d<T: Texel>(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
        pixels: &[T],
    ) -> Result<Texture, LayerError> {
        let caps = self.ensure_init()?.clone();
        if pixels.is_empty() {
            return Err(TextureError::EmptyPixels.into());
        }
        Self::check_dimensions(&caps, &[width, height])?;
        let target = TextureTarget::D2;
        let handle = self.begin_texture(target);
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.tex_image_2d(
                target,
                width,
                height,
                format,
                T::KIND,
                bytemuck::cast_slice(pixels)
            )
        );
        self.setup_sampling(
            &caps,
            target,
            &[(WrapAxis::S, wrap_s), (WrapAxis::T, wrap_t)],
        );
        self.end_texture(target, handle);
        Ok(Texture::new(handle, target, width, height, 1, format))
    }

    /// Creates and fully uploads a 3D (volumetric) texture.
    ///
    /// # Errors
    ///
    /// [`TextureError::EmptyPixels`] or [`TextureError::SizeExceeded`];
    /// both are checked before any driver handle is allocated.
    pub fn create_texture_3d<T: Texel>(
        &mut self,
        width: u32,
        height: u32,
        depth: u32,
        format: PixelFormat,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
        wrap_r: WrapMode,
        pixels: &[T],
    ) -> Result<Texture, LayerError> {
        let caps = self.ensure_init()?.clone();
        if pixels.is_empty() {
            return Err(TextureError::EmptyPixels.into());
        }
        Self::check_dimensions(&caps, &[width, height, depth])?;
        let target = TextureTarget::D3;
        let handle = self.begin_texture(target);
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.tex_image_3d(
                target,
                width,
                height,
                depth,
                format,
                T::KIND,
                bytemuck::cast_slice(pixels)
            )
        );
        self.setup_sampling(
            &caps,
            target,
            &[
                (WrapAxis::S, wrap_s),
                (WrapAxis::T, wrap_t),
                (WrapAxis::R, wrap_r),
            ],
        );
        self.end_texture(target, handle);
        Ok(Texture::new(handle, target, width, height, depth, format))
    }

    /// Creates and fully uploads a 2D array texture with `layers`
    /// layers of `width` by `height` texels.
    ///
    /// # Errors
    ///
    /// [`TextureError::EmptyPixels`] or [`TextureError::SizeExceeded`];
    /// both are checked before any driver handle is allocated.
    pub fn create_texture_2d_array<T: Texel>(
        &mut self,
        width: u32,
        height: u32,
        layers: u32,
        format: PixelFormat,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
        pixels: &[T],
    ) -> Result<Texture, LayerError> {
        let caps = self.ensure_init()?.clone();
        if pixels.is_empty() {
            return Err(TextureError::EmptyPixels.into());
        }
        Self::check_dimensions(&caps, &[width, height])?;
        let target = TextureTarget::D2Array;
        let handle = self.begin_texture(target);
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.tex_image_3d(
                target,
                width,
                height,
                layers,
                format,
                T::KIND,
                bytemuck::cast_slice(pixels)
            )
        );
        self.setup_sampling(
            &caps,
            target,
            &[(WrapAxis::S, wrap_s), (WrapAxis::T, wrap_t)],
        );
        self.end_texture(target, handle);
        Ok(Texture::new(handle, target, width, height, layers, format))
    }

    /// Creates and fully uploads a cubemap from six square faces, given
    /// in [`CubemapFace::ALL`] order (+X −X +Y −Y +Z −Z).
    ///
    /// # Errors
    ///
    /// [`TextureError::EmptyPixels`] if any face slice is empty, or
    /// [`TextureError::SizeExceeded`]; both are checked before any
    /// driver handle is allocated.
    pub fn create_cubemap<T: Texel>(
        &mut self,
        size: u32,
        format: PixelFormat,
        wrap: WrapMode,
        faces: [&[T]; 6],
    ) -> Result<Texture, LayerError> {
        let caps = self.ensure_init()?.clone();
        if faces.iter().any(|face| face.is_empty()) {
            return Err(TextureError::EmptyPixels.into());
        }
        Self::check_dimensions(&caps, &[size])?;
        let target = TextureTarget::Cubemap;
        let handle = self.begin_texture(target);
        for (face, pixels) in CubemapFace::ALL.iter().zip(faces) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.tex_image_cube_face(
                    *face,
                    size,
                    format,
                    T::KIND,
                    bytemuck::cast_slice(pixels)
                )
            );
        }
        self.setup_sampling(
            &caps,
            target,
            &[
                (WrapAxis::S, wrap),
                (WrapAxis::T, wrap),
                (WrapAxis::R, wrap),
            ],
        );
        self.end_texture(target, handle);
        Ok(Texture::new(handle, target, size, size, 1, format))
    }

    /// Allocates a texture name and binds it to `target` for upload.
    fn begin_texture(&mut self, target: TextureTarget) -> RawHandle {
        let handle = gl_check!(self.diagnostics, self.driver, self.driver.gen_texture());
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_texture(target, handle)
        );
        handle
    }

    /// Clears the construction-time bind and starts tracking the handle.
    /// The construction bind is registry-internal scratch state; a
    /// texture only counts as bound through the binding cache.
    fn end_texture(&mut self, target: TextureTarget, handle: RawHandle) {
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_texture(target, RawHandle::INVALID)
        );
        self.textures.push(handle);
    }

    /// Releases a texture's driver object and resets the wrapper.
    ///
    /// # Errors
    ///
    /// [`TextureError::InvalidHandle`], or [`TextureError::StillBound`]
    /// when the texture is still bound to a unit; unbind it through the
    /// binding cache first so the cache's shadow state stays truthful.
    pub fn destroy_texture(&mut self, texture: &mut Texture) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(texture.handle.is_valid(), "texture used after destroy");
        if !texture.handle.is_valid() {
            return Err(TextureError::InvalidHandle.into());
        }
        if let Some(unit) = texture.bound_unit {
            return Err(TextureError::StillBound { unit }.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_texture(texture.handle)
        );
        Self::untrack(&mut self.textures, texture.handle);
        texture.handle = RawHandle::INVALID;
        Ok(())
    }

    // --- Vertex data ---

    /// Creates a vertex buffer and uploads `data` in one step. The
    /// scratch bind used for the upload is cleared before returning.
    ///
    /// # Errors
    ///
    /// [`GeometryError::EmptyData`] for an empty slice.
    pub fn create_vertex_buffer(
        &mut self,
        kind: BufferKind,
        usage: DrawUsage,
        data: &[f32],
    ) -> Result<VertexBuffer, LayerError> {
        self.ensure_init()?;
        if data.is_empty() {
            return Err(GeometryError::EmptyData.into());
        }
        let handle = gl_check!(self.diagnostics, self.driver, self.driver.gen_buffer());
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_buffer(kind, handle)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver
                .buffer_data(kind, bytemuck::cast_slice(data), usage)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_buffer(kind, RawHandle::INVALID)
        );
        self.buffers.push(handle);
        Ok(VertexBuffer::new(handle, kind, usage, data.len()))
    }

    /// Creates an empty vertex array.
    pub fn create_vertex_array(&mut self) -> Result<VertexArray, LayerError> {
        self.ensure_init()?;
        let handle = gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.gen_vertex_array()
        );
        self.arrays.push(handle);
        Ok(VertexArray::new(handle))
    }

    /// Wires `buffer` into `array` as attribute slot 0: three tightly
    /// packed floats per vertex, non-normalized, from offset zero. Both
    /// scratch binds are cleared before returning.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidHandle`] for a destroyed array or buffer.
    pub fn configure_position_attribute(
        &self,
        array: &VertexArray,
        buffer: &VertexBuffer,
    ) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(array.handle.is_valid(), "vertex array used after destroy");
        debug_assert!(buffer.handle.is_valid(), "vertex buffer used after destroy");
        if !array.handle.is_valid() || !buffer.handle.is_valid() {
            return Err(GeometryError::InvalidHandle.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_vertex_array(array.handle)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_buffer(BufferKind::Array, buffer.handle)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver
                .vertex_attrib_pointer(POSITION_ATTRIB_INDEX, POSITION_COMPONENTS, 0, 0)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.enable_vertex_attrib(POSITION_ATTRIB_INDEX)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_vertex_array(RawHandle::INVALID)
        );
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_buffer(BufferKind::Array, RawHandle::INVALID)
        );
        Ok(())
    }

    /// Releases a buffer's driver object and resets the wrapper.
    pub fn destroy_vertex_buffer(&mut self, buffer: &mut VertexBuffer) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(buffer.handle.is_valid(), "vertex buffer used after destroy");
        if !buffer.handle.is_valid() {
            return Err(GeometryError::InvalidHandle.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_buffer(buffer.handle)
        );
        Self::untrack(&mut self.buffers, buffer.handle);
        buffer.handle = RawHandle::INVALID;
        buffer.len = 0;
        Ok(())
    }

    /// Releases a vertex array's driver object and resets the wrapper.
    pub fn destroy_vertex_array(&mut self, array: &mut VertexArray) -> Result<(), LayerError> {
        self.ensure_init()?;
        debug_assert!(array.handle.is_valid(), "vertex array used after destroy");
        if !array.handle.is_valid() {
            return Err(GeometryError::InvalidHandle.into());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.delete_vertex_array(array.handle)
        );
        Self::untrack(&mut self.arrays, array.handle);
        array.handle = RawHandle::INVALID;
        Ok(())
    }

    // --- Teardown ---

    /// Releases every driver object still tracked and returns the
    /// registry to its pre-init state. Idempotent; also run on drop.
    /// Caller-held wrappers are not reset and become stale.
    pub fn dispose(&mut self) {
        if !self.initialised && self.caps.is_none() {
            return;
        }
        for handle in self.arrays.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.delete_vertex_array(handle)
            );
        }
        for handle in self.buffers.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.delete_buffer(handle)
            );
        }
        for handle in self.textures.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.delete_texture(handle)
            );
        }
        for handle in self.programs.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.delete_program(handle)
            );
        }
        for handle in self.stages.drain(..) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.delete_shader(handle)
            );
        }
        self.initialised = false;
        self.caps = None;
        log::debug!(target: "strata::registry", "registry disposed");
    }
}

impl Drop for ResourceRegistry {
    fn drop(&mut self) {
        self.dispose();
    }
}
