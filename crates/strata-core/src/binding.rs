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

//! The binding cache: shadow state over the context's bind points.
//!
//! Every bind goes through this cache, which mirrors what the driver
//! already has bound and elides redundant state changes. Texture slots
//! are keyed by `(unit, target)` in a single table, so a unit can carry
//! one binding per target exactly as the native API allows, and a bind
//! on one target can never alias a slot of another.

use crate::api::{DriverCaps, RawHandle, ShaderProgram, Texture, TextureTarget, VertexArray};
use crate::diag::{gl_check, DriverDiagnostics};
use crate::error::{GeometryError, LayerError, ShaderError, TextureError};
use crate::traits::GlDriver;
use std::collections::HashMap;
use std::sync::Arc;

/// Shadowed bind-point state for one context.
///
/// One instance per context, shared with the [`DrawQueue`](crate::DrawQueue)
/// at processing time. The shadow is only truthful while all binds go
/// through it.
#[derive(Debug)]
pub struct BindingCache {
    driver: Arc<dyn GlDriver>,
    diagnostics: Arc<DriverDiagnostics>,
    max_units: u32,
    active_unit: Option<u32>,
    bound_program: RawHandle,
    bound_array: RawHandle,
    wireframe: Option<bool>,
    slots: HashMap<(u32, TextureTarget), RawHandle>,
}

impl BindingCache {
    /// Creates an empty cache sized from the driver's combined texture
    /// unit count.
    pub fn new(
        driver: Arc<dyn GlDriver>,
        diagnostics: Arc<DriverDiagnostics>,
        caps: &DriverCaps,
    ) -> Self {
        Self {
            driver,
            diagnostics,
            max_units: caps.max_combined_texture_units,
            active_unit: None,
            bound_program: RawHandle::INVALID,
            bound_array: RawHandle::INVALID,
            wireframe: None,
            slots: HashMap::new(),
        }
    }

    pub(crate) fn driver(&self) -> &Arc<dyn GlDriver> {
        &self.driver
    }

    pub(crate) fn diagnostics(&self) -> &DriverDiagnostics {
        &self.diagnostics
    }

    /// The program currently bound, or [`RawHandle::INVALID`].
    #[inline]
    pub fn bound_program(&self) -> RawHandle {
        self.bound_program
    }

    /// The vertex array currently bound, or [`RawHandle::INVALID`].
    #[inline]
    pub fn bound_vertex_array(&self) -> RawHandle {
        self.bound_array
    }

    /// The texture unit last activated, if any.
    #[inline]
    pub fn active_unit(&self) -> Option<u32> {
        self.active_unit
    }

    /// The handle bound to `(unit, target)`, if the cache has seen one.
    #[inline]
    pub fn bound_texture(&self, unit: u32, target: TextureTarget) -> Option<RawHandle> {
        self.slots.get(&(unit, target)).copied()
    }

    // --- Programs ---

    /// Makes a program current, skipping the driver call when it
    /// already is.
    ///
    /// # Errors
    ///
    /// [`ShaderError::InvalidHandle`] for a destroyed program.
    pub fn bind_program(&mut self, program: &ShaderProgram) -> Result<(), LayerError> {
        self.bind_program_handle(program.handle)
    }

    /// Handle-level variant of [`bind_program`](Self::bind_program),
    /// used when the wrapper is not at hand (queue processing).
    pub fn bind_program_handle(&mut self, program: RawHandle) -> Result<(), LayerError> {
        debug_assert!(program.is_valid(), "shader program used after destroy");
        if !program.is_valid() {
            return Err(ShaderError::InvalidHandle.into());
        }
        if self.bound_program == program {
            return Ok(());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.use_program(program)
        );
        self.bound_program = program;
        Ok(())
    }

    /// Clears the current program binding. A no-op when none is bound.
    pub fn unbind_program(&mut self) {
        if self.bound_program.is_valid() {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.use_program(RawHandle::INVALID)
            );
            self.bound_program = RawHandle::INVALID;
        }
    }

    // --- Textures ---

    /// Binds a texture to a unit, updating the texture's bound-unit
    /// mirror. Skips both the unit activation and the bind when the
    /// slot already holds this texture.
    ///
    /// Binding over an occupied `(unit, target)` slot displaces the
    /// previous texture without clearing that wrapper's bound-unit
    /// mirror: the cache only sees handles and cannot reach the
    /// displaced wrapper. A displaced texture must still go through
    /// [`unbind_texture`](Self::unbind_texture) (which detects the
    /// displacement and clears only the mirror) before it can be
    /// destroyed.
    ///
    /// # Errors
    ///
    /// [`TextureError::InvalidHandle`] for a destroyed texture and
    /// [`TextureError::UnitOutOfRange`] for a unit at or beyond the
    /// driver's combined unit count.
    pub fn bind_texture(&mut self, unit: u32, texture: &mut Texture) -> Result<(), LayerError> {
        self.bind_texture_handle(unit, texture.target, texture.handle)?;
        texture.bound_unit = Some(unit);
        Ok(())
    }

    /// Handle-level variant of [`bind_texture`](Self::bind_texture).
    /// Does not maintain any wrapper's bound-unit mirror.
    pub fn bind_texture_handle(
        &mut self,
        unit: u32,
        target: TextureTarget,
        texture: RawHandle,
    ) -> Result<(), LayerError> {
        debug_assert!(texture.is_valid(), "texture used after destroy");
        if !texture.is_valid() {
            return Err(TextureError::InvalidHandle.into());
        }
        if unit >= self.max_units {
            return Err(TextureError::UnitOutOfRange {
                unit,
                max: self.max_units,
            }
            .into());
        }
        if self.slots.get(&(unit, target)) == Some(&texture) {
            return Ok(());
        }
        self.activate_unit(unit);
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_texture(target, texture)
        );
        self.slots.insert((unit, target), texture);
        Ok(())
    }

    /// Unbinds a texture from the unit its mirror names, clearing the
    /// mirror. The driver is only touched if the slot still holds this
    /// texture.
    ///
    /// # Errors
    ///
    /// [`TextureError::InvalidHandle`] for a destroyed texture and
    /// [`TextureError::NotBound`] when the mirror is clear.
    pub fn unbind_texture(&mut self, texture: &mut Texture) -> Result<(), LayerError> {
        debug_assert!(texture.handle.is_valid(), "texture used after destroy");
        if !texture.handle.is_valid() {
            return Err(TextureError::InvalidHandle.into());
        }
        let unit = texture.bound_unit.ok_or(TextureError::NotBound)?;
        let slot = (unit, texture.target);
        if self.slots.get(&slot) == Some(&texture.handle) {
            self.activate_unit(unit);
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.bind_texture(texture.target, RawHandle::INVALID)
            );
            self.slots.remove(&slot);
        }
        texture.bound_unit = None;
        Ok(())
    }

    fn activate_unit(&mut self, unit: u32) {
        if self.active_unit != Some(unit) {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.active_texture(unit)
            );
            self.active_unit = Some(unit);
        }
    }

    // --- Vertex arrays ---

    /// Makes a vertex array current, skipping the driver call when it
    /// already is.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidHandle`] for a destroyed array.
    pub fn bind_vertex_array(&mut self, array: &VertexArray) -> Result<(), LayerError> {
        self.bind_vertex_array_handle(array.handle)
    }

    /// Handle-level variant of [`bind_vertex_array`](Self::bind_vertex_array).
    pub fn bind_vertex_array_handle(&mut self, array: RawHandle) -> Result<(), LayerError> {
        debug_assert!(array.is_valid(), "vertex array used after destroy");
        if !array.is_valid() {
            return Err(GeometryError::InvalidHandle.into());
        }
        if self.bound_array == array {
            return Ok(());
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.bind_vertex_array(array)
        );
        self.bound_array = array;
        Ok(())
    }

    /// Clears the current vertex array binding. A no-op when none is
    /// bound.
    pub fn unbind_vertex_array(&mut self) {
        if self.bound_array.is_valid() {
            gl_check!(
                self.diagnostics,
                self.driver,
                self.driver.bind_vertex_array(RawHandle::INVALID)
            );
            self.bound_array = RawHandle::INVALID;
        }
    }

    // --- Rasterizer state ---

    /// Switches between filled and outline polygon rasterization,
    /// skipping the driver call when the mode is already set.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        if self.wireframe == Some(wireframe) {
            return;
        }
        gl_check!(
            self.diagnostics,
            self.driver,
            self.driver.polygon_mode(wireframe)
        );
        self.wireframe = Some(wireframe);
    }
}
