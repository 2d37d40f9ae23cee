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

//! Shader stage and program value types.
//!
//! Both types are plain state carriers. The lifecycle transitions
//! (source attach, compile, attach, link, destroy) are sequenced by the
//! [`ResourceRegistry`](crate::ResourceRegistry); these wrappers only
//! record where in that lifecycle the underlying driver object is.

use super::handle::RawHandle;

/// The pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStageKind {
    /// Per-vertex processing.
    Vertex,
    /// Per-fragment processing.
    Fragment,
    /// Primitive-level processing between vertex and fragment stages.
    Geometry,
    /// Tessellation control (patch setup).
    TessControl,
    /// Tessellation evaluation.
    TessEvaluation,
    /// Compute dispatch, outside the draw pipeline.
    Compute,
}

/// A single shader object: one stage's source and compilation state.
///
/// Created invalid by the driver, then walked through
/// source-attach → compile by the registry. Compilation failure is
/// terminal: the driver object is released and the handle reset.
#[derive(Debug, Clone)]
pub struct ShaderStage {
    pub(crate) handle: RawHandle,
    pub(crate) kind: ShaderStageKind,
    pub(crate) has_source: bool,
    pub(crate) compiled: bool,
}

impl ShaderStage {
    pub(crate) fn new(handle: RawHandle, kind: ShaderStageKind) -> Self {
        Self {
            handle,
            kind,
            has_source: false,
            compiled: false,
        }
    }

    /// The driver handle, or [`RawHandle::INVALID`] after destruction.
    #[inline]
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// The stage this object compiles for.
    #[inline]
    pub fn kind(&self) -> ShaderStageKind {
        self.kind
    }

    /// `true` once source text has been attached.
    #[inline]
    pub fn has_source(&self) -> bool {
        self.has_source
    }

    /// `true` once the driver accepted the source.
    #[inline]
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }
}

/// A shader program: an ordered, dynamically sized set of attached
/// stages plus the link state.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub(crate) handle: RawHandle,
    pub(crate) stages: Vec<RawHandle>,
    pub(crate) linked: bool,
}

impl ShaderProgram {
    pub(crate) fn new(handle: RawHandle) -> Self {
        Self {
            handle,
            stages: Vec::new(),
            linked: false,
        }
    }

    /// The driver handle, or [`RawHandle::INVALID`] after destruction.
    #[inline]
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// Handles of the currently attached stages, in attach order.
    #[inline]
    pub fn attached_stages(&self) -> &[RawHandle] {
        &self.stages
    }

    /// `true` once the program linked successfully.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stage_starts_unsourced_and_uncompiled() {
        let stage = ShaderStage::new(RawHandle(3), ShaderStageKind::Vertex);
        assert_eq!(stage.handle(), RawHandle(3));
        assert_eq!(stage.kind(), ShaderStageKind::Vertex);
        assert!(!stage.has_source());
        assert!(!stage.is_compiled());
    }

    #[test]
    fn new_program_starts_unlinked_with_no_stages() {
        let program = ShaderProgram::new(RawHandle(9));
        assert_eq!(program.handle(), RawHandle(9));
        assert!(program.attached_stages().is_empty());
        assert!(!program.is_linked());
    }
}
