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

//! Vertex buffer and vertex array value types.

use super::handle::RawHandle;

/// The binding target of a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Vertex attribute data.
    Array,
    /// Index data.
    Element,
}

/// Usage hint passed to the driver at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawUsage {
    /// Uploaded once, drawn many times.
    Static,
    /// Re-uploaded frequently.
    Dynamic,
}

/// A vertex buffer object holding a flat float array.
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    pub(crate) handle: RawHandle,
    pub(crate) kind: BufferKind,
    pub(crate) usage: DrawUsage,
    pub(crate) len: usize,
}

impl VertexBuffer {
    pub(crate) fn new(handle: RawHandle, kind: BufferKind, usage: DrawUsage, len: usize) -> Self {
        Self {
            handle,
            kind,
            usage,
            len,
        }
    }

    /// The driver handle, or [`RawHandle::INVALID`] after destruction.
    #[inline]
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// The binding target this buffer was created for.
    #[inline]
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// The usage hint the data was uploaded with.
    #[inline]
    pub fn usage(&self) -> DrawUsage {
        self.usage
    }

    /// Number of float elements uploaded.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the buffer holds no elements. Creation rejects empty
    /// data, so this only holds for destroyed buffers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A vertex array object capturing attribute layout state.
#[derive(Debug, Clone)]
pub struct VertexArray {
    pub(crate) handle: RawHandle,
}

impl VertexArray {
    pub(crate) fn new(handle: RawHandle) -> Self {
        Self { handle }
    }

    /// The driver handle, or [`RawHandle::INVALID`] after destruction.
    #[inline]
    pub fn handle(&self) -> RawHandle {
        self.handle
    }
}
