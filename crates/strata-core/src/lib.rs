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

//! # Strata Core
//!
//! Backend-agnostic contracts and the reusable core of a thin native-GL
//! layer: typed resource handles, the [`GlDriver`] capability trait, the
//! [`ResourceRegistry`] that sequences multi-step resource construction,
//! and the [`BindingCache`] that suppresses redundant driver state changes.
//!
//! This crate defines the 'what' of the layer; a concrete driver over the
//! real native API lives in a sibling backend crate (e.g. `strata-gl`)
//! which implements [`GlDriver`]. All operations are synchronous and must
//! run on the thread owning the native context; only one
//! [`ResourceRegistry`]/[`BindingCache`] pair should exist per context.

#![warn(missing_docs)]

pub mod api;
pub mod binding;
pub mod diag;
pub mod error;
pub mod queue;
pub mod registry;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_driver;

pub use api::*;
pub use binding::BindingCache;
pub use diag::{DriverDiagnostics, DriverErrorCode, DriverFault};
pub use error::{GeometryError, LayerError, ShaderError, TextureError};
pub use queue::{ArrayThenTexture, DrawQueue, SortStrategy, TextureThenArray};
pub use registry::ResourceRegistry;
pub use traits::GlDriver;
