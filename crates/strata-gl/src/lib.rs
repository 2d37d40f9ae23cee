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

//! # Strata GL
//!
//! The native OpenGL implementation of `strata-core`'s
//! [`GlDriver`](strata_core::GlDriver) trait, over loaded function
//! pointers. Construct a [`GlNativeDriver`] from the context's proc
//! address loader, then hand it to a
//! [`ResourceRegistry`](strata_core::ResourceRegistry) and
//! [`BindingCache`](strata_core::BindingCache).
//!
//! Everything here must run on the thread that owns the native context.

#![warn(missing_docs)]

pub mod graphics;

pub use graphics::gl::GlNativeDriver;
