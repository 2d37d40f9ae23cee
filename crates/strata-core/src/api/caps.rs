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

//! Capabilities reported by the driver, queried once at registry init.

/// A snapshot of the driver-reported limits and identity strings.
///
/// Queried exactly once by [`ResourceRegistry::init`](crate::ResourceRegistry::init)
/// and used for validation afterwards (texture dimension checks, binding
/// unit range checks, anisotropy clamping).
#[derive(Debug, Clone, PartialEq)]
pub struct DriverCaps {
    /// Largest allowed texture dimension, per axis.
    pub max_texture_size: u32,
    /// Texture image units available to the fragment stage.
    pub max_texture_units: u32,
    /// Texture image units available across all stages combined. This is
    /// the size of the binding cache's per-unit shadow table.
    pub max_combined_texture_units: u32,
    /// Largest supported anisotropic filtering ratio.
    pub max_anisotropy: f32,
    /// Native API version as reported by the context, `(major, minor)`.
    pub version: (u32, u32),
    /// Driver vendor string. Purely informational.
    pub vendor: String,
    /// Renderer/device name string. Purely informational.
    pub renderer: String,
}
