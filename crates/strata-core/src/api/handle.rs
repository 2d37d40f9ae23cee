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

//! The opaque handle type shared by every driver-side object.

use std::fmt;

/// An opaque handle to a driver-side object (shader, program, texture,
/// buffer, or vertex array).
///
/// The value `0` is reserved by the native API as "no object" and is
/// exposed here as [`RawHandle::INVALID`]. Every creation path rejects it
/// and every destruction path resets the owning wrapper back to it, so a
/// destroyed resource can never be mistaken for a live one.
///
/// Identity is plain value equality on the wrapped integer; there are no
/// implicit numeric conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawHandle(pub u32);

impl RawHandle {
    /// The reserved "no object" sentinel. The driver never assigns it.
    pub const INVALID: RawHandle = RawHandle(0);

    /// Returns `true` if this handle refers to a real driver object.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
