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

//! Structured driver-error diagnostics.
//!
//! The native error queue is asynchronous relative to the call that
//! caused an error, so faults are not surfaced as typed failures.
//! Instead, in debug builds every driver statement is followed by a
//! drain of the queue into [`DriverFault`] records carrying the
//! statement text and call site. Release builds compile the polling out
//! entirely; it must never be relied on for control flow.

use crate::traits::GlDriver;
use std::fmt;
use std::sync::Mutex;

/// A native error code popped from the driver's error queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverErrorCode {
    /// The operation is not legal in the current state.
    InvalidOperation,
    /// An enum argument is not legal for the call.
    InvalidEnum,
    /// A numeric argument is out of range.
    InvalidValue,
    /// The driver could not allocate memory.
    OutOfMemory,
    /// A framebuffer operation ran against an incomplete framebuffer.
    InvalidFramebufferOperation,
    /// A code this layer does not recognize.
    Unknown(u32),
}

impl fmt::Display for DriverErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverErrorCode::InvalidOperation => write!(f, "INVALID_OPERATION"),
            DriverErrorCode::InvalidEnum => write!(f, "INVALID_ENUM"),
            DriverErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            DriverErrorCode::OutOfMemory => write!(f, "OUT_OF_MEMORY"),
            DriverErrorCode::InvalidFramebufferOperation => {
                write!(f, "INVALID_FRAMEBUFFER_OPERATION")
            }
            DriverErrorCode::Unknown(code) => write!(f, "UNKNOWN_ERROR({code:#06x})"),
        }
    }
}

/// One recorded driver fault: what failed, and where it was issued from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverFault {
    /// The native error code.
    pub code: DriverErrorCode,
    /// The statement that preceded the drain, as written in source.
    pub statement: &'static str,
    /// Source file of the call site.
    pub file: &'static str,
    /// Source line of the call site.
    pub line: u32,
}

/// The single structured channel every driver fault is reported through.
///
/// One instance is shared by the registry, the binding cache, and the
/// draw queue of a context. Faults accumulate until inspected with
/// [`take_faults`](DriverDiagnostics::take_faults).
#[derive(Debug, Default)]
pub struct DriverDiagnostics {
    faults: Mutex<Vec<DriverFault>>,
}

impl DriverDiagnostics {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the driver's error queue, logging and recording each entry
    /// with the given call-site context.
    pub fn poll(&self, driver: &dyn GlDriver, statement: &'static str, file: &'static str, line: u32) {
        while let Some(code) = driver.poll_error() {
            log::error!(target: "strata::driver", "{code} on `{statement}` at {file}:{line}");
            self.faults.lock().unwrap().push(DriverFault {
                code,
                statement,
                file,
                line,
            });
        }
    }

    /// Number of faults recorded since the last drain.
    pub fn fault_count(&self) -> usize {
        self.faults.lock().unwrap().len()
    }

    /// Takes all recorded faults, leaving the sink empty.
    pub fn take_faults(&self) -> Vec<DriverFault> {
        std::mem::take(&mut *self.faults.lock().unwrap())
    }
}

/// Issues a driver statement and, in debug builds, drains the driver's
/// error queue with the statement text and call site attached.
macro_rules! gl_check {
    ($diag:expr, $driver:expr, $call:expr) => {{
        let __result = $call;
        #[cfg(debug_assertions)]
        $diag.poll(&*$driver, stringify!($call), file!(), line!());
        __result
    }};
}

pub(crate) use gl_check;
