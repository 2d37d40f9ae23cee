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

//! The draw queue: batched submission, state-change-minimizing
//! ordering, and processing through the binding cache.
//!
//! Commands accumulate over a frame, are reordered by a pluggable
//! [`SortStrategy`] so that commands sharing state end up adjacent, and
//! are then issued through the [`BindingCache`], which elides the binds
//! the ordering made redundant.

use crate::api::DrawCommand;
use crate::binding::BindingCache;
use crate::diag::gl_check;
use crate::error::LayerError;
use std::fmt::Debug;

/// An ordering policy over a frame's draw commands.
///
/// Implementations must be stable with respect to submission order:
/// commands that compare equal keep the order they were submitted in,
/// so batching never scrambles intra-state draw order.
pub trait SortStrategy: Debug {
    /// Reorders the slice in place.
    fn order(&self, commands: &mut [DrawCommand]);
}

/// Groups by vertex array first, then texture, then program.
///
/// The default: vertex array switches invalidate the most state, so
/// they are made rarest.
#[derive(Debug, Default)]
pub struct ArrayThenTexture;

impl SortStrategy for ArrayThenTexture {
    fn order(&self, commands: &mut [DrawCommand]) {
        if commands.len() < 2 {
            return;
        }
        commands.sort_by_key(|cmd| (cmd.vertex_array(), cmd.texture_handle(), cmd.program()));
    }
}

/// Groups by texture first, then vertex array, then program. Preferable
/// when texture uploads dominate the cost of a state switch.
#[derive(Debug, Default)]
pub struct TextureThenArray;

impl SortStrategy for TextureThenArray {
    fn order(&self, commands: &mut [DrawCommand]) {
        if commands.len() < 2 {
            return;
        }
        commands.sort_by_key(|cmd| (cmd.texture_handle(), cmd.vertex_array(), cmd.program()));
    }
}

/// A frame's worth of pending draw commands.
#[derive(Debug)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
    strategy: Box<dyn SortStrategy>,
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawQueue {
    /// Creates an empty queue ordered by [`ArrayThenTexture`].
    pub fn new() -> Self {
        Self::with_strategy(Box::new(ArrayThenTexture))
    }

    /// Creates an empty queue with the given ordering policy.
    pub fn with_strategy(strategy: Box<dyn SortStrategy>) -> Self {
        Self {
            commands: Vec::new(),
            strategy,
        }
    }

    /// Appends a command to the pending batch.
    pub fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of pending commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// `true` when no commands are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discards all pending commands without issuing them.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Orders the batch, issues every command through the cache, and
    /// empties the queue.
    ///
    /// # Errors
    ///
    /// Propagates the first bind failure. The queue is left empty
    /// either way; a batch is never partially retried.
    pub fn process(&mut self, cache: &mut BindingCache) -> Result<(), LayerError> {
        if self.commands.is_empty() {
            return Ok(());
        }
        self.strategy.order(&mut self.commands);
        log::trace!(
            target: "strata::queue",
            "processing {} draw commands",
            self.commands.len(),
        );
        for command in self.commands.drain(..) {
            cache.bind_program_handle(command.program)?;
            if let Some(binding) = command.texture {
                cache.bind_texture_handle(binding.unit, binding.target, binding.handle)?;
            }
            cache.bind_vertex_array_handle(command.vertex_array)?;
            cache.set_wireframe(command.wireframe);
            // The native count is signed; saturate rather than wrap.
            let count = i32::try_from(command.vertex_count).unwrap_or(i32::MAX);
            gl_check!(
                cache.diagnostics(),
                cache.driver().as_ref(),
                cache.driver().draw_arrays(command.primitive, 0, count)
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        PixelFormat, PrimitiveKind, RawHandle, ShaderProgram, Texture, TextureTarget, VertexArray,
    };
    use crate::diag::DriverDiagnostics;
    use crate::error::TextureError;
    use crate::test_driver::RecordingDriver;
    use crate::traits::GlDriver;
    use std::sync::Arc;

    fn new_cache() -> (Arc<RecordingDriver>, BindingCache) {
        let driver = Arc::new(RecordingDriver::new());
        let caps = driver.capabilities();
        let cache = BindingCache::new(driver.clone(), Arc::new(DriverDiagnostics::new()), &caps);
        (driver, cache)
    }

    fn command(program: u32, texture: Option<u32>, array: u32) -> DrawCommand {
        let program = ShaderProgram::new(RawHandle(program));
        let array = VertexArray::new(RawHandle(array));
        let texture = texture.map(|handle| {
            Texture::new(
                RawHandle(handle),
                TextureTarget::D2,
                4,
                4,
                1,
                PixelFormat::Rgba,
            )
        });
        DrawCommand::new(
            &program,
            texture.as_ref().map(|tex| (0, tex)),
            &array,
            PrimitiveKind::Triangles,
            3,
            false,
        )
        .unwrap()
    }

    #[test]
    fn processing_empties_the_queue() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::new();
        queue.submit(command(1, None, 2));
        queue.submit(command(1, None, 2));
        assert_eq!(queue.len(), 2);
        queue.process(&mut cache).unwrap();
        assert!(queue.is_empty());
        assert_eq!(driver.calls("draw_arrays"), 2);
    }

    #[test]
    fn shared_state_is_bound_once_per_batch() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::new();
        for _ in 0..4 {
            queue.submit(command(1, Some(9), 2));
        }
        queue.process(&mut cache).unwrap();
        assert_eq!(driver.calls("use_program"), 1);
        assert_eq!(driver.calls("bind_vertex_array"), 1);
        assert_eq!(driver.calls("bind_texture"), 1);
        assert_eq!(driver.calls("draw_arrays"), 4);
    }

    #[test]
    fn default_ordering_groups_by_vertex_array() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::new();
        // Interleaved arrays: ordering must coalesce them into two runs.
        queue.submit(command(1, None, 7));
        queue.submit(command(1, None, 8));
        queue.submit(command(1, None, 7));
        queue.submit(command(1, None, 8));
        queue.process(&mut cache).unwrap();
        assert_eq!(driver.calls("bind_vertex_array"), 2);
        assert_eq!(driver.calls("draw_arrays"), 4);
    }

    #[test]
    fn texture_first_ordering_groups_by_texture() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::with_strategy(Box::new(TextureThenArray));
        queue.submit(command(1, Some(5), 7));
        queue.submit(command(1, Some(6), 7));
        queue.submit(command(1, Some(5), 7));
        queue.submit(command(1, Some(6), 7));
        queue.process(&mut cache).unwrap();
        assert_eq!(driver.calls("bind_texture"), 2);
    }

    #[test]
    fn untextured_commands_sort_ahead_of_textured_ones() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::with_strategy(Box::new(TextureThenArray));
        queue.submit(command(1, Some(5), 7));
        queue.submit(command(1, None, 7));
        queue.process(&mut cache).unwrap();
        let events = driver.events();
        let first_draw = events.iter().position(|e| e.starts_with("draw")).unwrap();
        // The untextured command drew before any texture was bound.
        assert!(!events[..first_draw]
            .iter()
            .any(|e| e.starts_with("bind_texture")));
        assert_eq!(driver.calls("draw_arrays"), 2);
    }

    #[test]
    fn clear_discards_without_drawing() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::new();
        queue.submit(command(1, None, 2));
        queue.clear();
        queue.process(&mut cache).unwrap();
        assert_eq!(driver.calls("draw_arrays"), 0);
    }

    #[test]
    fn oversized_vertex_counts_saturate_instead_of_wrapping() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::new();
        let program = ShaderProgram::new(RawHandle(1));
        let array = VertexArray::new(RawHandle(2));
        let huge = DrawCommand::new(
            &program,
            None,
            &array,
            PrimitiveKind::Points,
            u32::MAX,
            false,
        )
        .unwrap();
        queue.submit(huge);
        queue.process(&mut cache).unwrap();
        assert_eq!(
            driver.events().last().unwrap(),
            &format!("draw_arrays Points 0 {}", i32::MAX)
        );
    }

    #[test]
    fn a_failing_command_abandons_the_batch() {
        let (driver, mut cache) = new_cache();
        let mut queue = DrawQueue::new();
        let program = ShaderProgram::new(RawHandle(1));
        let array = VertexArray::new(RawHandle(2));
        let tex = Texture::new(
            RawHandle(3),
            TextureTarget::D2,
            4,
            4,
            1,
            PixelFormat::Rgba,
        );
        // Unit beyond the mock driver's combined range.
        let bad = DrawCommand::new(
            &program,
            Some((999, &tex)),
            &array,
            PrimitiveKind::Triangles,
            3,
            false,
        )
        .unwrap();
        queue.submit(bad);
        // Sorts after the failing command (higher vertex array handle).
        queue.submit(command(1, None, 5));
        let err = queue.process(&mut cache).unwrap_err();
        assert!(matches!(
            err,
            LayerError::Texture(TextureError::UnitOutOfRange { .. })
        ));
        assert!(queue.is_empty());
        assert_eq!(driver.calls("draw_arrays"), 0);
    }
}
