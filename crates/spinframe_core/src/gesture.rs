// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag gesture interpretation.
//!
//! Pointer positions along the horizontal axis are kept in a two-sample
//! sliding window. A tick is produced only when the newest coordinate lands
//! on an exact multiple of the active interval, so tick density depends on
//! where the pointer is, not just on how far it moved.

use serde::{Deserialize, Serialize};

/// Source of a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    /// Mouse or pen
    Mouse,
    /// Touch contact
    Touch,
}

/// A raw pointer position in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Input source
    pub kind: PointerKind,
}

impl PointerSample {
    /// Create a mouse sample
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { x, y, kind: PointerKind::Mouse }
    }

    /// Create a touch sample
    pub fn touch(x: f64, y: f64) -> Self {
        Self { x, y, kind: PointerKind::Touch }
    }
}

/// Semantic direction of a gesture tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTick {
    /// Pointer moved left: next move
    Next,
    /// Pointer moved right: previous move
    Prev,
}

/// Sliding window over the two most recent coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveBuffer {
    samples: [f64; 2],
    len: usize,
}

impl MoveBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a coordinate, dropping the oldest once two are held
    pub fn push(&mut self, coord: f64) {
        if self.len < 2 {
            self.samples[self.len] = coord;
            self.len += 1;
        } else {
            self.samples = [self.samples[1], coord];
        }
    }

    /// Number of buffered samples (0, 1 or 2)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the `(older, newer)` pair once two samples are held
    pub fn pair(&self) -> Option<(f64, f64)> {
        (self.len == 2).then_some((self.samples[0], self.samples[1]))
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

/// Converts pointer motion into discrete ticks
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    buffer: MoveBuffer,
    /// Interval for mouse samples
    drag_interval: u32,
    /// Interval for touch samples
    touch_drag_interval: u32,
}

impl GestureInterpreter {
    /// Create an interpreter with the given mouse and touch intervals
    pub fn new(drag_interval: u32, touch_drag_interval: u32) -> Self {
        Self {
            buffer: MoveBuffer::new(),
            drag_interval,
            touch_drag_interval,
        }
    }

    /// Get the interval used for a pointer kind
    pub fn interval_for(&self, kind: PointerKind) -> u32 {
        match kind {
            PointerKind::Mouse => self.drag_interval,
            PointerKind::Touch => self.touch_drag_interval,
        }
    }

    /// Feed a sample relative to the viewer's left edge.
    ///
    /// Touch positions are rounded to whole pixels first.
    pub fn feed(&mut self, sample: PointerSample, origin_x: f64) -> Option<GestureTick> {
        let x = match sample.kind {
            PointerKind::Touch => sample.x.round(),
            PointerKind::Mouse => sample.x,
        };
        let coord = x - origin_x;
        self.buffer.push(coord);

        let interval = f64::from(self.interval_for(sample.kind));
        if coord % interval != 0.0 {
            return None;
        }

        let (older, newer) = self.buffer.pair()?;
        if newer < older {
            Some(GestureTick::Next)
        } else if newer > older {
            Some(GestureTick::Prev)
        } else {
            None
        }
    }

    /// Forget the current gesture
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Get the move buffer
    pub fn buffer(&self) -> &MoveBuffer {
        &self.buffer
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(1, 2)
    }
}
