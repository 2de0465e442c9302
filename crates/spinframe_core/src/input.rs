// SPDX-License-Identifier: MIT OR Apache-2.0
//! Raw input delivered by the host.

use crate::pin::PinId;
use serde::{Deserialize, Serialize};

/// Wheel delta that corresponds to one notch
pub const WHEEL_NOTCH: f64 = 120.0;

/// Viewer bounds in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Rendered width
    pub width: f64,
    /// Rendered height
    pub height: f64,
}

impl ViewerRect {
    /// Create a rect
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Check if the rect has a drawable area
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Map a host position to `[0, 1]` fractions of the rect
    pub fn normalize(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.has_area() {
            return None;
        }
        Some(((x - self.left) / self.width, (y - self.top) / self.height))
    }
}

/// One input event, in delivery order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Mouse button pressed over the viewer
    MouseDown {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Mouse moved over the viewer
    MouseMove {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Mouse button released over the viewer
    MouseUp {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Pointer entered the viewer
    MouseEnter,
    /// Pointer left the viewer
    MouseLeave,
    /// Click on the viewer surface
    Click {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Wheel scrolled over the viewer
    Wheel {
        /// Vertical delta; positive scrolls down
        delta_y: f64,
    },
    /// First touch contact
    TouchStart {
        /// Horizontal position of the first contact
        x: f64,
        /// Vertical position of the first contact
        y: f64,
    },
    /// Touch contact moved
    TouchMove {
        /// Horizontal position of the first contact
        x: f64,
        /// Vertical position of the first contact
        y: f64,
    },
    /// Touch contact lifted
    TouchEnd,
    /// Pin marker clicked
    PinClick(PinId),
    /// Pin marker double-clicked
    PinDoubleClick(PinId),
    /// Startup hint overlay pressed
    HintPress,
}
