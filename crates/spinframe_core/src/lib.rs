// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interaction core for 360° image-sequence viewers.
//!
//! This crate turns host input into frame changes for a turntable-style
//! viewer:
//! - Drag and touch gestures quantized into frame ticks
//! - Wheel stepping
//! - Timer-driven autoplay
//! - Frame-bound annotation pins captured in recording mode
//!
//! ## Architecture
//!
//! A single [`ViewerController`] owns all interaction state and is driven by:
//! - [`InputEvent`]s delivered by the host in order
//! - `update(elapsed)` calls that advance the autoplay clock
//! - the [`ControlSurface`] operations
//!
//! State changes are reported synchronously as [`ViewerEvent`]s to listeners
//! registered through [`Listeners`].

pub mod autoplay;
pub mod config;
pub mod controller;
pub mod controls;
pub mod event;
pub mod frame;
pub mod gesture;
pub mod input;
pub mod pin;

pub use autoplay::{AutoplayScheduler, AutoplayState};
pub use config::{ConfigError, ImageSource, ViewerConfig};
pub use controller::ViewerController;
pub use controls::{ControlAction, ControlSurface};
pub use event::{Listeners, Subscription, ViewerEvent};
pub use frame::{FrameSequencer, StepDirection};
pub use gesture::{GestureInterpreter, GestureTick, MoveBuffer, PointerKind, PointerSample};
pub use input::{InputEvent, ViewerRect};
pub use pin::{Pin, PinCoord, PinId, PinStore};
