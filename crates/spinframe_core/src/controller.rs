// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewer controller.
//!
//! Owns every piece of interaction state (frame index, move buffer, mode
//! flags, pins) and routes host input to the gesture interpreter, the
//! autoplay scheduler or the pin store depending on the active mode.
//!
//! All entry points run to completion, notifications included, before they
//! return. Gesture ticks, autoplay ticks and control calls all funnel
//! through [`ViewerController::next_move`] and
//! [`ViewerController::prev_move`].

use crate::autoplay::AutoplayScheduler;
use crate::config::{ConfigError, ViewerConfig};
use crate::controls::ControlSurface;
use crate::event::{Listeners, Subscription, ViewerEvent};
use crate::frame::{FrameSequencer, StepDirection};
use crate::gesture::{GestureInterpreter, GestureTick, PointerSample};
use crate::input::{InputEvent, ViewerRect, WHEEL_NOTCH};
use crate::pin::{Pin, PinId, PinStore};
use std::time::Duration;

/// Interaction state machine for one viewer
#[derive(Debug)]
pub struct ViewerController {
    config: ViewerConfig,
    frames: Vec<String>,
    sequencer: FrameSequencer,
    gesture: GestureInterpreter,
    autoplay: AutoplayScheduler,
    pins: PinStore,
    dragging: bool,
    hint_visible: bool,
    viewport: ViewerRect,
    listeners: Listeners,
    mounted: bool,
    disposed: bool,
}

impl ViewerController {
    /// Build a controller from a configuration.
    ///
    /// An invalid configuration is logged and returned as an error; the
    /// host should render nothing in that case.
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            tracing::error!("Invalid viewer configuration: {e}");
            return Err(e);
        }

        let frames = config.images.frame_paths();
        Ok(Self {
            sequencer: FrameSequencer::new(frames.len()),
            gesture: GestureInterpreter::new(config.drag_interval, config.touch_drag_interval),
            autoplay: AutoplayScheduler::from_millis(config.autoplay_speed),
            pins: PinStore::with_pins(config.pins.iter().cloned()),
            dragging: false,
            hint_visible: config.hint_on_startup,
            viewport: ViewerRect::default(),
            listeners: Listeners::new(),
            mounted: false,
            disposed: false,
            frames,
            config,
        })
    }

    /// Run startup behavior once listeners are attached.
    ///
    /// Starts autoplay when the configuration asks for it.
    pub fn mount(&mut self) {
        if self.mounted || self.disposed {
            return;
        }
        self.mounted = true;
        tracing::info!(
            "Mounted viewer with {} frames (autoplay: {})",
            self.sequencer.frame_count(),
            self.config.autoplay
        );
        if self.config.autoplay {
            self.toggle_autoplay(true);
        }
    }

    /// Tear down: cancel the autoplay schedule, drop listeners, ignore further input.
    ///
    /// No notifications fire during teardown.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.autoplay.stop();
        self.gesture.reset();
        self.dragging = false;
        self.listeners.clear();
        tracing::debug!("Viewer disposed");
    }

    // ========== Notifications ==========

    /// Get the listener registry
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Register a notification listener
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ViewerEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(callback)
    }

    fn emit(&self, event: ViewerEvent) {
        self.listeners.emit(&event);
    }

    // ========== State ==========

    /// Get the configuration
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.sequencer.current()
    }

    /// Get the number of frames
    pub fn frame_count(&self) -> usize {
        self.sequencer.frame_count()
    }

    /// Image references in frame order
    pub fn frame_paths(&self) -> &[String] {
        &self.frames
    }

    /// Image reference for the current frame
    pub fn current_image(&self) -> Option<&str> {
        self.frames.get(self.sequencer.current()).map(String::as_str)
    }

    /// Get the pin store
    pub fn pins(&self) -> &PinStore {
        &self.pins
    }

    /// Pins to draw on the current frame
    pub fn visible_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.pins_on_frame(self.sequencer.current())
    }

    /// Check if a drag gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Check if recording mode is active
    pub fn is_recording(&self) -> bool {
        self.pins.is_recording()
    }

    /// Check if autoplay is running
    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Time left until the next autoplay tick, if autoplay is running
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.autoplay.until_next_tick()
    }

    /// Mouse drag is allowed: enabled in config and not recording
    pub fn is_draggable(&self) -> bool {
        self.config.draggable && !self.pins.is_recording()
    }

    /// Check if the startup hint is showing
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Get the viewer bounds
    pub fn viewport(&self) -> ViewerRect {
        self.viewport
    }

    /// Update the viewer bounds used for gesture origin and pin placement
    pub fn set_viewport(&mut self, viewport: ViewerRect) {
        self.viewport = viewport;
    }

    // ========== Moves ==========

    /// Semantic "next" move; retreats instead when inverse mode is on
    pub fn next_move(&mut self) {
        if self.disposed {
            return;
        }
        self.emit(ViewerEvent::NextMove);
        self.step(self.oriented(StepDirection::Forward));
    }

    /// Semantic "previous" move; advances instead when inverse mode is on
    pub fn prev_move(&mut self) {
        if self.disposed {
            return;
        }
        self.emit(ViewerEvent::PrevMove);
        self.step(self.oriented(StepDirection::Backward));
    }

    fn oriented(&self, direction: StepDirection) -> StepDirection {
        if self.config.inverse {
            direction.reversed()
        } else {
            direction
        }
    }

    fn step(&mut self, direction: StepDirection) {
        let index = self.sequencer.step(direction);
        tracing::debug!("Frame {:?} -> {}", direction, index);
        match direction {
            StepDirection::Forward => self.emit(ViewerEvent::NextFrame),
            StepDirection::Backward => self.emit(ViewerEvent::PrevFrame),
        }
        self.emit(ViewerEvent::FrameChange(index));
    }

    // ========== Modes ==========

    /// Start or stop autoplay.
    ///
    /// Requests that do not change the state are ignored and fire nothing.
    pub fn toggle_autoplay(&mut self, state: bool) {
        if self.disposed {
            return;
        }
        if state {
            if self.autoplay.start() {
                tracing::info!("Autoplay started ({:?} period)", self.autoplay.period());
                self.emit(ViewerEvent::AutoplayStart);
            }
        } else if self.autoplay.stop() {
            tracing::info!("Autoplay stopped");
            self.emit(ViewerEvent::AutoplayStop);
        }
    }

    /// Enter or leave recording mode.
    ///
    /// Entering recording ends a drag in progress, since dragging is not
    /// allowed while recording.
    pub fn toggle_recording(&mut self, state: bool) {
        if self.disposed {
            return;
        }
        self.pins.set_recording(state);
        tracing::info!("Recording {}", if state { "started" } else { "stopped" });

        if state && self.dragging {
            self.end_drag();
        }

        let pins = self.pins.snapshot();
        if state {
            self.emit(ViewerEvent::RecordStart(pins));
        } else {
            self.emit(ViewerEvent::RecordStop(pins));
        }
    }

    /// Hide the startup hint
    pub fn hide_hint(&mut self) {
        if !self.hint_visible || self.disposed {
            return;
        }
        self.hint_visible = false;
        self.emit(ViewerEvent::HintHide);
    }

    fn start_drag(&mut self) {
        self.dragging = true;
        self.emit(ViewerEvent::DragStart);
    }

    fn end_drag(&mut self) {
        self.dragging = false;
        self.gesture.reset();
        self.emit(ViewerEvent::DragEnd);
    }

    // ========== Pins ==========

    /// Add a pin on the current frame at normalized coordinates. Ignored unless recording.
    pub fn add_pin(&mut self, x: f64, y: f64) -> Option<PinId> {
        if self.disposed {
            return None;
        }
        self.pins.add_pin(self.sequencer.current(), x, y)
    }

    /// Remove a pin. Ignored unless recording.
    pub fn remove_pin(&mut self, id: &PinId) -> Option<Pin> {
        if self.disposed {
            return None;
        }
        self.pins.remove_pin(id)
    }

    // ========== Time ==========

    /// Advance the autoplay clock; each due tick performs a next move.
    ///
    /// Returns the number of ticks performed.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        if self.disposed {
            return 0;
        }
        let due = self.autoplay.update(elapsed);
        for _ in 0..due {
            self.next_move();
        }
        due
    }

    // ========== Input ==========

    /// Route one host input event
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.disposed {
            return;
        }

        match event {
            InputEvent::MouseDown { x, y } => {
                if self.is_draggable() {
                    self.start_drag();
                    self.rotate(PointerSample::mouse(x, y));
                }
                self.stop_autoplay_on_press();
            }
            InputEvent::MouseMove { x, y } => {
                if self.is_draggable() && self.dragging {
                    self.rotate(PointerSample::mouse(x, y));
                }
            }
            InputEvent::MouseUp { .. } => {
                if self.is_draggable() {
                    self.end_drag();
                }
            }
            InputEvent::MouseEnter => {
                if self.autoplay.is_running() && self.config.stop_autoplay_on_mouse_enter {
                    self.toggle_autoplay(false);
                }
            }
            InputEvent::MouseLeave => {
                if self.is_draggable() {
                    self.gesture.reset();
                }
                self.resume_autoplay_on_leave();
                if self.config.mouseleave_detect && self.dragging {
                    self.end_drag();
                }
            }
            InputEvent::Click { x, y } => self.click(x, y),
            InputEvent::Wheel { delta_y } => {
                if !self.config.mousewheel {
                    return;
                }
                let notches = delta_y / WHEEL_NOTCH;
                if notches > 0.0 {
                    self.next_move();
                } else if notches < 0.0 {
                    self.prev_move();
                }
            }
            InputEvent::TouchStart { x, y } => {
                if self.config.touch {
                    self.start_drag();
                    self.rotate(PointerSample::touch(x, y));
                }
                self.stop_autoplay_on_press();
            }
            InputEvent::TouchMove { x, y } => {
                if self.config.touch {
                    self.rotate(PointerSample::touch(x, y));
                }
            }
            InputEvent::TouchEnd => {
                if self.config.touch {
                    self.end_drag();
                }
                self.resume_autoplay_on_leave();
            }
            InputEvent::PinClick(id) => {
                if self.pins.is_recording() {
                    return;
                }
                if let Some(pin) = self.pins.get(&id).cloned() {
                    self.emit(ViewerEvent::PinClick(pin));
                }
            }
            InputEvent::PinDoubleClick(id) => {
                self.remove_pin(&id);
            }
            InputEvent::HintPress => self.hide_hint(),
        }
    }

    fn rotate(&mut self, sample: PointerSample) {
        match self.gesture.feed(sample, self.viewport.left) {
            Some(GestureTick::Next) => self.next_move(),
            Some(GestureTick::Prev) => self.prev_move(),
            None => {}
        }
    }

    fn click(&mut self, x: f64, y: f64) {
        if !self.pins.is_recording() {
            return;
        }
        let Some((nx, ny)) = self.viewport.normalize(x, y) else {
            tracing::warn!("Ignoring pin click: viewer has no area ({:?})", self.viewport);
            return;
        };
        self.add_pin(nx, ny);
    }

    fn stop_autoplay_on_press(&mut self) {
        if self.autoplay.is_running() && self.config.stop_autoplay_on_click {
            self.toggle_autoplay(false);
        }
    }

    fn resume_autoplay_on_leave(&mut self) {
        if !self.autoplay.is_running() && self.config.resume_autoplay_on_mouse_leave {
            self.toggle_autoplay(true);
        }
    }
}

impl ControlSurface for ViewerController {
    fn next(&mut self) {
        self.next_move();
    }

    fn prev(&mut self) {
        self.prev_move();
    }

    fn toggle_autoplay(&mut self, state: bool) {
        ViewerController::toggle_autoplay(self, state);
    }

    fn toggle_recording(&mut self, state: bool) {
        ViewerController::toggle_recording(self, state);
    }
}

impl Drop for ViewerController {
    fn drop(&mut self) {
        self.dispose();
    }
}
