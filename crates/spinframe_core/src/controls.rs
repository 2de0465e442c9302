// SPDX-License-Identifier: MIT OR Apache-2.0
//! Imperative control surface and control-bar actions.

use serde::{Deserialize, Serialize};

/// Operations the embedding application can invoke directly
pub trait ControlSurface {
    /// Perform a "next" move
    fn next(&mut self);

    /// Perform a "previous" move
    fn prev(&mut self);

    /// Start or stop autoplay
    fn toggle_autoplay(&mut self, state: bool);

    /// Start or stop recording mode
    fn toggle_recording(&mut self, state: bool);
}

/// Control-bar button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlAction {
    /// Start autoplay
    Play,
    /// Stop autoplay
    Pause,
    /// Next move
    Next,
    /// Previous move
    Prev,
    /// Enter recording mode
    RecordStart,
    /// Leave recording mode
    RecordStop,
}

impl ControlAction {
    /// Every action, in control-bar order
    pub fn all() -> &'static [ControlAction] {
        &[
            ControlAction::Prev,
            ControlAction::Play,
            ControlAction::Pause,
            ControlAction::Next,
            ControlAction::RecordStart,
            ControlAction::RecordStop,
        ]
    }

    /// Get the button label
    pub fn label(&self) -> &'static str {
        match self {
            ControlAction::Play => "Play",
            ControlAction::Pause => "Pause",
            ControlAction::Next => "Next",
            ControlAction::Prev => "Previous",
            ControlAction::RecordStart => "Record",
            ControlAction::RecordStop => "Stop recording",
        }
    }

    /// Invoke the matching control-surface operation
    pub fn apply<S: ControlSurface + ?Sized>(self, surface: &mut S) {
        match self {
            ControlAction::Play => surface.toggle_autoplay(true),
            ControlAction::Pause => surface.toggle_autoplay(false),
            ControlAction::Next => surface.next(),
            ControlAction::Prev => surface.prev(),
            ControlAction::RecordStart => surface.toggle_recording(true),
            ControlAction::RecordStop => surface.toggle_recording(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls(Vec<String>);

    impl ControlSurface for Calls {
        fn next(&mut self) {
            self.0.push("next".into());
        }
        fn prev(&mut self) {
            self.0.push("prev".into());
        }
        fn toggle_autoplay(&mut self, state: bool) {
            self.0.push(format!("autoplay {state}"));
        }
        fn toggle_recording(&mut self, state: bool) {
            self.0.push(format!("recording {state}"));
        }
    }

    #[test]
    fn test_actions_map_to_surface() {
        let mut calls = Calls::default();
        for action in ControlAction::all() {
            action.apply(&mut calls);
        }
        assert_eq!(
            calls.0,
            vec![
                "prev",
                "autoplay true",
                "autoplay false",
                "next",
                "recording true",
                "recording false",
            ]
        );
    }
}
