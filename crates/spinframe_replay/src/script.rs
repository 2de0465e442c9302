// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input scripts.
//!
//! A script is a RON document listing host events in delivery order,
//! interleaved with clock advances:
//!
//! ```ron
//! (
//!     viewport: (left: 0.0, top: 0.0, width: 400.0, height: 300.0),
//!     steps: [
//!         Input(MouseDown(x: 120.0, y: 40.0)),
//!         Input(MouseMove(x: 119.0, y: 40.0)),
//!         Input(MouseUp(x: 119.0, y: 40.0)),
//!         Control(Play),
//!         Wait(500),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};
use spinframe_core::{ConfigError, ControlAction, InputEvent, ViewerRect};
use std::path::Path;
use thiserror::Error;

/// Replay errors
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Viewer configuration could not be used
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Script could not be parsed
    #[error("Script parse error: {0}")]
    Script(#[from] ron::error::SpannedError),

    /// Pin export failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// One scripted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptStep {
    /// Deliver a host input event
    Input(InputEvent),
    /// Advance the clock by the given milliseconds
    Wait(u64),
    /// Press a control-bar button
    Control(ControlAction),
    /// Resize or move the viewer
    Viewport(ViewerRect),
    /// Click the pin at this position in the collection
    ClickPin(usize),
    /// Double-click the pin at this position in the collection
    DoubleClickPin(usize),
}

/// A replayable input script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Initial viewer bounds
    pub viewport: ViewerRect,
    /// Steps in order
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Total scripted clock time in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| match step {
                ScriptStep::Wait(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = Script::from_ron(
            r#"(
                viewport: (left: 10.0, top: 0.0, width: 400.0, height: 300.0),
                steps: [
                    Input(MouseDown(x: 120.0, y: 40.0)),
                    Input(Wheel(delta_y: -120.0)),
                    Input(MouseLeave),
                    Control(Play),
                    Wait(250),
                    DoubleClickPin(0),
                    Wait(50),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(script.viewport.left, 10.0);
        assert_eq!(script.steps.len(), 7);
        assert_eq!(script.steps[0], ScriptStep::Input(InputEvent::MouseDown { x: 120.0, y: 40.0 }));
        assert_eq!(script.steps[3], ScriptStep::Control(ControlAction::Play));
        assert_eq!(script.duration_ms(), 300);
    }

    #[test]
    fn test_empty_script() {
        let script = Script::from_ron("()").unwrap();
        assert!(script.steps.is_empty());
        assert_eq!(script.viewport, ViewerRect::default());
    }

    #[test]
    fn test_unknown_step_is_error() {
        assert!(matches!(
            Script::from_ron("(steps: [Teleport(3)])"),
            Err(ReplayError::Script(_))
        ));
    }
}
