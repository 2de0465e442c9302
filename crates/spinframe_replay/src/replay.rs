// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drives a viewer through a script on a virtual clock.

use crate::script::{Script, ScriptStep};
use spinframe_core::{InputEvent, ViewerController};
use std::time::Duration;

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Steps executed
    pub steps: usize,
    /// Autoplay ticks performed
    pub autoplay_ticks: u32,
    /// Virtual time elapsed
    pub elapsed: Duration,
    /// Frame shown at the end
    pub final_frame: usize,
    /// Pins at the end
    pub pin_count: usize,
}

/// Run every step of a script against a mounted viewer
pub fn run(viewer: &mut ViewerController, script: &Script) -> ReplaySummary {
    viewer.set_viewport(script.viewport);
    viewer.mount();

    let mut summary = ReplaySummary::default();
    for step in &script.steps {
        tracing::trace!("Step {}: {:?}", summary.steps, step);
        match step {
            ScriptStep::Input(event) => viewer.handle_input(event.clone()),
            ScriptStep::Wait(ms) => {
                let elapsed = Duration::from_millis(*ms);
                summary.autoplay_ticks = summary.autoplay_ticks.saturating_add(viewer.update(elapsed));
                summary.elapsed = summary.elapsed.saturating_add(elapsed);
                if let Some(left) = viewer.until_next_tick() {
                    tracing::trace!("Next autoplay tick in {:?}", left);
                }
            }
            ScriptStep::Control(action) => {
                tracing::debug!("Pressed {}", action.label());
                action.apply(&mut *viewer);
            }
            ScriptStep::Viewport(rect) => viewer.set_viewport(*rect),
            ScriptStep::ClickPin(index) | ScriptStep::DoubleClickPin(index) => {
                let Some(id) = viewer.pins().pins().nth(*index).map(|p| p.id.clone()) else {
                    tracing::warn!("Script refers to missing pin #{index}");
                    summary.steps += 1;
                    continue;
                };
                let event = if matches!(step, ScriptStep::ClickPin(_)) {
                    InputEvent::PinClick(id)
                } else {
                    InputEvent::PinDoubleClick(id)
                };
                viewer.handle_input(event);
            }
        }
        summary.steps += 1;
    }

    summary.final_frame = viewer.current_frame();
    summary.pin_count = viewer.pins().len();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use spinframe_core::{ControlAction, ImageSource, ViewerConfig, ViewerRect};
    use std::sync::Arc;

    fn viewer(frames: usize) -> ViewerController {
        ViewerController::new(ViewerConfig::new(ImageSource::numbered("./img", "jpg", frames))).unwrap()
    }

    #[test]
    fn test_drag_and_autoplay() {
        let mut v = viewer(12);
        let script = Script {
            viewport: ViewerRect::new(0.0, 0.0, 300.0, 300.0),
            steps: vec![
                ScriptStep::Input(InputEvent::MouseDown { x: 100.0, y: 10.0 }),
                ScriptStep::Input(InputEvent::MouseMove { x: 99.0, y: 10.0 }),
                ScriptStep::Input(InputEvent::MouseMove { x: 98.0, y: 10.0 }),
                ScriptStep::Input(InputEvent::MouseUp { x: 98.0, y: 10.0 }),
                ScriptStep::Control(ControlAction::Play),
                ScriptStep::Wait(120),
                ScriptStep::Control(ControlAction::Pause),
                ScriptStep::Wait(500),
            ],
        };

        let summary = run(&mut v, &script);
        assert_eq!(summary.steps, 8);
        assert_eq!(summary.autoplay_ticks, 2);
        assert_eq!(summary.final_frame, 4);
        assert_eq!(summary.elapsed, Duration::from_millis(620));
    }

    #[test]
    fn test_recording_session() {
        let mut v = viewer(12);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let _sub = v.subscribe(move |e| sink.lock().push(e.name()));

        let script = Script {
            viewport: ViewerRect::new(0.0, 0.0, 200.0, 100.0),
            steps: vec![
                ScriptStep::Control(ControlAction::RecordStart),
                ScriptStep::Input(InputEvent::Click { x: 50.0, y: 50.0 }),
                ScriptStep::Input(InputEvent::Click { x: 150.0, y: 25.0 }),
                ScriptStep::DoubleClickPin(0),
                ScriptStep::DoubleClickPin(5),
                ScriptStep::Control(ControlAction::RecordStop),
                ScriptStep::ClickPin(0),
            ],
        };

        let summary = run(&mut v, &script);
        assert_eq!(summary.pin_count, 1);
        assert_eq!(v.pins().snapshot()[0].x.to_string(), "0.750000");
        assert_eq!(
            *events.lock(),
            vec!["onRecordStart", "onRecordStop", "onPinClick"]
        );
    }

    #[test]
    fn test_autoplay_from_config_starts_on_mount() {
        let mut config = ViewerConfig::new(ImageSource::List(vec!["a".into(), "b".into(), "c".into()]));
        config.autoplay = true;
        config.autoplay_speed = 100;
        let mut v = ViewerController::new(config).unwrap();

        let script = Script {
            steps: vec![ScriptStep::Wait(250)],
            ..Script::default()
        };
        let summary = run(&mut v, &script);
        assert_eq!(summary.autoplay_ticks, 2);
        assert_eq!(summary.final_frame, 2);
    }

    #[test]
    fn test_demo_session() {
        let config = ViewerConfig::from_ron(include_str!("../demos/viewer.ron")).unwrap();
        let script = Script::from_ron(include_str!("../demos/session.ron")).unwrap();
        let mut v = ViewerController::new(config).unwrap();

        let summary = run(&mut v, &script);
        assert!(!v.hint_visible());
        assert!(!v.is_autoplay_running());
        assert_eq!(summary.autoplay_ticks, 8);
        assert_eq!(summary.final_frame, 12);
        assert_eq!(summary.pin_count, 1);
        assert_eq!(v.pins().snapshot()[0].y.to_string(), "0.750000");
    }
}
