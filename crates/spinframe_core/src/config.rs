// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewer configuration.
//!
//! Every field has a default, so a RON file only needs to name what it
//! changes. The image source is the one thing that must resolve: either an
//! explicit list, or a numbered sequence with both a location and a format.

use crate::pin::Pin;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default directory for numbered images
pub const DEFAULT_LOCATION: &str = "./images";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numbered images without a format
    #[error("image format must be provided for numbered images")]
    MissingFormat,

    /// Numbered images without a location
    #[error("image location must be provided for numbered images")]
    MissingLocation,

    /// Source resolves to zero frames
    #[error("image source has no frames")]
    NoFrames,

    /// Drag interval of zero
    #[error("{name} must be at least 1")]
    InvalidInterval {
        /// Offending field
        name: &'static str,
    },

    /// Autoplay period of zero
    #[error("autoplay speed must be at least 1ms")]
    InvalidAutoplaySpeed,

    /// RON parse failure
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON write failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] ron::Error),

    /// File access failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where frame images come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageSource {
    /// `{location}/{n}.{format}` for `n` in `1..=count`
    Numbered {
        /// Directory or URL prefix
        #[serde(default = "default_location")]
        location: String,
        /// File extension, lowercased when paths are built
        #[serde(default)]
        format: Option<String>,
        /// Number of frames
        #[serde(default)]
        count: usize,
    },
    /// Explicit ordered list of image references
    List(Vec<String>),
}

impl Default for ImageSource {
    fn default() -> Self {
        Self::Numbered {
            location: default_location(),
            format: None,
            count: 0,
        }
    }
}

impl ImageSource {
    /// Create a numbered source
    pub fn numbered(location: impl Into<String>, format: impl Into<String>, count: usize) -> Self {
        Self::Numbered {
            location: location.into(),
            format: Some(format.into()),
            count,
        }
    }

    /// Number of frames this source provides
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Numbered { count, .. } => *count,
            Self::List(images) => images.len(),
        }
    }

    /// Check that the source can be resolved to at least one frame
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Numbered { location, format, count } => {
                if !format.as_deref().is_some_and(|f| !f.trim().is_empty()) {
                    return Err(ConfigError::MissingFormat);
                }
                if location.trim().is_empty() {
                    return Err(ConfigError::MissingLocation);
                }
                if *count == 0 {
                    return Err(ConfigError::NoFrames);
                }
            }
            Self::List(images) => {
                if images.is_empty() {
                    return Err(ConfigError::NoFrames);
                }
            }
        }
        Ok(())
    }

    /// Image references in frame order
    pub fn frame_paths(&self) -> Vec<String> {
        match self {
            Self::Numbered { location, format, count } => {
                let ext = format.as_deref().unwrap_or_default().to_lowercase();
                (1..=*count)
                    .map(|n| format!("{location}/{n}.{ext}"))
                    .collect()
            }
            Self::List(images) => images.clone(),
        }
    }
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Viewer behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Frame images
    pub images: ImageSource,
    /// Pins present at startup
    pub pins: Vec<Pin>,
    /// Mouse drag rotates the view
    pub draggable: bool,
    /// Show the hint overlay at startup
    pub hint_on_startup: bool,
    /// Text shown inside the hint overlay
    pub hint_text: Option<String>,
    /// Start autoplay at startup
    pub autoplay: bool,
    /// Milliseconds between autoplay ticks
    pub autoplay_speed: u64,
    /// Mouse-down or touch-start stops autoplay
    pub stop_autoplay_on_click: bool,
    /// Pointer entering the viewer stops autoplay
    pub stop_autoplay_on_mouse_enter: bool,
    /// Pointer leaving the viewer (or touch end) resumes autoplay
    pub resume_autoplay_on_mouse_leave: bool,
    /// Touch drag rotates the view
    pub touch: bool,
    /// Wheel rotates the view
    pub mousewheel: bool,
    /// Swap next/previous frame direction
    pub inverse: bool,
    /// Mouse quantization interval in pixels
    pub drag_interval: u32,
    /// Touch quantization interval in pixels
    pub touch_drag_interval: u32,
    /// End the drag when the pointer leaves the viewer
    pub mouseleave_detect: bool,
    /// Show the play/pause/step/record control bar
    pub show_control_bar: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            images: ImageSource::default(),
            pins: Vec::new(),
            draggable: true,
            hint_on_startup: false,
            hint_text: None,
            autoplay: false,
            autoplay_speed: 50,
            stop_autoplay_on_click: false,
            stop_autoplay_on_mouse_enter: false,
            resume_autoplay_on_mouse_leave: false,
            touch: true,
            mousewheel: false,
            inverse: false,
            drag_interval: 1,
            touch_drag_interval: 2,
            mouseleave_detect: false,
            show_control_bar: false,
        }
    }
}

impl ViewerConfig {
    /// Create a default configuration for the given image source
    pub fn new(images: ImageSource) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    /// Number of frames in the sequence
    pub fn frame_count(&self) -> usize {
        self.images.frame_count()
    }

    /// Check the configuration before a viewer is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.images.validate()?;
        if self.drag_interval == 0 {
            return Err(ConfigError::InvalidInterval { name: "drag_interval" });
        }
        if self.touch_drag_interval == 0 {
            return Err(ConfigError::InvalidInterval { name: "touch_drag_interval" });
        }
        if self.autoplay_speed == 0 {
            return Err(ConfigError::InvalidAutoplaySpeed);
        }
        Ok(())
    }

    /// Parse from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save as pretty RON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let content = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert!(config.draggable);
        assert!(config.touch);
        assert!(!config.autoplay);
        assert_eq!(config.autoplay_speed, 50);
        assert_eq!(config.drag_interval, 1);
        assert_eq!(config.touch_drag_interval, 2);
        assert_eq!(config.images, ImageSource::default());
    }

    #[test]
    fn test_default_source_is_unresolvable() {
        assert!(matches!(
            ViewerConfig::default().validate(),
            Err(ConfigError::MissingFormat)
        ));
    }

    #[test]
    fn test_numbered_source_validation() {
        let missing_location = ImageSource::Numbered {
            location: String::new(),
            format: Some("jpg".into()),
            count: 4,
        };
        assert!(matches!(missing_location.validate(), Err(ConfigError::MissingLocation)));
        assert!(matches!(
            ImageSource::numbered("./img", "jpg", 0).validate(),
            Err(ConfigError::NoFrames)
        ));
        assert!(ImageSource::numbered("./img", "jpg", 4).validate().is_ok());
    }

    #[test]
    fn test_list_source() {
        let source = ImageSource::List(vec!["a.png".into(), "b.png".into()]);
        assert_eq!(source.frame_count(), 2);
        assert_eq!(source.frame_paths(), vec!["a.png", "b.png"]);
        assert!(matches!(ImageSource::List(Vec::new()).validate(), Err(ConfigError::NoFrames)));
    }

    #[test]
    fn test_numbered_paths() {
        let source = ImageSource::numbered("./shoe", "JPG", 3);
        assert_eq!(
            source.frame_paths(),
            vec!["./shoe/1.jpg", "./shoe/2.jpg", "./shoe/3.jpg"]
        );
    }

    #[test]
    fn test_interval_and_speed_validation() {
        let mut config = ViewerConfig::new(ImageSource::numbered("./img", "png", 8));
        config.drag_interval = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidInterval { .. })));

        config.drag_interval = 1;
        config.autoplay_speed = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAutoplaySpeed)));
    }

    #[test]
    fn test_partial_ron() {
        let config = ViewerConfig::from_ron(
            r#"(
                images: Numbered(location: "./car", format: Some("png"), count: 36),
                autoplay: true,
                inverse: true,
            )"#,
        )
        .unwrap();
        assert_eq!(config.frame_count(), 36);
        assert!(config.autoplay);
        assert!(config.inverse);
        assert!(config.draggable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pins_with_plain_string_ids() {
        let config = ViewerConfig::from_ron(
            r#"(
                images: List(["a.jpg", "b.jpg"]),
                pins: [
                    (id: "67e55044-10b1-426f-9247-bb680e5fe0c8", frameId: 1, x: "0.5", y: "0.5"),
                    (id: "l9x2k3abc4def", frameId: 0, x: "0.25", y: "0.75"),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(config.pins.len(), 2);
        assert_eq!(config.pins[0].id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(config.pins[1].id.as_str(), "l9x2k3abc4def");
        assert_eq!(config.pins[1].y.to_string(), "0.750000");
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = ViewerConfig::new(ImageSource::List(vec!["one.webp".into()]));
        config.mousewheel = true;
        config.pins = vec![Pin::new(0, 0.5, 0.25)];
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded = ViewerConfig::from_ron(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bad_ron_is_parse_error() {
        assert!(matches!(
            ViewerConfig::from_ron("(draggable: maybe)"),
            Err(ConfigError::Parse(_))
        ));
    }
}
