// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame annotations ("pins") and the store that owns them.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a pin.
///
/// Opaque text: fresh IDs are uuid v4 strings, but any string loaded from a
/// configuration or a pin export is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(String);

impl PinId {
    /// Create a new random pin ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the ID text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PinId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PinId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Default for PinId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decimal places kept for normalized coordinates
pub const COORD_PRECISION: i32 = 6;

/// A coordinate normalized to `[0, 1]` with six decimal digits.
///
/// Serialized as a fixed-point string such as `"0.250000"`; deserializes
/// from either a string or a number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct PinCoord(f64);

impl PinCoord {
    /// Clamp to `[0, 1]` and round to six decimals
    pub fn new(value: f64) -> Self {
        let scale = 10f64.powi(COORD_PRECISION);
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        Self((value * scale).round() / scale)
    }

    /// Get the normalized value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for PinCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", COORD_PRECISION as usize, self.0)
    }
}

impl Serialize for PinCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PinCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Self::new(v)),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Self::new)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// A positioned annotation on one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Unique pin ID
    pub id: PinId,
    /// Frame the pin belongs to
    pub frame_id: usize,
    /// Horizontal position as a fraction of viewer width
    pub x: PinCoord,
    /// Vertical position as a fraction of viewer height
    pub y: PinCoord,
}

impl Pin {
    /// Create a pin with a fresh ID
    pub fn new(frame_id: usize, x: f64, y: f64) -> Self {
        Self {
            id: PinId::new(),
            frame_id,
            x: PinCoord::new(x),
            y: PinCoord::new(y),
        }
    }

    /// Pixel position of the marker inside a viewer of the given size
    pub fn position_in(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x.value() * width, self.y.value() * height)
    }
}

/// Ordered pin collection plus the recording flag that gates edits
#[derive(Debug, Clone, Default)]
pub struct PinStore {
    pins: IndexMap<PinId, Pin>,
    recording: bool,
}

impl PinStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing pins.
    ///
    /// Later duplicates of an ID replace the earlier entry in place.
    pub fn with_pins(pins: impl IntoIterator<Item = Pin>) -> Self {
        Self {
            pins: pins.into_iter().map(|p| (p.id.clone(), p)).collect(),
            recording: false,
        }
    }

    /// Check if recording mode is active
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Turn recording mode on or off
    pub fn set_recording(&mut self, active: bool) {
        self.recording = active;
    }

    /// Add a pin on a frame. Ignored unless recording.
    pub fn add_pin(&mut self, frame_id: usize, x: f64, y: f64) -> Option<PinId> {
        if !self.recording {
            return None;
        }
        let pin = Pin::new(frame_id, x, y);
        let id = pin.id.clone();
        self.pins.insert(id.clone(), pin);
        tracing::debug!("Added pin {} on frame {}", id, frame_id);
        Some(id)
    }

    /// Remove a pin by ID. Ignored unless recording.
    pub fn remove_pin(&mut self, id: &PinId) -> Option<Pin> {
        if !self.recording {
            return None;
        }
        let removed = self.pins.shift_remove(id);
        if removed.is_some() {
            tracing::debug!("Removed pin {}", id);
        }
        removed
    }

    /// Get a pin by ID
    pub fn get(&self, id: &PinId) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// Iterate pins in insertion order
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.values()
    }

    /// Pins placed on the given frame
    pub fn pins_on_frame(&self, frame_id: usize) -> impl Iterator<Item = &Pin> {
        self.pins.values().filter(move |p| p.frame_id == frame_id)
    }

    /// Copy of the collection in insertion order
    pub fn snapshot(&self) -> Vec<Pin> {
        self.pins.values().cloned().collect()
    }

    /// Number of pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Check if there are no pins
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Serialize the collection as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}
