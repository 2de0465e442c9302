// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewer notifications and the listener registry.
//!
//! Listeners are invoked synchronously, in subscription order, while the
//! controller is still inside the operation that produced the event.
//! A [`Subscription`] guard removes its listener when dropped.

use crate::pin::Pin;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// Notification emitted by the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// Current frame changed to the given index
    FrameChange(usize),
    /// Sequence stepped forward one frame
    NextFrame,
    /// Sequence stepped back one frame
    PrevFrame,
    /// A "next" move was requested
    NextMove,
    /// A "previous" move was requested
    PrevMove,
    /// A drag gesture began
    DragStart,
    /// A drag gesture ended
    DragEnd,
    /// Autoplay turned on
    AutoplayStart,
    /// Autoplay turned off
    AutoplayStop,
    /// Recording turned on, with the pins at that moment
    RecordStart(Vec<Pin>),
    /// Recording turned off, with the pins at that moment
    RecordStop(Vec<Pin>),
    /// A pin was clicked outside recording mode
    PinClick(Pin),
    /// The startup hint was dismissed
    HintHide,
}

impl ViewerEvent {
    /// Get the callback-style name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::FrameChange(_) => "onFrameChange",
            Self::NextFrame => "onNextFrame",
            Self::PrevFrame => "onPrevFrame",
            Self::NextMove => "onNextMove",
            Self::PrevMove => "onPrevMove",
            Self::DragStart => "onDragStart",
            Self::DragEnd => "onDragEnd",
            Self::AutoplayStart => "onAutoplayStart",
            Self::AutoplayStop => "onAutoplayStop",
            Self::RecordStart(_) => "onRecordStart",
            Self::RecordStop(_) => "onRecordStop",
            Self::PinClick(_) => "onPinClick",
            Self::HintHide => "onHintHide",
        }
    }
}

type Callback = Arc<dyn Fn(&ViewerEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// Synchronous listener list
#[derive(Clone, Default)]
pub struct Listeners {
    registry: Arc<RwLock<Registry>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

impl Listeners {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered while the guard lives.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ViewerEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.write();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(callback)));

        Subscription {
            registry: Arc::downgrade(&self.registry),
            id: Some(id),
        }
    }

    /// Deliver an event to every listener.
    ///
    /// The list is copied first, so a listener may subscribe or drop guards
    /// without deadlocking.
    pub fn emit(&self, event: &ViewerEvent) {
        let callbacks: Vec<Callback> = self
            .registry
            .read()
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for cb in callbacks {
            cb(event);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.registry.read().entries.len()
    }

    /// Check if no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every listener
    pub fn clear(&self) {
        self.registry.write().entries.clear();
    }
}

/// Guard that unregisters its listener on drop
#[must_use = "the listener is removed as soon as the subscription is dropped"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RwLock<Registry>>,
    id: Option<u64>,
}

impl Subscription {
    /// Keep the listener registered for as long as the registry lives
    pub fn detach(mut self) {
        self.id = None;
    }

    /// Remove the listener now
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            registry.write().entries.retain(|(entry, _)| *entry != id);
        }
    }
}

#[cfg(test)]
pub(crate) fn record(listeners: &Listeners) -> (Subscription, Arc<parking_lot::Mutex<Vec<ViewerEvent>>>) {
    let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let sub = listeners.subscribe(move |e| sink.lock().push(e.clone()));
    (sub, log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_listeners_in_order() {
        let listeners = Listeners::new();
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let a = Arc::clone(&log);
        let b = Arc::clone(&log);
        let _first = listeners.subscribe(move |e| a.lock().push(("first", e.name())));
        let _second = listeners.subscribe(move |e| b.lock().push(("second", e.name())));

        listeners.emit(&ViewerEvent::NextMove);
        assert_eq!(
            *log.lock(),
            vec![("first", "onNextMove"), ("second", "onNextMove")]
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners = Listeners::new();
        let (sub, log) = record(&listeners);
        listeners.emit(&ViewerEvent::DragStart);
        drop(sub);
        listeners.emit(&ViewerEvent::DragEnd);
        assert_eq!(*log.lock(), vec![ViewerEvent::DragStart]);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_detach_keeps_listener() {
        let listeners = Listeners::new();
        let (sub, log) = record(&listeners);
        sub.detach();
        listeners.emit(&ViewerEvent::HintHide);
        assert_eq!(log.lock().len(), 1);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_guard_outliving_registry() {
        let listeners = Listeners::new();
        let (sub, _log) = record(&listeners);
        drop(listeners);
        drop(sub);
    }
}
