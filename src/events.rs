//! Page events and effects.
//!
//! [`PageEvent`] is everything the browser would hand the page script;
//! [`Effect`] is everything the script would do back to the document. The
//! engine in between is pure: events in, effects out, no other channel.

use serde::{Deserialize, Serialize};

/// A browser-originated event, as it appears in a trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Initial page load; runs the reveal pass once.
    Load,
    /// Scroll to vertical offset `y`.
    Scroll { y: i64 },
    /// The carousel interval fired.
    Tick,
    /// Click on the element with id `anchor`.
    Click { anchor: String },
    PointerEnter { target: String },
    PointerLeave { target: String },
    /// The demo video started (or resumed) playing at `time` seconds.
    MediaPlay { time: f64 },
    /// The demo video paused at `time` seconds.
    MediaPause { time: f64 },
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Load => EventKind::Load,
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Tick => EventKind::Tick,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::PointerEnter { .. } => EventKind::PointerEnter,
            PageEvent::PointerLeave { .. } => EventKind::PointerLeave,
            PageEvent::MediaPlay { .. } => EventKind::MediaPlay,
            PageEvent::MediaPause { .. } => EventKind::MediaPause,
        }
    }
}

/// Event discriminant used to key the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Load,
    Scroll,
    Tick,
    Click,
    PointerEnter,
    PointerLeave,
    MediaPlay,
    MediaPause,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Load => "load",
            EventKind::Scroll => "scroll",
            EventKind::Tick => "tick",
            EventKind::Click => "click",
            EventKind::PointerEnter => "pointer_enter",
            EventKind::PointerLeave => "pointer_leave",
            EventKind::MediaPlay => "media_play",
            EventKind::MediaPause => "media_pause",
        }
    }
}

/// A described DOM mutation. Applying these to a real document is a browser
/// adapter's job; the engine only emits them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    AddClass { target: String, class: String },
    RemoveClass { target: String, class: String },
    SetStyle {
        target: String,
        property: String,
        value: String,
    },
    ClearStyle { target: String, property: String },
    /// Suppress the browser's default handling of the event.
    PreventDefault,
    /// Smooth-scroll the target element into view.
    ScrollIntoView { target: String },
}

impl Effect {
    pub fn add_class(target: &str, class: &str) -> Self {
        Effect::AddClass {
            target: target.to_string(),
            class: class.to_string(),
        }
    }

    pub fn remove_class(target: &str, class: &str) -> Self {
        Effect::RemoveClass {
            target: target.to_string(),
            class: class.to_string(),
        }
    }

    pub fn set_style(target: &str, property: &str, value: &str) -> Self {
        Effect::SetStyle {
            target: target.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        }
    }

    pub fn clear_style(target: &str, property: &str) -> Self {
        Effect::ClearStyle {
            target: target.to_string(),
            property: property.to_string(),
        }
    }
}
