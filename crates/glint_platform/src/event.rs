//! Platform events and the event sink

use crate::input::InputEvent;
use crate::window::WindowId;

/// Platform events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window {
        /// Window the event belongs to
        window: WindowId,
        /// What happened
        event: WindowEvent,
    },
    /// Input event (mouse, keyboard)
    Input {
        /// Window that had input focus
        window: WindowId,
        /// The translated input
        event: InputEvent,
    },
    /// Wake-up posted with `post_empty_event`
    Empty,
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Window was resized
    Resized {
        /// New content width
        width: u32,
        /// New content height
        height: u32,
    },
    /// Window was moved
    Moved {
        /// New X position
        x: i32,
        /// New Y position
        y: i32,
    },
    /// Window close was requested (e.g., close gadget clicked)
    CloseRequested,
    /// Window gained or lost focus
    Focused(bool),
    /// Window was iconified or restored
    Iconified(bool),
    /// Window contents need to be redrawn
    Refresh,
}

/// Receiver for events produced by `poll_events`
///
/// The host library implements this to route events to its callbacks.
pub trait EventSink {
    /// Deliver one event
    fn push(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn push(&mut self, event: Event) {
        Vec::push(self, event);
    }
}
