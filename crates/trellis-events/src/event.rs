//! Event types.
//!
//! An [`Event`] is routed by its type tag. Besides the tag it carries a
//! creation timestamp, a `handled` flag that stops dispatch, an untyped
//! side-data bag, and an optional typed [`Payload`]:
//!
//! | Payload | Type tag |
//! |---------|----------|
//! | [`MouseEvent`] | `"mouse"` |
//! | [`KeyboardEvent`] | `"keyboard"` |
//! | [`WindowEvent`] | `"window"` |
//! | [`CustomEvent`] | `"custom"` |
//!
//! Events are `Send` so they can be queued from other threads.

use bitflags::bitflags;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Type tag of an event created without one.
pub const UNKNOWN_EVENT_TYPE: &str = "unknown";

/// An event routed to handlers by its type tag.
pub struct Event {
    event_type: String,
    timestamp: Instant,
    handled: bool,
    data: HashMap<String, Box<dyn Any + Send>>,
    payload: Payload,
}

impl Event {
    /// Create an event with the given type tag and no payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self::build(event_type.into(), Payload::None)
    }

    /// Create an event carrying a typed payload; the type tag comes from
    /// the payload kind.
    pub fn with_payload<T: EventPayload>(payload: T) -> Self {
        Self::build(T::EVENT_TYPE.to_string(), payload.into_payload())
    }

    fn build(event_type: String, payload: Payload) -> Self {
        Self {
            event_type,
            timestamp: Instant::now(),
            handled: false,
            data: HashMap::new(),
            payload,
        }
    }

    /// The type tag handlers are subscribed under.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// When the event was created.
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Whether a handler marked the event as handled.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark the event handled (stops further dispatch) or clear the flag
    /// before dispatching the same event again.
    pub fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    /// Store a side-data value, replacing any previous value under `key`.
    pub fn set_data<T: Any + Send>(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), Box::new(value));
    }

    /// Side-data under `key` if present and of type `T`.
    pub fn data<T: Any>(&self, key: &str) -> Option<&T> {
        self.data.get(key)?.downcast_ref::<T>()
    }

    /// Whether any side-data is stored under `key`.
    pub fn has_data(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The typed payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The payload if it is of kind `T`.
    pub fn payload_as<T: EventPayload>(&self) -> Option<&T> {
        T::from_payload(&self.payload)
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new(UNKNOWN_EVENT_TYPE)
    }
}

impl<T: EventPayload> From<T> for Event {
    fn from(payload: T) -> Self {
        Self::with_payload(payload)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("handled", &self.handled)
            .field("data_keys", &keys)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Typed data carried by an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Plain event, only the type tag and side-data.
    None,
    /// Mouse input.
    Mouse(MouseEvent),
    /// Keyboard input.
    Keyboard(KeyboardEvent),
    /// Window state change.
    Window(WindowEvent),
    /// Application-defined named event.
    Custom(CustomEvent),
}

/// A payload kind with a fixed event type tag.
pub trait EventPayload: Clone + Sized + 'static {
    /// Type tag of events carrying this payload.
    const EVENT_TYPE: &'static str;

    /// Wrap into a [`Payload`].
    fn into_payload(self) -> Payload;

    /// Borrow from a [`Payload`] of the matching kind.
    fn from_payload(payload: &Payload) -> Option<&Self>;
}

macro_rules! impl_event_payload {
    ($ty:ty, $variant:ident, $tag:literal) => {
        impl EventPayload for $ty {
            const EVENT_TYPE: &'static str = $tag;

            fn into_payload(self) -> Payload {
                Payload::$variant(self)
            }

            fn from_payload(payload: &Payload) -> Option<&Self> {
                match payload {
                    Payload::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_event_payload!(MouseEvent, Mouse, "mouse");
impl_event_payload!(KeyboardEvent, Keyboard, "keyboard");
impl_event_payload!(WindowEvent, Window, "window");
impl_event_payload!(CustomEvent, Custom, "custom");

/// Mouse button involved in a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
    /// No button (moves and scrolls)
    #[default]
    None,
}

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Button pressed
    Press,
    /// Button released
    Release,
    /// Pointer moved
    Move,
    /// Wheel scrolled
    Scroll,
}

/// Mouse input at a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// What the mouse did
    pub action: MouseAction,
    /// Button involved, if any
    pub button: MouseButton,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Scroll amount; 0 unless set.
    pub scroll_delta: f64,
}

impl MouseEvent {
    /// Mouse event at `(x, y)` with no scroll delta.
    pub fn new(action: MouseAction, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            action,
            button,
            x,
            y,
            scroll_delta: 0.0,
        }
    }

    /// Set the scroll delta.
    #[must_use]
    pub fn with_scroll_delta(mut self, delta: f64) -> Self {
        self.scroll_delta = delta;
        self
    }
}

bitflags! {
    /// Modifier keys held during a keyboard event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u32 {
        /// Shift key
        const SHIFT = 1;
        /// Control key
        const CTRL = 2;
        /// Alt key
        const ALT = 4;
    }
}

/// What the key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key pressed
    Press,
    /// Key released
    Release,
    /// Key held long enough to auto-repeat
    Repeat,
}

/// Keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// What the key did
    pub action: KeyAction,
    /// Platform key code
    pub key_code: i32,
    /// Modifier keys held at the time
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Keyboard event for `key_code` with the given modifiers.
    pub fn new(action: KeyAction, key_code: i32, modifiers: Modifiers) -> Self {
        Self {
            action,
            key_code,
            modifiers,
        }
    }

    /// Whether Shift was held.
    pub fn is_shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether Control was held.
    pub fn is_ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Whether Alt was held.
    pub fn is_alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

/// What happened to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Size changed
    Resize,
    /// Position changed
    Move,
    /// Close requested
    Close,
    /// Gained input focus
    Focus,
    /// Lost input focus
    Blur,
    /// Minimized
    Minimize,
    /// Maximized
    Maximize,
}

/// Window state change. Fields that do not apply to the action are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEvent {
    /// What happened to the window
    pub action: WindowAction,
    /// New width
    pub width: i32,
    /// New height
    pub height: i32,
    /// New horizontal position
    pub x: i32,
    /// New vertical position
    pub y: i32,
}

impl WindowEvent {
    /// Window event without size or position.
    pub fn new(action: WindowAction) -> Self {
        Self {
            action,
            width: 0,
            height: 0,
            x: 0,
            y: 0,
        }
    }

    /// Window event carrying a size, typically [`WindowAction::Resize`].
    pub fn with_size(action: WindowAction, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::new(action)
        }
    }

    /// Window event carrying a position, typically [`WindowAction::Move`].
    pub fn with_position(action: WindowAction, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::new(action)
        }
    }
}

/// Application-defined event identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEvent {
    /// Application-chosen event name
    pub name: String,
}

impl CustomEvent {
    /// Custom event with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
