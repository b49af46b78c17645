//! Trellis events: synchronous, priority-ordered event dispatch.
//!
//! Handlers subscribe to a type tag with a priority; dispatch runs them from
//! the highest priority down and stops once a handler marks the event
//! handled. Events may also be queued, from any thread, and processed later
//! on the dispatcher's thread.
//!
//! ```
//! use trellis_events::{Event, EventDispatcher};
//!
//! let dispatcher = EventDispatcher::new();
//! dispatcher.subscribe("click", |event: &mut Event| event.set_handled(true), 10);
//! dispatcher.subscribe("click", |_event: &mut Event| unreachable!("already handled"), 0);
//!
//! let mut event = Event::new("click");
//! dispatcher.dispatch(&mut event);
//! assert!(event.is_handled());
//! ```

pub mod bus;
pub mod dispatcher;
pub mod event;
pub mod guard;
pub mod handler;

pub use bus::EventBus;
pub use dispatcher::{EventDispatcher, HandlerId, QueueHandle};
pub use event::{
    CustomEvent, Event, EventPayload, KeyAction, KeyboardEvent, Modifiers, MouseAction,
    MouseButton, MouseEvent, Payload, UNKNOWN_EVENT_TYPE, WindowAction, WindowEvent,
};
pub use guard::SubscriptionGuard;
pub use handler::{
    BoxedHandler, ChainedHandler, DebouncedHandler, EventFilter, OnceHandler, ThrottledHandler,
    TypedHandler,
};
