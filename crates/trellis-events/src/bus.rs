//! Application-wide event bus.
//!
//! A thin owner of one [`EventDispatcher`]. There is no global instance:
//! the application creates a bus and passes references to the parts that
//! publish or subscribe.

use crate::dispatcher::{EventDispatcher, HandlerId, QueueHandle};
use crate::event::Event;

/// Shared dispatcher for an application.
#[derive(Debug, Default)]
pub struct EventBus {
    dispatcher: EventDispatcher,
}

impl EventBus {
    /// Create a bus with an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`EventDispatcher::subscribe`].
    pub fn subscribe(
        &self,
        event_type: impl Into<String>,
        handler: impl FnMut(&mut Event) + 'static,
        priority: i32,
    ) -> HandlerId {
        self.dispatcher.subscribe(event_type, handler, priority)
    }

    /// See [`EventDispatcher::unsubscribe`].
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// See [`EventDispatcher::dispatch`].
    pub fn dispatch(&self, event: &mut Event) {
        self.dispatcher.dispatch(event);
    }

    /// See [`EventDispatcher::queue_event`].
    pub fn queue_event(&self, event: Event) {
        self.dispatcher.queue_event(event);
    }

    /// See [`EventDispatcher::process_queue`].
    pub fn process_queue(&self) -> usize {
        self.dispatcher.process_queue()
    }

    /// See [`EventDispatcher::queue_handle`].
    pub fn queue_handle(&self) -> QueueHandle {
        self.dispatcher.queue_handle()
    }

    /// The underlying dispatcher, for operations the bus does not forward.
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }
}
