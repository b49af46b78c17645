//! Priority-ordered event dispatcher.
//!
//! Handlers subscribe to an event type string with an integer priority.
//! [`EventDispatcher::dispatch`] runs the handlers for the event's type from
//! the highest priority to the lowest and stops as soon as one of them marks
//! the event handled. Handlers with equal priority run in subscription order.
//!
//! # Threading
//!
//! Subscription and dispatch are single-threaded: handlers need not be
//! `Send`, which makes `EventDispatcher` `!Sync`. Only the deferred queue is
//! shared. [`EventDispatcher::queue_handle`] returns a [`QueueHandle`] that
//! other threads use to enqueue events, and [`EventDispatcher::process_queue`]
//! later dispatches them on the owning thread in FIFO order.
//!
//! # Mutation during dispatch
//!
//! `dispatch` works on a snapshot of the handler list, so handlers may
//! subscribe or unsubscribe while an event is in flight:
//!
//! - handlers subscribed during a dispatch first run for the next event
//! - handlers unsubscribed during a dispatch are skipped if they have not run yet
//! - a handler that dispatches an event reaching itself is skipped for the
//!   nested dispatch rather than re-entered

use crate::event::Event;
use crate::guard::SubscriptionGuard;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

/// Identifier returned by [`EventDispatcher::subscribe`].
///
/// Ids start at 1 and increase monotonically for the lifetime of the
/// dispatcher; they are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    /// The raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback slot shared between the handler table and in-flight dispatches.
struct HandlerSlot {
    active: Cell<bool>,
    callback: RefCell<Box<dyn FnMut(&mut Event)>>,
}

struct HandlerEntry {
    id: HandlerId,
    priority: i32,
    slot: Rc<HandlerSlot>,
}

impl HandlerEntry {
    fn deactivate(&self) {
        self.slot.active.set(false);
    }
}

/// Routes events to subscribed handlers in priority order.
pub struct EventDispatcher {
    /// Handlers per event type, sorted by descending priority.
    handlers: RefCell<HashMap<String, Vec<HandlerEntry>>>,
    queue: QueueHandle,
    next_id: Cell<u64>,
}

impl EventDispatcher {
    /// Create a dispatcher with no handlers and an empty queue.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(HashMap::new()),
            queue: QueueHandle::default(),
            next_id: Cell::new(1),
        }
    }

    /// Subscribe `handler` to events of `event_type`.
    ///
    /// The handler is placed after every existing handler with a priority
    /// greater than or equal to `priority`, so equal priorities keep
    /// subscription order.
    pub fn subscribe(
        &self,
        event_type: impl Into<String>,
        handler: impl FnMut(&mut Event) + 'static,
        priority: i32,
    ) -> HandlerId {
        let event_type = event_type.into();
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let entry = HandlerEntry {
            id,
            priority,
            slot: Rc::new(HandlerSlot {
                active: Cell::new(true),
                callback: RefCell::new(Box::new(handler)),
            }),
        };

        let mut handlers = self.handlers.borrow_mut();
        let list = handlers.entry(event_type.clone()).or_default();
        let position = list.partition_point(|existing| existing.priority >= priority);
        list.insert(position, entry);

        tracing::debug!(%id, event_type = %event_type, priority, "Subscribed handler");
        id
    }

    /// Subscribe and return a guard that unsubscribes when dropped.
    pub fn subscribe_guarded(
        &self,
        event_type: impl Into<String>,
        handler: impl FnMut(&mut Event) + 'static,
        priority: i32,
    ) -> SubscriptionGuard<'_> {
        let id = self.subscribe(event_type, handler, priority);
        SubscriptionGuard::new(self, id)
    }

    /// Remove the handler `id` from every event type.
    ///
    /// Returns `false` if no such handler was subscribed.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let mut removed = false;
        for list in handlers.values_mut() {
            removed |= remove_entry(list, id);
        }
        handlers.retain(|_, list| !list.is_empty());

        if removed {
            tracing::debug!(%id, "Unsubscribed handler");
        }
        removed
    }

    /// Remove the handler `id` from `event_type` only.
    ///
    /// Returns `false` if the handler was not subscribed to that type.
    pub fn unsubscribe_from(&self, event_type: &str, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(list) = handlers.get_mut(event_type) else {
            return false;
        };
        let removed = remove_entry(list, id);
        if list.is_empty() {
            handlers.remove(event_type);
        }

        if removed {
            tracing::debug!(%id, event_type, "Unsubscribed handler from event type");
        }
        removed
    }

    /// Remove every handler of `event_type` and return how many there were.
    pub fn unsubscribe_all(&self, event_type: &str) -> usize {
        let removed = self
            .handlers
            .borrow_mut()
            .remove(event_type)
            .unwrap_or_default();
        for entry in &removed {
            entry.deactivate();
        }
        tracing::debug!(event_type, count = removed.len(), "Unsubscribed all handlers");
        removed.len()
    }

    /// Remove all handlers and drop all pending events.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.handlers.borrow_mut());
        for entry in removed.values().flatten() {
            entry.deactivate();
        }
        self.queue.clear();
    }

    /// Run the handlers for `event.event_type()` in priority order.
    ///
    /// Stops before the next handler once `event.is_handled()` is true. The
    /// flag is never reset here; an event that arrives already handled runs
    /// no handlers.
    pub fn dispatch(&self, event: &mut Event) {
        let snapshot: Vec<(HandlerId, Rc<HandlerSlot>)> = {
            let handlers = self.handlers.borrow();
            let Some(list) = handlers.get(event.event_type()) else {
                tracing::trace!(event_type = event.event_type(), "No handlers for event");
                return;
            };
            list.iter()
                .map(|entry| (entry.id, Rc::clone(&entry.slot)))
                .collect()
        };

        for (id, slot) in snapshot {
            if event.is_handled() {
                break;
            }
            if !slot.active.get() {
                continue;
            }
            let Ok(mut callback) = slot.callback.try_borrow_mut() else {
                tracing::warn!(%id, event_type = event.event_type(), "Skipping re-entrant handler");
                continue;
            };
            tracing::trace!(%id, event_type = event.event_type(), "Invoking handler");
            (*callback)(event);
        }
    }

    /// Same as [`EventDispatcher::dispatch`].
    pub fn dispatch_immediate(&self, event: &mut Event) {
        self.dispatch(event);
    }

    /// Append `event` to the deferred queue.
    pub fn queue_event(&self, event: Event) {
        self.queue.queue_event(event);
    }

    /// Dispatch every queued event in FIFO order and return how many ran.
    ///
    /// The queue is swapped out under the lock and dispatched after the lock
    /// is released. Events queued while processing (by handlers or other
    /// threads) stay queued for the next call.
    pub fn process_queue(&self) -> usize {
        let pending = self.queue.take_all();
        let count = pending.len();
        for mut event in pending {
            self.dispatch(&mut event);
        }
        if count > 0 {
            tracing::debug!(count, "Processed queued events");
        }
        count
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.queue.pending_events()
    }

    /// A thread-safe handle to this dispatcher's queue.
    pub fn queue_handle(&self) -> QueueHandle {
        self.queue.clone()
    }

    /// Number of handlers subscribed to `event_type`.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.borrow().get(event_type).map_or(0, Vec::len)
    }

    /// Whether any handler is subscribed to `event_type`.
    pub fn has_handlers(&self, event_type: &str) -> bool {
        self.handler_count(event_type) > 0
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventDispatcher {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.borrow();
        let mut counts: Vec<(&str, usize)> = handlers
            .iter()
            .map(|(event_type, list)| (event_type.as_str(), list.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventDispatcher")
            .field("handlers", &counts)
            .field("pending_events", &self.pending_events())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

fn remove_entry(list: &mut Vec<HandlerEntry>, id: HandlerId) -> bool {
    let before = list.len();
    list.retain(|entry| {
        if entry.id == id {
            entry.deactivate();
            false
        } else {
            true
        }
    });
    list.len() != before
}

/// Cloneable, thread-safe handle to a dispatcher's deferred queue.
///
/// Events pushed through any handle are dispatched by the owning
/// [`EventDispatcher::process_queue`].
#[derive(Clone, Default)]
pub struct QueueHandle {
    queue: Arc<Mutex<VecDeque<Event>>>,
}

impl QueueHandle {
    /// Append `event` to the queue.
    pub fn queue_event(&self, event: Event) {
        self.lock().push_back(event);
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.lock().len()
    }

    fn take_all(&self) -> VecDeque<Event> {
        std::mem::take(&mut *self.lock())
    }

    fn clear(&self) {
        self.lock().clear();
    }

    /// Lock the queue, recovering from poisoning: the queue holds plain
    /// events, so a panic elsewhere cannot leave it inconsistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.queue.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Event queue lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl fmt::Debug for QueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueHandle")
            .field("pending_events", &self.pending_events())
            .finish()
    }
}
