//! Handler adapters.
//!
//! Each adapter wraps a callback and changes when it runs. Adapters expose
//! `call(&mut Event)` for direct use and `into_handler()` to produce a
//! closure that [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe)
//! accepts.

use crate::event::{Event, EventPayload};
use std::fmt;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// Boxed handler stored by [`ChainedHandler`].
pub type BoxedHandler = Box<dyn FnMut(&mut Event)>;

/// Opens when at least `threshold` has passed since it last opened.
#[derive(Debug, Clone)]
struct ElapsedGate {
    threshold: Duration,
    last: Option<Instant>,
}

impl ElapsedGate {
    fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    fn try_open(&mut self, now: Instant) -> bool {
        let open = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.threshold);
        if open {
            self.last = Some(now);
        }
        open
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

/// Runs the wrapped handler only if `delay` has passed since it last ran.
///
/// The first call always runs. Calls arriving sooner are dropped, not
/// deferred.
pub struct DebouncedHandler<F> {
    handler: F,
    gate: ElapsedGate,
}

impl<F: FnMut(&mut Event)> DebouncedHandler<F> {
    /// Wrap `handler` with a minimum `delay` between invocations.
    pub fn new(handler: F, delay: Duration) -> Self {
        Self {
            handler,
            gate: ElapsedGate::new(delay),
        }
    }

    /// Invoke the handler if the delay has elapsed.
    pub fn call(&mut self, event: &mut Event) {
        self.call_at(event, Instant::now());
    }

    fn call_at(&mut self, event: &mut Event, now: Instant) {
        if self.gate.try_open(now) {
            (self.handler)(event);
        }
    }

    /// Forget the last invocation so the next call runs.
    pub fn reset(&mut self) {
        self.gate.reset();
    }

    /// Convert into a closure for [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe).
    pub fn into_handler(mut self) -> impl FnMut(&mut Event) {
        move |event| self.call(event)
    }
}

impl<F> fmt::Debug for DebouncedHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedHandler")
            .field("delay", &self.gate.threshold)
            .finish_non_exhaustive()
    }
}

/// Runs the wrapped handler at most once per `interval`.
///
/// Uses the same elapsed-since-last-run gate as [`DebouncedHandler`].
pub struct ThrottledHandler<F> {
    handler: F,
    gate: ElapsedGate,
}

impl<F: FnMut(&mut Event)> ThrottledHandler<F> {
    /// Wrap `handler` so it runs at most once per `interval`.
    pub fn new(handler: F, interval: Duration) -> Self {
        Self {
            handler,
            gate: ElapsedGate::new(interval),
        }
    }

    /// Invoke the handler if the interval has elapsed.
    pub fn call(&mut self, event: &mut Event) {
        self.call_at(event, Instant::now());
    }

    fn call_at(&mut self, event: &mut Event, now: Instant) {
        if self.gate.try_open(now) {
            (self.handler)(event);
        }
    }

    /// Forget the last invocation so the next call runs.
    pub fn reset(&mut self) {
        self.gate.reset();
    }

    /// Convert into a closure for [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe).
    pub fn into_handler(mut self) -> impl FnMut(&mut Event) {
        move |event| self.call(event)
    }
}

impl<F> fmt::Debug for ThrottledHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrottledHandler")
            .field("interval", &self.gate.threshold)
            .finish_non_exhaustive()
    }
}

/// Runs the wrapped handler on the first call only.
pub struct OnceHandler<F> {
    handler: F,
    fired: bool,
}

impl<F: FnMut(&mut Event)> OnceHandler<F> {
    /// Wrap `handler` so it fires at most once.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            fired: false,
        }
    }

    /// Invoke the handler unless it has already fired.
    pub fn call(&mut self, event: &mut Event) {
        if !self.fired {
            self.fired = true;
            (self.handler)(event);
        }
    }

    /// Whether the handler has fired.
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Re-arm the handler.
    pub fn reset(&mut self) {
        self.fired = false;
    }

    /// Convert into a closure for [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe).
    pub fn into_handler(mut self) -> impl FnMut(&mut Event) {
        move |event| self.call(event)
    }
}

impl<F> fmt::Debug for OnceHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceHandler")
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

/// Runs several handlers in order, stopping once the event is handled.
///
/// ```
/// use trellis_events::{ChainedHandler, Event};
///
/// let mut chain = ChainedHandler::new()
///     .then(|event: &mut Event| event.set_data("validated", true))
///     .then(|event: &mut Event| event.set_handled(true))
///     .then(|_event: &mut Event| unreachable!("chain stops once handled"));
///
/// let mut event = Event::new("submit");
/// chain.call(&mut event);
/// assert!(event.is_handled());
/// assert_eq!(event.data::<bool>("validated"), Some(&true));
/// ```
#[derive(Default)]
pub struct ChainedHandler {
    handlers: Vec<BoxedHandler>,
}

impl ChainedHandler {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the chain.
    #[must_use]
    pub fn then(mut self, handler: impl FnMut(&mut Event) + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Run the chain on `event`.
    pub fn call(&mut self, event: &mut Event) {
        for handler in &mut self.handlers {
            if event.is_handled() {
                break;
            }
            handler(event);
        }
    }

    /// Number of handlers in the chain.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Convert into a closure for [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe).
    pub fn into_handler(mut self) -> impl FnMut(&mut Event) {
        move |event| self.call(event)
    }
}

impl fmt::Debug for ChainedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHandler")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Runs a handler only for events carrying a `T` payload.
///
/// The handler receives the event and a copy of its payload, so it may
/// mutate the event freely.
pub struct TypedHandler<T, F> {
    handler: F,
    _payload: PhantomData<fn(&T)>,
}

impl<T, F> TypedHandler<T, F>
where
    T: EventPayload,
    F: FnMut(&mut Event, &T),
{
    /// Wrap `handler`.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _payload: PhantomData,
        }
    }

    /// Invoke the handler if `event` carries a `T`.
    pub fn call(&mut self, event: &mut Event) {
        let Some(payload) = event.payload_as::<T>().cloned() else {
            return;
        };
        (self.handler)(event, &payload);
    }

    /// Convert into a closure for [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe).
    pub fn into_handler(mut self) -> impl FnMut(&mut Event) {
        move |event| self.call(event)
    }
}

impl<T, F> fmt::Debug for TypedHandler<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandler")
            .field("payload", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// Predicate over a typed payload.
///
/// A filter without a predicate accepts every event. A filter with a
/// predicate rejects events whose payload is not a `T`.
pub struct EventFilter<T> {
    predicate: Option<Box<dyn Fn(&T) -> bool>>,
}

impl<T: EventPayload> EventFilter<T> {
    /// Filter that accepts every event.
    pub fn accept_all() -> Self {
        Self { predicate: None }
    }

    /// Filter that accepts `T` payloads matching `predicate`.
    pub fn new(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            predicate: Some(Box::new(predicate)),
        }
    }

    /// Whether `event` passes the filter.
    pub fn accepts(&self, event: &Event) -> bool {
        match &self.predicate {
            None => true,
            Some(predicate) => event.payload_as::<T>().is_some_and(|payload| predicate(payload)),
        }
    }

    /// Wrap `handler` so it only runs for accepted events.
    pub fn wrap(self, mut handler: impl FnMut(&mut Event)) -> impl FnMut(&mut Event) {
        move |event| {
            if self.accepts(event) {
                handler(event);
            }
        }
    }
}

impl<T: EventPayload> Default for EventFilter<T> {
    fn default() -> Self {
        Self::accept_all()
    }
}

impl<T> fmt::Debug for EventFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFilter")
            .field("payload", &std::any::type_name::<T>())
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}
