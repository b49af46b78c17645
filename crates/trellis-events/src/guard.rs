//! Scoped subscriptions.

use crate::dispatcher::{EventDispatcher, HandlerId};

/// Unsubscribes its handler when dropped.
///
/// Created by [`EventDispatcher::subscribe_guarded`]. The guard borrows the
/// dispatcher, so it can never outlive it. Call [`SubscriptionGuard::release`]
/// to keep the handler subscribed past the guard's scope.
#[derive(Debug)]
#[must_use = "dropping the guard immediately unsubscribes the handler"]
pub struct SubscriptionGuard<'a> {
    dispatcher: &'a EventDispatcher,
    id: HandlerId,
    armed: bool,
}

impl<'a> SubscriptionGuard<'a> {
    pub(crate) fn new(dispatcher: &'a EventDispatcher, id: HandlerId) -> Self {
        Self {
            dispatcher,
            id,
            armed: true,
        }
    }

    /// Id of the guarded handler.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Whether dropping the guard will unsubscribe the handler.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Disarm the guard and hand back the id; the handler stays subscribed.
    pub fn release(mut self) -> HandlerId {
        self.armed = false;
        self.id
    }
}

impl Drop for SubscriptionGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.dispatcher.unsubscribe(self.id);
        }
    }
}
