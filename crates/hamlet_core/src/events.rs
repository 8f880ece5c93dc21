//! Synchronous change notification.
//!
//! Every structural mutation of the registry (a cell added or destroyed)
//! broadcasts the full live cell sequence. Subscribers run in-line, in
//! subscription order, before the mutating call returns.

use crate::cells::Cell;

/// Handle returned by [`ChangeChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Cell])>;

/// Broadcast channel for "cells changed" notifications.
#[derive(Default)]
pub struct ChangeChannel {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl ChangeChannel {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&[Cell]) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Deliver `cells` to every subscriber.
    pub fn notify(&mut self, cells: &[Cell]) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(cells);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for ChangeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeChannel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
