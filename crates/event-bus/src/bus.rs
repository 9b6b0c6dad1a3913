use std::fmt::Debug;

use tokio::sync::broadcast;

use crate::Receiver;

pub type EventBusResult<T> = Result<T, Error>;

/// A hot, multi-subscriber broadcast bus. Every [`EventBus::subscribe`] call returns an
/// independent [`Receiver`] that observes every event sent after it was created; unlike a
/// work queue, subscribers never steal events from one another.
///
/// Cloning an `EventBus` shares the same underlying channel, so it is cheap to hand a clone
/// to each service that needs to publish or subscribe.
#[derive(Clone, Debug)]
pub struct EventBus<E> {
    tx: broadcast::Sender<E>,
}

impl<E: Clone + Send + 'static> EventBus<E> {
    /// Creates a new bus with room for `capacity` not-yet-delivered events per subscriber
    /// before that subscriber starts lagging (see [`Receiver::recv`]).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribes to the bus, returning a [`Receiver`] that observes every event published
    /// from this point on.
    pub fn subscribe(&self) -> Receiver<E> {
        Receiver::new(self.tx.subscribe())
    }

    /// Publishes an event to every current subscriber. Returns [`Error::NoSubscribers`] if
    /// there are none; callers that don't care whether anyone is listening (e.g. a decline
    /// notification) can ignore that error.
    pub fn send(&self, event: E) -> EventBusResult<()> {
        self.tx
            .send(event)
            .map(|_delivered_to| ())
            .map_err(|_| Error::NoSubscribers)
    }

    /// Number of receivers currently subscribed.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `send` was called while no subscriber was listening.
    #[error("event bus has no active subscribers")]
    NoSubscribers,
    /// The bus's sender side has been dropped.
    #[error("event bus is closed")]
    Closed,
    /// No matching event arrived before the deadline.
    #[error("timed out waiting for a matching event")]
    Timeout,
}
