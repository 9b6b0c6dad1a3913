use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::bus::Error;

/// A single subscriber's view of an [`EventBus`](crate::EventBus). Events are observed in
/// arrival order and delivery to one `Receiver` never overlaps with itself, but different
/// receivers of the same bus may be polled concurrently.
pub struct Receiver<E> {
    inner: broadcast::Receiver<E>,
}

impl<E: Clone + Send + 'static> Receiver<E> {
    pub(crate) fn new(inner: broadcast::Receiver<E>) -> Self {
        Self { inner }
    }

    /// Waits for the next event. A slow receiver that falls behind the bus's capacity skips
    /// the events it missed rather than erroring; the skip is logged and the wait continues.
    pub async fn recv(&mut self) -> Result<E, Error> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Ok(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event bus receiver lagged, skipping events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return Err(Error::Closed),
            }
        }
    }

    /// Waits for the first event matching `predicate`, optionally bounded by `deadline`.
    /// This is the timeout operator described in the design notes: a `None` deadline is
    /// used for watches that may wait arbitrarily long (e.g. a terminal-watch), while `Some`
    /// is used for the per-operation connect/launch/kill timeouts.
    pub async fn recv_where<F>(
        &mut self,
        deadline: Option<Duration>,
        mut predicate: F,
    ) -> Result<E, Error>
    where
        F: FnMut(&E) -> bool,
    {
        let wait = async {
            loop {
                let event = self.recv().await?;
                if predicate(&event) {
                    return Ok(event);
                }
            }
        };

        match deadline {
            Some(deadline) => time::timeout(deadline, wait)
                .await
                .unwrap_or(Err(Error::Timeout)),
            None => wait.await,
        }
    }
}
