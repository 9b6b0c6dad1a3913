//! The driver is the low-level collaborator that serializes calls to the master and turns
//! its callbacks into events on the bus (see the [`event-bus`](../event_bus/index.html)
//! crate). It is explicitly out of scope for this repository (§1 of the design): this
//! crate only pins down the boundary it presents to the session manager and task launcher,
//! plus a mock for exercising both against it.
mod error;

pub use error::Error;

use async_trait::async_trait;
use sched_types::{DriverStatus, OfferId, TaskId, TaskInfo};

/// A handle for driving a scheduler session. Implementations are expected to be safe for
/// concurrent command invocation; none of these methods take `&mut self`.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Starts the driver's internal loop. Does not imply registration with the master has
    /// completed; that is signalled asynchronously via `Event::Registered` on the bus.
    async fn start(&self) -> Result<DriverStatus, Error>;

    /// Requests a graceful stop. If `failover` is true the framework may be re-offered its
    /// running tasks by a later session with the same framework id.
    async fn stop(&self, failover: bool) -> Result<(), Error>;

    /// Requests an immediate, ungraceful stop.
    async fn abort(&self) -> Result<(), Error>;

    /// Blocks until the driver's internal loop has fully exited. Callers must run this on
    /// an executor that tolerates blocking.
    async fn join(&self) -> Result<DriverStatus, Error>;

    /// Launches `tasks` against `offer_ids`. May fail synchronously if the master rejects
    /// the call outright; a synchronous failure here does not resolve any per-task result
    /// (see `sched-session`'s launch-watch).
    async fn launch_tasks(&self, offer_ids: Vec<OfferId>, tasks: Vec<TaskInfo>)
        -> Result<(), Error>;

    /// Declines an offer. Fire-and-forget; the master does not acknowledge.
    async fn decline_offer(&self, offer_id: OfferId) -> Result<(), Error>;

    /// Requests that a running task be killed.
    async fn kill_task(&self, task_id: TaskId) -> Result<(), Error>;
}

#[cfg(any(test, feature = "mocks"))]
mockall::mock! {
    pub Driver {}

    #[async_trait]
    impl Driver for Driver {
        async fn start(&self) -> Result<DriverStatus, Error>;
        async fn stop(&self, failover: bool) -> Result<(), Error>;
        async fn abort(&self) -> Result<(), Error>;
        async fn join(&self) -> Result<DriverStatus, Error>;
        async fn launch_tasks(&self, offer_ids: Vec<OfferId>, tasks: Vec<TaskInfo>) -> Result<(), Error>;
        async fn decline_offer(&self, offer_id: OfferId) -> Result<(), Error>;
        async fn kill_task(&self, task_id: TaskId) -> Result<(), Error>;
    }
}
