use thiserror::Error;

/// An error resulting from a `submit_tasks` call.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// The underlying session operation failed (precondition violation, timeout, task
    /// failure, or driver error). Submission resolves with this cause.
    #[error(transparent)]
    Session(#[from] sched_session::SessionError),

    /// The offer subscription closed or lost events.
    #[error(transparent)]
    EventBus(#[from] event_bus::Error),
}
