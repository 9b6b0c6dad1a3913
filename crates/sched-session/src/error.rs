use sched_types::TaskState;
use thiserror::Error;

use crate::state::SessionState;

/// An error resulting from a session operation.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The operation is not valid from the session's current state.
    #[error("session is in state {actual:?}, expected {expected}")]
    WrongState {
        expected: &'static str,
        actual: SessionState,
    },

    /// The session is disconnecting or already disconnected and will not accept new work.
    #[error("session is disconnected")]
    Disconnected,

    /// The operation did not observe a matching event within its deadline.
    #[error("{0}")]
    Timeout(&'static str),

    /// The master reported an error for this session.
    #[error("master reported an error: {0}")]
    Mesos(String),

    /// A task left the launch or kill watch in a state other than the one being waited for.
    #[error("task entered {state:?}: {message:?}")]
    TaskFailure {
        state: TaskState,
        message: Option<String>,
    },

    /// A compare-and-set guarding a state transition observed a state it did not expect,
    /// after having already committed to the transition (e.g. a concurrent writer raced the
    /// post-join transition back out of Disconnecting).
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The driver rejected or otherwise failed the underlying command.
    #[error(transparent)]
    Driver(#[from] sched_driver::Error),

    /// The event bus closed or lost the subscription backing this operation.
    #[error(transparent)]
    EventBus(#[from] event_bus::Error),
}
