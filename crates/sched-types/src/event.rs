use crate::ids::{FrameworkId, TaskId};
use crate::master::MasterInfo;
use crate::offer::Offer;
use crate::task::TaskState;

/// Everything the driver can push onto the event bus. The scheduling core only acts on a
/// subset of these per operation (see the `recv_where` predicates in `sched-session` and
/// `sched-launcher`); anything else observed on the bus is simply filtered out, not an
/// error.
#[derive(Debug, Clone)]
pub enum Event {
    /// The framework successfully registered with the master.
    Registered {
        framework_id: FrameworkId,
        master_info: MasterInfo,
    },
    /// The session was disconnected from the master.
    Disconnected,
    /// A master-side error occurred.
    MesosError { message: String },
    /// One or more resource offers are available.
    Offer { offers: Vec<Offer> },
    /// A task changed state.
    TaskEvent {
        task_id: TaskId,
        state: TaskState,
        status_message: Option<String>,
    },
    /// Any event the core does not interpret.
    Other,
}
