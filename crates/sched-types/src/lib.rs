mod driver_status;
mod event;
mod ids;
mod master;
mod offer;
mod resource;
mod task;

pub use driver_status::DriverStatus;
pub use event::Event;
pub use ids::{ExecutorId, FrameworkId, MasterId, OfferId, SlaveId, TaskId};
pub use master::MasterInfo;
pub use offer::Offer;
pub use resource::{Resource, ResourceKind};
pub use task::{CommandSpec, ContainerSpec, TaskDescriptor, TaskInfo, TaskSpec, TaskState};
