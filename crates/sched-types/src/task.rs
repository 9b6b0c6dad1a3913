use crate::ids::{SlaveId, TaskId};
use crate::resource::Resource;

/// What a task actually runs: either a shell/executable command, or a container image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskSpec {
    Command(CommandSpec),
    Container(ContainerSpec),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandSpec {
    pub value: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSpec {
    pub image: String,
}

/// A caller-owned description of work to launch. Pure value; has no offer or slave bound to
/// it yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskDescriptor {
    pub name: String,
    pub resources: Vec<Resource>,
    pub spec: TaskSpec,
}

impl TaskDescriptor {
    /// Resource names this descriptor requires, for offer matching (see
    /// [`Offer::provides_all`](crate::Offer::provides_all)).
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|r| r.name.as_str())
    }
}

/// A [`TaskDescriptor`] paired with the offer that carries it: what is actually sent to the
/// driver's `launchTasks`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskInfo {
    pub name: String,
    pub task_id: TaskId,
    pub slave_id: SlaveId,
    pub resources: Vec<Resource>,
    pub spec: TaskSpec,
}

/// Lifecycle state of a launched task. [`TaskState::is_terminal`] designates the states from
/// which no further transition is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskState {
    Staging,
    Starting,
    Running,
    Finished,
    Failed,
    Killed,
    Lost,
    Error,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Failed | Self::Killed | Self::Lost | Self::Error
        )
    }
}
