/// The driver's own terminal status, returned by `start`/`join` and surfaced verbatim to
/// callers of `disconnect`/`terminate`/`abort` (this layer defines no process exit codes of
/// its own).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriverStatus {
    NotStarted,
    Running,
    Stopped,
    Aborted,
    Error,
}

impl DriverStatus {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}
