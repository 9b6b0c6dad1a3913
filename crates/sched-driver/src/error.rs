use thiserror::Error;

/// An error resulting from a driver command.
#[derive(Error, Debug)]
pub enum Error {
    /// The driver rejected the call outright (e.g. launching with an unknown offer id).
    #[error("driver rejected the command: {0}")]
    Rejected(String),
    /// The underlying transport to the master is gone.
    #[error("driver is disconnected")]
    Disconnected,
    /// An I/O error occurred talking to the master.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
