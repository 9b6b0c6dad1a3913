/// The session's lifecycle. All transitions go through [`Session`](crate::Session)'s
/// compare-and-set helpers; reads taken outside of a CAS are hints only and are
/// re-validated by the next mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}
