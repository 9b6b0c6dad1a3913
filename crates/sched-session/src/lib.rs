//! Framework session lifecycle management: connect, launch tasks, track their state, kill
//! them, and disconnect. See [`Session`] for the state machine and its operations.
mod error;
mod session;
mod state;

pub use error::SessionError;
pub use session::{Session, Timeouts};
pub use state::SessionState;
