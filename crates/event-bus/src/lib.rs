//! A small broadcast bus used to fan a single stream of events out to many independent
//! subscribers, each of which filters and times out on its own view of the stream.
mod bus;
mod receiver;

pub use crate::bus::{Error, EventBus, EventBusResult};
pub use crate::receiver::Receiver;
