//! Matches task descriptors against incoming resource offers and drives
//! [`sched_session::Session`]'s `launch`/`decline` calls until every descriptor has a
//! launched task. See [`TaskLauncher::submit_tasks`].
mod error;
mod filter;
mod launcher;
mod matcher;

pub use error::LauncherError;
pub use filter::{distinct_slaves, OfferFilter};
pub use launcher::TaskLauncher;
pub use matcher::{match_offers, Assignment};
