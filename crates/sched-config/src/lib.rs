//! Loadable configuration for the scheduler core. Mirrors the shape (and the `config` crate
//! usage) of this codebase's node-level configuration: plain `serde::Deserialize` structs with
//! per-field defaults, assembled from a single file via [`SchedulerConfig::from_path`].
use std::path::PathBuf;

use config::Config;
use serde::Deserialize;

mod logger;
mod timeouts;

pub use logger::LoggerConfig;
pub use timeouts::TimeoutsConfig;

pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// Capacity of the event bus's broadcast channel, per subscriber, before a slow
    /// subscriber starts lagging (see `event_bus::Receiver::recv`).
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    #[serde(default)]
    pub logger: LoggerConfig,
}

fn default_event_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutsConfig::default(),
            event_channel_capacity: default_event_channel_capacity(),
            logger: LoggerConfig::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_path(path: PathBuf) -> eyre::Result<Self> {
        let config = Config::builder().add_source(config::File::from(path)).build()?;

        Ok(config.try_deserialize()?)
    }
}
