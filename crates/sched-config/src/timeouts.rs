use std::time::Duration;

use sched_session::Timeouts;
use serde::Deserialize;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LAUNCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_KILL_TIMEOUT_SECS: u64 = 30;

/// Per-operation deadlines for the session manager, counted in seconds from when the
/// corresponding event subscription is armed.
#[derive(Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_launch_timeout_secs")]
    pub launch_timeout_secs: u64,
    #[serde(default = "default_kill_timeout_secs")]
    pub kill_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_launch_timeout_secs() -> u64 {
    DEFAULT_LAUNCH_TIMEOUT_SECS
}

fn default_kill_timeout_secs() -> u64 {
    DEFAULT_KILL_TIMEOUT_SECS
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            launch_timeout_secs: default_launch_timeout_secs(),
            kill_timeout_secs: default_kill_timeout_secs(),
        }
    }
}

impl From<TimeoutsConfig> for Timeouts {
    fn from(config: TimeoutsConfig) -> Self {
        Self {
            connect: Duration::from_secs(config.connect_timeout_secs),
            launch: Duration::from_secs(config.launch_timeout_secs),
            kill: Duration::from_secs(config.kill_timeout_secs),
        }
    }
}
