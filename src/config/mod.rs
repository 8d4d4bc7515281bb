//! Configuration for monitor sessions.
//!
//! Loading priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML config file
//! 3. Environment variables with the `D_MONITOR_` prefix (highest)

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

fn default_event_channel_capacity() -> usize {
    1
}

/// Session tuning knobs. The defaults reproduce rendezvous-style delivery:
/// the decoder hands one event at a time to the dispatch loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Bounded capacity of the supervisor -> dispatch event channel.
    /// This is the session's back-pressure point: a full channel delays
    /// further decoding instead of buffering without bound.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional file path plus environment
    /// overrides, then validate.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let config: MonitorConfig = builder
            .add_source(Environment::with_prefix("D_MONITOR").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::Message(
                "event_channel_capacity must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
