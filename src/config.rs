//! Poller settings.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) gives the stock behavior: first joystick, text output,
//! 100 ms between polls.
//!
//! ```toml
//! interval_ms = 50
//! device = 2
//! output = "json"
//! backend = "system"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How the poller prints capabilities and states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Which joystick subsystem to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    System,
    /// Built-in simulated device.
    Virtual,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollConfig {
    pub interval_ms: u64,
    /// OS slot to read. `None` picks the first enumerated joystick.
    pub device: Option<u32>,
    pub output: OutputFormat,
    pub backend: Backend,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            device: None,
            output: OutputFormat::Text,
            backend: Backend::System,
        }
    }
}

impl PollConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(PollConfig::from_toml("").ok(), Some(PollConfig::default()));
        assert_eq!(PollConfig::default().interval(), Duration::from_millis(100));
    }

    #[test]
    fn parses_all_fields() {
        let cfg = PollConfig::from_toml(
            "interval_ms = 20\ndevice = 3\noutput = \"json\"\nbackend = \"virtual\"\n",
        )
        .expect("valid config");
        assert_eq!(cfg.interval_ms, 20);
        assert_eq!(cfg.device, Some(3));
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(cfg.backend, Backend::Virtual);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(PollConfig::from_toml("intervall_ms = 5").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        match PollConfig::load("/nonexistent/mmjoy.toml") {
            Err(Error::ConfigRead { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/mmjoy.toml"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
