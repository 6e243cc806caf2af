//! Error types.
//!
//! The joystick subsystem fails in three ways that matter to us: it is not
//! there at all, the device index is dead, or a single query came back with
//! an error code. [`RawJoystickApi`](crate::raw::RawJoystickApi) reports
//! these as distinct [`Error`] variants so they can be logged, while the
//! public device and enumeration layers flatten them into `None` / "skip".

use std::path::PathBuf;

/// Errors produced by raw joystick queries and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The joystick subsystem is not present on this platform or failed to load.
    #[error("joystick subsystem unavailable")]
    Unavailable,

    /// The index is out of range, inactive, or the device was unplugged.
    #[error("no joystick at index {index}")]
    DeviceAbsent { index: u32 },

    /// A single query failed with a subsystem error code.
    #[error("joystick {index} query failed (code {code})")]
    ReadFailed { index: u32, code: u32 },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
