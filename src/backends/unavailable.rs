//! Stand-in for platforms without the legacy joystick subsystem.

use crate::error::{Error, Result};
use crate::layout::{CapsBuffer, PositionBuffer};
use crate::raw::RawJoystickApi;

/// Reports zero devices and fails every query with [`Error::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableApi;

impl RawJoystickApi for UnavailableApi {
    fn device_count(&self) -> u32 {
        0
    }

    fn query_capabilities(&self, _index: u32) -> Result<CapsBuffer> {
        Err(Error::Unavailable)
    }

    fn query_position(&self, _index: u32) -> Result<PositionBuffer> {
        Err(Error::Unavailable)
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
