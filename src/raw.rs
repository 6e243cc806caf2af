//! The raw joystick subsystem seam.
//!
//! Everything above this trait is platform-independent. Implementations live
//! in [`backends`](crate::backends): the real `winmm` binding on Windows, a
//! stand-in that is always unavailable elsewhere, and a scriptable virtual
//! subsystem for tests and demos.

use crate::error::Result;
use crate::layout::{CapsBuffer, PositionBuffer};

/// The three entry points of the legacy joystick subsystem.
///
/// Every call blocks on the OS and is independent of previous calls; nothing
/// is cached at this level.
pub trait RawJoystickApi: Send + Sync {
    /// Number of joystick slots the subsystem supports.
    ///
    /// Never fails. A missing subsystem reports `0`.
    fn device_count(&self) -> u32;

    /// Fetch the capability descriptor of the device at `index`.
    fn query_capabilities(&self, index: u32) -> Result<CapsBuffer>;

    /// Fetch the current position of the device at `index`.
    ///
    /// Implementations request every axis, the POV and the buttons
    /// ([`RequestFlags::RETURN_ALL`](crate::layout::RequestFlags::RETURN_ALL)).
    fn query_position(&self, index: u32) -> Result<PositionBuffer>;

    /// Short backend label for logs.
    fn name(&self) -> &str;
}
