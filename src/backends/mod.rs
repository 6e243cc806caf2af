//! Joystick subsystem backends.
//!
//! Implementations of [`RawJoystickApi`](crate::raw::RawJoystickApi):
//! - **`windows`** — the real `winmm` binding (Windows only)
//! - **`unavailable`** — what every other platform gets: zero devices
//! - **`virtual_input`** — an in-memory subsystem for tests and demos
//!   (feature `virtual`, on by default)
//!
//! The API handle is an ordinary value. Create it once with [`system_api`]
//! (or build a virtual one) and pass it to
//! [`DeviceEnumerator`](crate::manager::DeviceEnumerator).

use crate::raw::RawJoystickApi;
use std::sync::Arc;

pub mod mmresult;
pub mod unavailable;

#[cfg(any(test, feature = "virtual"))]
#[cfg_attr(docsrs, doc(cfg(feature = "virtual")))]
pub mod virtual_input;

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;

/// The platform's joystick subsystem.
///
/// On Windows this is `winmm`; elsewhere it is [`unavailable::UnavailableApi`].
pub fn system_api() -> Arc<dyn RawJoystickApi> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::WinMmApi::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(unavailable::UnavailableApi)
    }
}
