#![cfg(target_os = "windows")]

//! Windows joystick backend.
//!
//! Binds the three legacy multimedia joystick entry points exported by
//! `winmm.dll`:
//! - `joyGetNumDevs` for the slot count
//! - `joyGetDevCapsW` for the capability descriptor
//! - `joyGetPosEx` for the live position
//!
//! Most users should not touch this module directly. Prefer
//! [`system_api`](crate::backends::system_api) together with
//! [`DeviceEnumerator`](crate::manager::DeviceEnumerator).

pub mod winmm;

pub use winmm::WinMmApi;
