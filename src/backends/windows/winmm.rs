#![cfg(target_os = "windows")]

//! `winmm` FFI binding.
//!
//! Buffers are passed to the OS as raw, 4-byte aligned byte arrays and then
//! decoded through the crate's offset table, so this module never reads
//! `JOYCAPSW`/`JOYINFOEX` fields itself.

use crate::backends::mmresult;
use crate::error::Result;
use crate::layout::{CapsBuffer, PositionBuffer, RequestFlags, CAPS_SIZE};
use crate::raw::RawJoystickApi;

use windows_sys::Win32::Media::Multimedia::{
    joyGetDevCapsW, joyGetNumDevs, joyGetPosEx, JOYCAPSW, JOYINFOEX,
};

const _: () = assert!(std::mem::size_of::<JOYCAPSW>() == CAPS_SIZE);
const _: () = assert!(std::mem::size_of::<JOYINFOEX>() == crate::layout::POSITION_SIZE);

/// The real legacy joystick subsystem.
#[derive(Debug, Default)]
pub struct WinMmApi {
    _priv: (),
}

impl WinMmApi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawJoystickApi for WinMmApi {
    fn device_count(&self) -> u32 {
        // SAFETY: takes no arguments and has no preconditions.
        unsafe { joyGetNumDevs() }
    }

    fn query_capabilities(&self, index: u32) -> Result<CapsBuffer> {
        let mut buf = CapsBuffer::zeroed();
        // SAFETY: `buf` is CAPS_SIZE bytes, 4-byte aligned, and outlives the call;
        // `cbjc` tells the OS exactly how much it may write.
        let code = unsafe {
            joyGetDevCapsW(
                index as _,
                buf.as_bytes_mut().as_mut_ptr().cast::<JOYCAPSW>(),
                CAPS_SIZE as u32,
            )
        };
        mmresult::check(index, code)?;
        Ok(buf)
    }

    fn query_position(&self, index: u32) -> Result<PositionBuffer> {
        // dwSize and dwFlags must be set before the call.
        let mut buf = PositionBuffer::request(RequestFlags::RETURN_ALL);
        // SAFETY: `buf` is a JOYINFOEX-sized, 4-byte aligned buffer whose
        // dwSize field matches its length.
        let code = unsafe {
            joyGetPosEx(
                index as _,
                buf.as_bytes_mut().as_mut_ptr().cast::<JOYINFOEX>(),
            )
        };
        mmresult::check(index, code)?;
        Ok(buf)
    }

    fn name(&self) -> &str {
        "winmm"
    }
}
