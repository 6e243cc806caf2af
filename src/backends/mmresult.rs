//! `MMRESULT` codes returned by the winmm joystick calls.
//!
//! Kept platform-independent so the mapping can be tested anywhere.

use crate::error::{Error, Result};

pub const JOYERR_NOERROR: u32 = 0;
pub const MMSYSERR_BADDEVICEID: u32 = 2;
pub const MMSYSERR_NODRIVER: u32 = 6;
pub const MMSYSERR_INVALPARAM: u32 = 11;
pub const JOYERR_PARMS: u32 = 165;
pub const JOYERR_NOCANDO: u32 = 166;
pub const JOYERR_UNPLUGGED: u32 = 167;

/// Map a winmm return code for device `index` to a typed result.
pub fn check(index: u32, code: u32) -> Result<()> {
    match code {
        JOYERR_NOERROR => Ok(()),
        MMSYSERR_NODRIVER => Err(Error::Unavailable),
        MMSYSERR_BADDEVICEID | JOYERR_PARMS | JOYERR_UNPLUGGED => {
            Err(Error::DeviceAbsent { index })
        }
        code => Err(Error::ReadFailed { index, code }),
    }
}
