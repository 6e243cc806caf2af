//! Binary layout of the winmm joystick buffers.
//!
//! The subsystem hands back two plain C structs with no self-describing
//! schema:
//!
//! - `JOYCAPSW` (capabilities), [`CAPS_SIZE`] bytes
//! - `JOYINFOEX` (position), [`POSITION_SIZE`] bytes
//!
//! Every offset used by the decoders lives here, and every multi-byte read
//! is explicitly little-endian regardless of host byte order.
//!
//! ## Capability buffer
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | vendor id |
//! | 2 | 2 | product id |
//! | 4 | 64 | product name, 32 UTF-16 units |
//! | 68 | 76 | 19 × u32 (see [`caps_word`]) |
//! | 144 | 64 | registry key, 32 UTF-16 units |
//! | 208 | 520 | OEM driver name, 260 UTF-16 units |
//!
//! ## Position buffer
//! Thirteen consecutive u32 words (see [`pos_word`]).

use bitflags::bitflags;

/// Size of `JOYCAPSW` in bytes.
pub const CAPS_SIZE: usize = 728;
/// Size of `JOYINFOEX` in bytes.
pub const POSITION_SIZE: usize = 52;

/// Byte offsets into the capability buffer.
pub mod caps_offset {
    pub const VENDOR_ID: usize = 0;
    pub const PRODUCT_ID: usize = 2;
    pub const NAME: usize = 4;
    pub const NAME_UNITS: usize = 32;
    /// Start of the nineteen-word axis block.
    pub const AXIS_BLOCK: usize = NAME + NAME_UNITS * 2;
    pub const REG_KEY: usize = AXIS_BLOCK + super::caps_word::COUNT * 4;
    pub const REG_KEY_UNITS: usize = 32;
    pub const OEM_DRIVER: usize = REG_KEY + REG_KEY_UNITS * 2;
    pub const OEM_DRIVER_UNITS: usize = 260;
}

/// Word indices inside the capability axis block, in buffer order.
pub mod caps_word {
    pub const X_MIN: usize = 0;
    pub const X_MAX: usize = 1;
    pub const Y_MIN: usize = 2;
    pub const Y_MAX: usize = 3;
    pub const Z_MIN: usize = 4;
    pub const Z_MAX: usize = 5;
    pub const NUM_BUTTONS: usize = 6;
    pub const PERIOD_MIN: usize = 7;
    pub const PERIOD_MAX: usize = 8;
    pub const R_MIN: usize = 9;
    pub const R_MAX: usize = 10;
    pub const U_MIN: usize = 11;
    pub const U_MAX: usize = 12;
    pub const V_MIN: usize = 13;
    pub const V_MAX: usize = 14;
    pub const CAPS: usize = 15;
    pub const MAX_AXES: usize = 16;
    pub const NUM_AXES: usize = 17;
    pub const MAX_BUTTONS: usize = 18;
    pub const COUNT: usize = 19;

    /// Byte offset of a word in the capability buffer.
    #[inline]
    pub const fn offset(word: usize) -> usize {
        super::caps_offset::AXIS_BLOCK + word * 4
    }
}

/// Word indices inside the position buffer.
pub mod pos_word {
    pub const SIZE: usize = 0;
    pub const FLAGS: usize = 1;
    pub const X: usize = 2;
    pub const Y: usize = 3;
    pub const Z: usize = 4;
    pub const R: usize = 5;
    pub const U: usize = 6;
    pub const V: usize = 7;
    pub const BUTTONS: usize = 8;
    pub const BUTTON_NUMBER: usize = 9;
    pub const POV: usize = 10;
    pub const RESERVED1: usize = 11;
    pub const RESERVED2: usize = 12;
    pub const COUNT: usize = 13;

    #[inline]
    pub const fn offset(word: usize) -> usize {
        word * 4
    }
}

const _: () = assert!(caps_offset::AXIS_BLOCK == 68);
const _: () = assert!(caps_offset::OEM_DRIVER + caps_offset::OEM_DRIVER_UNITS * 2 == CAPS_SIZE);
const _: () = assert!(pos_word::COUNT * 4 == POSITION_SIZE);

bitflags! {
    /// `dwFlags` request bits for `joyGetPosEx`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RequestFlags: u32 {
        const RETURN_X = 0x0000_0001;
        const RETURN_Y = 0x0000_0002;
        const RETURN_Z = 0x0000_0004;
        const RETURN_R = 0x0000_0008;
        const RETURN_U = 0x0000_0010;
        const RETURN_V = 0x0000_0020;
        const RETURN_POV = 0x0000_0040;
        const RETURN_BUTTONS = 0x0000_0080;
        const RETURN_RAWDATA = 0x0000_0100;
        const RETURN_POVCTS = 0x0000_0200;
        const RETURN_CENTERED = 0x0000_0400;
        const USE_DEADZONE = 0x0000_0800;

        /// Every axis, the POV and the buttons. Sent verbatim on every position query.
        const RETURN_ALL = Self::RETURN_X.bits()
            | Self::RETURN_Y.bits()
            | Self::RETURN_Z.bits()
            | Self::RETURN_R.bits()
            | Self::RETURN_U.bits()
            | Self::RETURN_V.bits()
            | Self::RETURN_POV.bits()
            | Self::RETURN_BUTTONS.bits();
    }
}

/// Raw capability buffer as filled by `joyGetDevCapsW`.
#[derive(Clone, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct CapsBuffer(pub [u8; CAPS_SIZE]);

impl CapsBuffer {
    pub fn zeroed() -> Self {
        Self([0u8; CAPS_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; CAPS_SIZE] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; CAPS_SIZE] {
        &mut self.0
    }
}

impl std::fmt::Debug for CapsBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CapsBuffer({} bytes)", CAPS_SIZE)
    }
}

/// Raw position buffer as filled by `joyGetPosEx`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct PositionBuffer(pub [u8; POSITION_SIZE]);

impl PositionBuffer {
    pub fn zeroed() -> Self {
        Self([0u8; POSITION_SIZE])
    }

    /// A request buffer: `dwSize` and `dwFlags` filled in, everything else zero.
    pub fn request(flags: RequestFlags) -> Self {
        let mut buf = Self::zeroed();
        write_u32_at(&mut buf.0, pos_word::offset(pos_word::SIZE), POSITION_SIZE as u32);
        write_u32_at(&mut buf.0, pos_word::offset(pos_word::FLAGS), flags.bits());
        buf
    }

    pub fn as_bytes(&self) -> &[u8; POSITION_SIZE] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; POSITION_SIZE] {
        &mut self.0
    }
}

// Accessors. Offsets come from the tables above and are always in range for
// the fixed-size buffers they are used on.

#[inline]
pub fn read_u16_at(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

#[inline]
pub fn read_u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Read a fixed-width UTF-16 field, stopping at the first NUL or after `units`.
///
/// Unpaired surrogates are replaced with U+FFFD.
pub fn read_wide_string_at(buf: &[u8], offset: usize, units: usize) -> String {
    let wide: Vec<u16> = (0..units)
        .map(|i| read_u16_at(buf, offset + i * 2))
        .take_while(|&u| u != 0)
        .collect();
    String::from_utf16_lossy(&wide)
}

#[inline]
pub fn write_u16_at(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn write_u32_at(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Write `s` into a fixed-width UTF-16 field.
///
/// Text longer than `units` is truncated; the remainder of the field is NUL-filled.
pub fn write_wide_string_at(buf: &mut [u8], offset: usize, units: usize, s: &str) {
    let mut wide = s.encode_utf16();
    for i in 0..units {
        let unit = wide.next().unwrap_or(0);
        write_u16_at(buf, offset + i * 2, unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_struct_sizes() {
        assert_eq!(caps_offset::AXIS_BLOCK, 68);
        assert_eq!(caps_offset::REG_KEY, 144);
        assert_eq!(caps_offset::OEM_DRIVER, 208);
        assert_eq!(caps_word::offset(caps_word::MAX_BUTTONS), 140);
        assert_eq!(pos_word::offset(pos_word::POV), 40);
    }

    #[test]
    fn return_all_is_low_byte() {
        assert_eq!(RequestFlags::RETURN_ALL.bits(), 0xFF);
    }

    #[test]
    fn integers_are_little_endian() {
        let buf = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_u16_at(&buf, 0), 0x1234);
        assert_eq!(read_u32_at(&buf, 2), 0x1234_5678);
    }

    #[test]
    fn wide_string_stops_at_nul() {
        let mut buf = [0u8; 16];
        write_wide_string_at(&mut buf, 0, 8, "Pad");
        assert_eq!(read_wide_string_at(&buf, 0, 8), "Pad");
        assert_eq!(&buf[6..], &[0u8; 10]);
    }

    #[test]
    fn wide_string_without_nul_is_truncated_at_width() {
        let mut buf = [0u8; 8];
        write_wide_string_at(&mut buf, 0, 4, "Joystick");
        assert_eq!(read_wide_string_at(&buf, 0, 4), "Joys");
    }

    #[test]
    fn position_request_sets_size_and_flags() {
        let buf = PositionBuffer::request(RequestFlags::RETURN_ALL);
        assert_eq!(read_u32_at(buf.as_bytes(), 0), 52);
        assert_eq!(read_u32_at(buf.as_bytes(), 4), 0xFF);
        assert!(buf.as_bytes()[8..].iter().all(|&b| b == 0));
    }
}
