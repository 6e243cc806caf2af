//! Position descriptor decoding (`JOYINFOEX`).
//!
//! Decoding happens in two steps:
//! 1. [`PositionReport::decode`] lifts the thirteen raw words out of the buffer.
//! 2. [`DeviceState::from_report`] renames the axes and expands the button
//!    bitmask using the button count cached from the capability descriptor.
//!
//! [`decode_state`] does both. Neither step can fail on a correctly sized buffer.

use crate::axis::{Axis, AxisMap};
use crate::layout::{pos_word, read_u32_at, write_u32_at, PositionBuffer};
use serde::Serialize;

/// `dwPOV` value meaning "hat centered".
pub const POV_CENTERED: u32 = 0xFFFF;

/// Width of the `dwButtons` bitmask.
pub const MASK_BUTTONS: u32 = 32;

/// All thirteen words of a `JOYINFOEX` buffer, unrenamed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PositionReport {
    pub size: u32,
    pub flags: u32,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub r: u32,
    pub u: u32,
    pub v: u32,
    pub buttons: u32,
    pub button_number: u32,
    pub pov: u32,
    pub reserved1: u32,
    pub reserved2: u32,
}

impl PositionReport {
    pub fn decode(buffer: &PositionBuffer) -> Self {
        let buf = buffer.as_bytes();
        let word = |w: usize| read_u32_at(buf, pos_word::offset(w));
        Self {
            size: word(pos_word::SIZE),
            flags: word(pos_word::FLAGS),
            x: word(pos_word::X),
            y: word(pos_word::Y),
            z: word(pos_word::Z),
            r: word(pos_word::R),
            u: word(pos_word::U),
            v: word(pos_word::V),
            buttons: word(pos_word::BUTTONS),
            button_number: word(pos_word::BUTTON_NUMBER),
            pov: word(pos_word::POV),
            reserved1: word(pos_word::RESERVED1),
            reserved2: word(pos_word::RESERVED2),
        }
    }

    pub fn encode(&self) -> PositionBuffer {
        let mut out = PositionBuffer::zeroed();
        let words = [
            self.size,
            self.flags,
            self.x,
            self.y,
            self.z,
            self.r,
            self.u,
            self.v,
            self.buttons,
            self.button_number,
            self.pov,
            self.reserved1,
            self.reserved2,
        ];
        for (w, value) in words.into_iter().enumerate() {
            write_u32_at(out.as_bytes_mut(), pos_word::offset(w), value);
        }
        out
    }

    /// Axis words under their canonical names (R→RX, U→RY, V→RZ).
    pub fn axes(&self) -> AxisMap<u32> {
        AxisMap::new([self.x, self.y, self.z, self.r, self.u, self.v])
    }

    pub fn set_axis(&mut self, axis: Axis, value: u32) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::RX => &mut self.r,
            Axis::RY => &mut self.u,
            Axis::RZ => &mut self.v,
        };
        *slot = value;
    }
}

/// Live readout of one joystick, produced fresh by every successful poll.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeviceState {
    /// Raw axis positions.
    pub axes: AxisMap<u32>,
    /// `buttons[b]` is bit `b` of the raw bitmask.
    pub buttons: Vec<bool>,
    /// Raw POV value; [`POV_CENTERED`] when the hat is released.
    pub pov: u32,
    /// Number of buttons currently pressed, as reported by the driver.
    pub button_number: u32,
    /// `dwFlags` as returned by the driver.
    pub flags: u32,
}

impl DeviceState {
    /// Build the caller-facing state from raw words.
    ///
    /// Exactly `button_count` buttons are exposed. Buttons past the 32-bit
    /// mask have no bit to read and are always `false`.
    pub fn from_report(report: &PositionReport, button_count: u32) -> Self {
        let buttons = (0..button_count)
            .map(|b| b < MASK_BUTTONS && report.buttons & (1u32 << b) != 0)
            .collect();
        Self {
            axes: report.axes(),
            buttons,
            pov: report.pov,
            button_number: report.button_number,
            flags: report.flags,
        }
    }

    pub fn axis(&self, axis: Axis) -> u32 {
        self.axes[axis]
    }

    /// `false` for out-of-range buttons.
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    pub fn pov_centered(&self) -> bool {
        self.pov == POV_CENTERED
    }
}

/// Decode a position buffer using the device's cached button count.
pub fn decode_state(buffer: &PositionBuffer, button_count: u32) -> DeviceState {
    DeviceState::from_report(&PositionReport::decode(buffer), button_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::POSITION_SIZE;

    #[test]
    fn decodes_words_in_buffer_order() {
        let mut raw = [0u8; POSITION_SIZE];
        for w in 0..13u32 {
            let off = w as usize * 4;
            raw[off..off + 4].copy_from_slice(&(w * 1000).to_le_bytes());
        }
        let report = PositionReport::decode(&PositionBuffer(raw));
        assert_eq!(report.size, 0);
        assert_eq!(report.flags, 1000);
        assert_eq!(report.x, 2000);
        assert_eq!(report.v, 7000);
        assert_eq!(report.buttons, 8000);
        assert_eq!(report.button_number, 9000);
        assert_eq!(report.pov, 10000);
        assert_eq!(report.reserved2, 12000);
    }

    #[test]
    fn axes_are_renamed() {
        let report = PositionReport {
            x: 1,
            y: 2,
            z: 3,
            r: 4,
            u: 5,
            v: 6,
            ..PositionReport::default()
        };
        let state = decode_state(&report.encode(), 0);
        assert_eq!(state.axis(Axis::RX), 4);
        assert_eq!(state.axis(Axis::RY), 5);
        assert_eq!(state.axis(Axis::RZ), 6);
    }

    #[test]
    fn buttons_follow_bitmask_up_to_count() {
        let report = PositionReport {
            buttons: 0b1010_0101,
            ..PositionReport::default()
        };
        let state = decode_state(&report.encode(), 4);
        assert_eq!(state.buttons, vec![true, false, true, false]);
        // Bit 5 and 7 are set but beyond the device's button count.
        assert!(!state.button(5));
    }

    #[test]
    fn zero_buttons_yields_empty_list() {
        let report = PositionReport {
            buttons: u32::MAX,
            ..PositionReport::default()
        };
        assert!(decode_state(&report.encode(), 0).buttons.is_empty());
    }

    #[test]
    fn buttons_past_the_mask_are_listed_released() {
        let report = PositionReport {
            buttons: 0x8000_0000,
            ..PositionReport::default()
        };
        let state = decode_state(&report.encode(), 40);
        assert_eq!(state.buttons.len(), 40);
        assert!(state.buttons[31]);
        assert!(!state.buttons[30]);
        assert!(state.buttons[32..].iter().all(|&b| !b));
    }

    #[test]
    fn pov_centered_is_raw_compare() {
        let mut report = PositionReport {
            pov: POV_CENTERED,
            ..PositionReport::default()
        };
        assert!(decode_state(&report.encode(), 0).pov_centered());
        report.pov = 9000;
        let state = decode_state(&report.encode(), 0);
        assert!(!state.pov_centered());
        assert_eq!(state.pov, 9000);
    }
}
