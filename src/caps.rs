//! Capability descriptor decoding (`JOYCAPSW`).
//!
//! [`decode_capabilities`] turns the 728-byte buffer returned by
//! `joyGetDevCapsW` into a [`Capabilities`] value. The decoder trusts the
//! buffer verbatim: it performs no cross-checks (e.g. `button_count` versus
//! `max_buttons`) and never fails on a correctly sized buffer.
//!
//! [`Capabilities::encode`] is the inverse and is what the virtual backend
//! hands out when it is queried.

use crate::axis::{Axis, AxisMap, ChannelDesc, ChannelKind};
use crate::layout::{
    caps_offset, caps_word, read_u16_at, read_u32_at, read_wide_string_at, write_u16_at,
    write_u32_at, write_wide_string_at, CapsBuffer,
};
use bitflags::bitflags;
use serde::Serialize;

/// Reported inclusive range for one analog axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ChannelExtent {
    pub min: u32,
    pub max: u32,
}

impl ChannelExtent {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

bitflags! {
    /// `wCaps` word of `JOYCAPSW`.
    ///
    /// Unknown bits are retained so the raw word survives a round trip.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct CapsFlags: u32 {
        const HAS_Z = 0x01;
        const HAS_R = 0x02;
        const HAS_U = 0x04;
        const HAS_V = 0x08;
        const HAS_POV = 0x10;
        const POV_4DIR = 0x20;
        const POV_CTS = 0x40;

        const _ = !0;
    }
}

impl Default for CapsFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Static description of one joystick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Product name, at most 32 UTF-16 units.
    pub name: String,
    pub axes: AxisMap<ChannelExtent>,
    /// `wNumButtons`, taken as-is.
    pub button_count: u32,
    /// Minimum polling period in milliseconds while captured.
    pub period_min: u32,
    pub period_max: u32,
    pub flags: CapsFlags,
    pub max_axes: u32,
    pub num_axes: u32,
    pub max_buttons: u32,
    /// Registry key of the driver, at most 32 UTF-16 units.
    pub reg_key: String,
    /// OEM driver name, at most 260 UTF-16 units.
    pub oem_driver: String,
}

/// Decode a capability buffer.
pub fn decode_capabilities(buffer: &CapsBuffer) -> Capabilities {
    let buf = buffer.as_bytes();
    let word = |w: usize| read_u32_at(buf, caps_word::offset(w));
    let extent = |min: usize, max: usize| ChannelExtent::new(word(min), word(max));

    Capabilities {
        vendor_id: read_u16_at(buf, caps_offset::VENDOR_ID),
        product_id: read_u16_at(buf, caps_offset::PRODUCT_ID),
        name: read_wide_string_at(buf, caps_offset::NAME, caps_offset::NAME_UNITS),
        axes: AxisMap::new([
            extent(caps_word::X_MIN, caps_word::X_MAX),
            extent(caps_word::Y_MIN, caps_word::Y_MAX),
            extent(caps_word::Z_MIN, caps_word::Z_MAX),
            extent(caps_word::R_MIN, caps_word::R_MAX),
            extent(caps_word::U_MIN, caps_word::U_MAX),
            extent(caps_word::V_MIN, caps_word::V_MAX),
        ]),
        button_count: word(caps_word::NUM_BUTTONS),
        period_min: word(caps_word::PERIOD_MIN),
        period_max: word(caps_word::PERIOD_MAX),
        flags: CapsFlags::from_bits_retain(word(caps_word::CAPS)),
        max_axes: word(caps_word::MAX_AXES),
        num_axes: word(caps_word::NUM_AXES),
        max_buttons: word(caps_word::MAX_BUTTONS),
        reg_key: read_wide_string_at(buf, caps_offset::REG_KEY, caps_offset::REG_KEY_UNITS),
        oem_driver: read_wide_string_at(
            buf,
            caps_offset::OEM_DRIVER,
            caps_offset::OEM_DRIVER_UNITS,
        ),
    }
}

impl Capabilities {
    /// Lay the descriptor back out as a `JOYCAPSW` buffer.
    ///
    /// Strings longer than their field are truncated.
    pub fn encode(&self) -> CapsBuffer {
        let mut out = CapsBuffer::zeroed();
        let buf = out.as_bytes_mut();

        write_u16_at(buf, caps_offset::VENDOR_ID, self.vendor_id);
        write_u16_at(buf, caps_offset::PRODUCT_ID, self.product_id);
        write_wide_string_at(buf, caps_offset::NAME, caps_offset::NAME_UNITS, &self.name);

        let words: [(usize, u32); caps_word::COUNT] = [
            (caps_word::X_MIN, self.axes[Axis::X].min),
            (caps_word::X_MAX, self.axes[Axis::X].max),
            (caps_word::Y_MIN, self.axes[Axis::Y].min),
            (caps_word::Y_MAX, self.axes[Axis::Y].max),
            (caps_word::Z_MIN, self.axes[Axis::Z].min),
            (caps_word::Z_MAX, self.axes[Axis::Z].max),
            (caps_word::NUM_BUTTONS, self.button_count),
            (caps_word::PERIOD_MIN, self.period_min),
            (caps_word::PERIOD_MAX, self.period_max),
            (caps_word::R_MIN, self.axes[Axis::RX].min),
            (caps_word::R_MAX, self.axes[Axis::RX].max),
            (caps_word::U_MIN, self.axes[Axis::RY].min),
            (caps_word::U_MAX, self.axes[Axis::RY].max),
            (caps_word::V_MIN, self.axes[Axis::RZ].min),
            (caps_word::V_MAX, self.axes[Axis::RZ].max),
            (caps_word::CAPS, self.flags.bits()),
            (caps_word::MAX_AXES, self.max_axes),
            (caps_word::NUM_AXES, self.num_axes),
            (caps_word::MAX_BUTTONS, self.max_buttons),
        ];
        for (w, value) in words {
            write_u32_at(buf, caps_word::offset(w), value);
        }

        write_wide_string_at(
            buf,
            caps_offset::REG_KEY,
            caps_offset::REG_KEY_UNITS,
            &self.reg_key,
        );
        write_wide_string_at(
            buf,
            caps_offset::OEM_DRIVER,
            caps_offset::OEM_DRIVER_UNITS,
            &self.oem_driver,
        );
        out
    }

    /// Channel list for UIs: six axes with their raw extents, one entry per
    /// button, and a hat when the device reports a POV.
    pub fn describe(&self) -> Vec<ChannelDesc> {
        let mut out = Vec::new();

        for (i, (axis, ext)) in self.axes.iter().enumerate() {
            out.push(ChannelDesc {
                kind: ChannelKind::Axis,
                idx: i as u16,
                name: axis.name().to_string(),
                logical_min: ext.min,
                logical_max: ext.max,
            });
        }

        for b in 0..self.button_count {
            out.push(ChannelDesc {
                kind: ChannelKind::Button,
                idx: b as u16,
                name: format!("Button {}", b + 1),
                logical_min: 0,
                logical_max: 1,
            });
        }

        if self.flags.contains(CapsFlags::HAS_POV) {
            // POV is reported in hundredths of a degree.
            out.push(ChannelDesc {
                kind: ChannelKind::Hat,
                idx: 0,
                name: "POV".to_string(),
                logical_min: 0,
                logical_max: 35900,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CAPS_SIZE;

    fn sample() -> Capabilities {
        Capabilities {
            vendor_id: 0x044f,
            product_id: 0xb10a,
            name: "T.16000M".into(),
            axes: AxisMap::new([
                ChannelExtent::new(0, 65535),
                ChannelExtent::new(0, 65535),
                ChannelExtent::new(0, 255),
                ChannelExtent::new(0, 0),
                ChannelExtent::new(0, 0),
                ChannelExtent::new(0, 1023),
            ]),
            button_count: 16,
            period_min: 10,
            period_max: 1000,
            flags: CapsFlags::HAS_Z | CapsFlags::HAS_V | CapsFlags::HAS_POV,
            max_axes: 6,
            num_axes: 4,
            max_buttons: 32,
            reg_key: "DINPUT.DLL".into(),
            oem_driver: String::new(),
        }
    }

    #[test]
    fn decodes_hand_laid_buffer() {
        let mut raw = [0u8; CAPS_SIZE];
        raw[0..2].copy_from_slice(&0x046du16.to_le_bytes());
        raw[2..4].copy_from_slice(&0xc215u16.to_le_bytes());
        for (i, unit) in "Stick".encode_utf16().enumerate() {
            raw[4 + i * 2..6 + i * 2].copy_from_slice(&unit.to_le_bytes());
        }
        for w in 0..19u32 {
            let off = 68 + w as usize * 4;
            raw[off..off + 4].copy_from_slice(&(100 + w).to_le_bytes());
        }

        let caps = decode_capabilities(&CapsBuffer(raw));
        assert_eq!(caps.vendor_id, 0x046d);
        assert_eq!(caps.product_id, 0xc215);
        assert_eq!(caps.name, "Stick");
        assert_eq!(caps.axes[Axis::X], ChannelExtent::new(100, 101));
        assert_eq!(caps.axes[Axis::Y], ChannelExtent::new(102, 103));
        assert_eq!(caps.axes[Axis::Z], ChannelExtent::new(104, 105));
        assert_eq!(caps.button_count, 106);
        assert_eq!(caps.period_min, 107);
        assert_eq!(caps.period_max, 108);
        assert_eq!(caps.axes[Axis::RX], ChannelExtent::new(109, 110));
        assert_eq!(caps.axes[Axis::RY], ChannelExtent::new(111, 112));
        assert_eq!(caps.axes[Axis::RZ], ChannelExtent::new(113, 114));
        assert_eq!(caps.flags.bits(), 115);
        assert_eq!(caps.max_axes, 116);
        assert_eq!(caps.num_axes, 117);
        assert_eq!(caps.max_buttons, 118);
        assert_eq!(caps.reg_key, "");
    }

    #[test]
    fn encode_then_decode_keeps_every_field() {
        let caps = sample();
        assert_eq!(decode_capabilities(&caps.encode()), caps);
    }

    #[test]
    fn zeroed_buffer_decodes_to_default() {
        assert_eq!(
            decode_capabilities(&CapsBuffer::zeroed()),
            Capabilities::default()
        );
    }

    #[test]
    fn name_without_terminator_is_cut_at_32_units() {
        let caps = Capabilities {
            name: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".into(),
            ..Capabilities::default()
        };
        let decoded = decode_capabilities(&caps.encode());
        assert_eq!(decoded.name, "ABCDEFGHIJKLMNOPQRSTUVWXYZ012345");
        assert_eq!(decoded.axes[Axis::X], ChannelExtent::default());
    }

    #[test]
    fn button_count_is_not_checked_against_max() {
        let caps = Capabilities {
            button_count: 40,
            max_buttons: 8,
            ..Capabilities::default()
        };
        let decoded = decode_capabilities(&caps.encode());
        assert_eq!(decoded.button_count, 40);
        let buttons = decoded
            .describe()
            .into_iter()
            .filter(|d| d.kind == ChannelKind::Button)
            .count();
        assert_eq!(buttons, 40);
    }

    #[test]
    fn describe_lists_axes_buttons_and_pov() {
        let descs = sample().describe();
        let axes = descs.iter().filter(|d| d.kind == ChannelKind::Axis).count();
        let buttons = descs.iter().filter(|d| d.kind == ChannelKind::Button).count();
        let hats: Vec<_> = descs.iter().filter(|d| d.kind == ChannelKind::Hat).collect();
        assert_eq!(axes, 6);
        assert_eq!(buttons, 16);
        assert_eq!(hats.len(), 1);
        assert_eq!(descs[2].name, "Z");
        assert_eq!(descs[2].logical_max, 255);
    }
}
