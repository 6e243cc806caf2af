//! Scriptable, in-memory joystick subsystem.
//!
//! [`VirtualJoystickApi`] behaves like `winmm` from the caller's side: it has a
//! fixed number of slots, hands out encoded `JOYCAPSW`/`JOYINFOEX` buffers, and
//! fails with the same typed errors. Tests and the `--virtual` demo drive it by
//! attaching devices, moving axes, pressing buttons and unplugging slots.
//!
//! Every query is counted per slot so callers can assert how often the
//! subsystem was hit.

use crate::caps::{CapsFlags, Capabilities, ChannelExtent};
use crate::error::{Error, Result};
use crate::axis::{Axis, AxisMap};
use crate::layout::{CapsBuffer, PositionBuffer, RequestFlags, POSITION_SIZE};
use crate::raw::RawJoystickApi;
use crate::state::{PositionReport, MASK_BUTTONS, POV_CENTERED};
use parking_lot::Mutex;

#[derive(Clone, Debug)]
struct VirtualJoystick {
    caps: Capabilities,
    report: PositionReport,
    plugged: bool,
    /// When set, position queries fail with this code.
    read_error: Option<u32>,
}

impl VirtualJoystick {
    fn new(caps: Capabilities) -> Self {
        let report = PositionReport {
            size: POSITION_SIZE as u32,
            flags: RequestFlags::RETURN_ALL.bits(),
            pov: POV_CENTERED,
            ..PositionReport::default()
        };
        Self {
            caps,
            report,
            plugged: true,
            read_error: None,
        }
    }
}

#[derive(Default)]
struct Slot {
    device: Option<VirtualJoystick>,
    caps_queries: usize,
    position_queries: usize,
}

/// In-memory [`RawJoystickApi`].
pub struct VirtualJoystickApi {
    available: bool,
    slots: Mutex<Vec<Slot>>,
}

impl VirtualJoystickApi {
    /// A subsystem with `slots` empty slots.
    pub fn new(slots: u32) -> Self {
        Self {
            available: true,
            slots: Mutex::new((0..slots).map(|_| Slot::default()).collect()),
        }
    }

    /// A subsystem that behaves as if it were not installed.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            slots: Mutex::new(Vec::new()),
        }
    }

    /// One slot holding [`demo_capabilities`] with the stick centered.
    pub fn demo() -> Self {
        let api = Self::new(1);
        api.attach(0, demo_capabilities());
        let center = 32767;
        for axis in [Axis::X, Axis::Y, Axis::RZ] {
            api.set_axis(0, axis, center);
        }
        api
    }

    /// Plug a device into `index`. Out-of-range indices are ignored.
    pub fn attach(&self, index: u32, caps: Capabilities) {
        self.with_slot(index, |slot| slot.device = Some(VirtualJoystick::new(caps)));
    }

    /// Remove the device at `index` entirely.
    pub fn detach(&self, index: u32) {
        self.with_slot(index, |slot| slot.device = None);
    }

    /// Simulate a cable pull. The slot keeps its device and state.
    pub fn unplug(&self, index: u32) {
        self.with_device(index, |dev| dev.plugged = false);
    }

    pub fn replug(&self, index: u32) {
        self.with_device(index, |dev| dev.plugged = true);
    }

    /// Make position queries on `index` fail with `code` until cleared with `None`.
    pub fn set_read_error(&self, index: u32, code: Option<u32>) {
        self.with_device(index, |dev| dev.read_error = code);
    }

    pub fn set_axis(&self, index: u32, axis: Axis, value: u32) {
        self.with_device(index, |dev| dev.report.set_axis(axis, value));
    }

    pub fn press_button(&self, index: u32, button: u32) {
        self.set_button(index, button, true);
    }

    pub fn release_button(&self, index: u32, button: u32) {
        self.set_button(index, button, false);
    }

    pub fn set_pov(&self, index: u32, pov: u32) {
        self.with_device(index, |dev| dev.report.pov = pov);
    }

    /// How many capability queries `index` has received.
    pub fn capability_queries(&self, index: u32) -> usize {
        self.slots
            .lock()
            .get(index as usize)
            .map_or(0, |slot| slot.caps_queries)
    }

    /// How many position queries `index` has received.
    pub fn position_queries(&self, index: u32) -> usize {
        self.slots
            .lock()
            .get(index as usize)
            .map_or(0, |slot| slot.position_queries)
    }

    fn set_button(&self, index: u32, button: u32, pressed: bool) {
        if button >= MASK_BUTTONS {
            return;
        }
        self.with_device(index, |dev| {
            let bit = 1u32 << button;
            if pressed {
                dev.report.buttons |= bit;
            } else {
                dev.report.buttons &= !bit;
            }
            dev.report.button_number = dev.report.buttons.count_ones();
        });
    }

    fn with_slot(&self, index: u32, f: impl FnOnce(&mut Slot)) {
        if let Some(slot) = self.slots.lock().get_mut(index as usize) {
            f(slot);
        }
    }

    fn with_device(&self, index: u32, f: impl FnOnce(&mut VirtualJoystick)) {
        self.with_slot(index, |slot| {
            if let Some(dev) = slot.device.as_mut() {
                f(dev);
            }
        });
    }

    /// Common gate for both queries: count the hit, then resolve the device.
    fn query<T>(
        &self,
        index: u32,
        count: impl FnOnce(&mut Slot),
        read: impl FnOnce(&VirtualJoystick) -> Result<T>,
    ) -> Result<T> {
        if !self.available {
            return Err(Error::Unavailable);
        }
        let mut slots = self.slots.lock();
        let slot = slots
            .get_mut(index as usize)
            .ok_or(Error::DeviceAbsent { index })?;
        count(&mut *slot);
        match slot.device.as_ref() {
            Some(dev) if dev.plugged => read(dev),
            _ => Err(Error::DeviceAbsent { index }),
        }
    }
}

impl RawJoystickApi for VirtualJoystickApi {
    fn device_count(&self) -> u32 {
        if !self.available {
            return 0;
        }
        self.slots.lock().len() as u32
    }

    fn query_capabilities(&self, index: u32) -> Result<CapsBuffer> {
        self.query(
            index,
            |slot| slot.caps_queries += 1,
            |dev| Ok(dev.caps.encode()),
        )
    }

    fn query_position(&self, index: u32) -> Result<PositionBuffer> {
        self.query(
            index,
            |slot| slot.position_queries += 1,
            |dev| match dev.read_error {
                Some(code) => Err(Error::ReadFailed { index, code }),
                None => Ok(dev.report.encode()),
            },
        )
    }

    fn name(&self) -> &str {
        "virtual"
    }
}

/// A plain two-axis stick with a throttle wheel, eight buttons and a hat.
pub fn demo_capabilities() -> Capabilities {
    let full = ChannelExtent::new(0, 65535);
    let none = ChannelExtent::default();
    Capabilities {
        vendor_id: 0x1209,
        product_id: 0x0001,
        name: "Virtual Joystick".into(),
        axes: AxisMap::new([full, full, none, none, none, full]),
        button_count: 8,
        period_min: 10,
        period_max: 1000,
        flags: CapsFlags::HAS_V | CapsFlags::HAS_POV | CapsFlags::POV_CTS,
        max_axes: 6,
        num_axes: 3,
        max_buttons: 32,
        reg_key: "VIRTUAL".into(),
        oem_driver: String::new(),
    }
}
