//! Devices and the poll protocol.
//!
//! A [`Device`] is a two-state value:
//!
//! ```text
//! Unloaded { id } --load ok--> Loaded { id, caps }
//!        ^   |
//!        +---+ load failed (retried on the next poll)
//! ```
//!
//! `Loaded` is terminal. [`Device::load`] and [`Device::poll`] consume the
//! device and hand back its next state, so nothing is mutated behind the
//! caller's back. [`Joystick`] pairs a device with the subsystem handle it
//! talks to and offers the same operations on `&mut self`.
//!
//! Polling is total: every subsystem failure (no subsystem, dead index,
//! failed read) becomes `None`. The cause is logged at debug level.

use crate::caps::{decode_capabilities, Capabilities};
use crate::raw::RawJoystickApi;
use crate::state::{decode_state, DeviceState};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One joystick slot, before or after its capabilities were read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Device {
    Unloaded { id: u32 },
    Loaded { id: u32, caps: Capabilities },
}

impl Device {
    /// A device that will read its capabilities on first poll.
    pub fn new(id: u32) -> Self {
        Device::Unloaded { id }
    }

    /// A device with capabilities already decoded.
    pub fn loaded(id: u32, caps: Capabilities) -> Self {
        Device::Loaded { id, caps }
    }

    pub fn id(&self) -> u32 {
        match self {
            Device::Unloaded { id } | Device::Loaded { id, .. } => *id,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Device::Loaded { .. })
    }

    pub fn capabilities(&self) -> Option<&Capabilities> {
        match self {
            Device::Loaded { caps, .. } => Some(caps),
            Device::Unloaded { .. } => None,
        }
    }

    /// Read the capability descriptor if not done yet.
    ///
    /// A loaded device is returned unchanged without touching the subsystem.
    /// A failed query leaves the device unloaded.
    pub fn load(self, api: &dyn RawJoystickApi) -> Self {
        match self {
            Device::Unloaded { id } => match api.query_capabilities(id) {
                Ok(buf) => {
                    let caps = decode_capabilities(&buf);
                    debug!(id, name = %caps.name, buttons = caps.button_count, "joystick loaded");
                    Device::Loaded { id, caps }
                }
                Err(e) => {
                    debug!(id, backend = api.name(), error = %e, "capability query failed");
                    Device::Unloaded { id }
                }
            },
            loaded @ Device::Loaded { .. } => loaded,
        }
    }

    /// Read the current state.
    ///
    /// Loads first if needed. While the device stays unloaded no position is
    /// requested and the result is `None`; the load is retried on the next
    /// call.
    pub fn poll(self, api: &dyn RawJoystickApi) -> (Self, Option<DeviceState>) {
        let device = self.load(api);
        let state = match &device {
            Device::Loaded { id, caps } => match api.query_position(*id) {
                Ok(buf) => Some(decode_state(&buf, caps.button_count)),
                Err(e) => {
                    debug!(id, backend = api.name(), error = %e, "position query failed");
                    None
                }
            },
            Device::Unloaded { .. } => None,
        };
        (device, state)
    }
}

/// A device bound to the subsystem it lives on.
///
/// This is what [`DeviceEnumerator`](crate::manager::DeviceEnumerator) hands
/// out. Each handle can be polled indefinitely and moved to its own thread.
#[derive(Clone)]
pub struct Joystick {
    api: Arc<dyn RawJoystickApi>,
    device: Device,
}

impl Joystick {
    /// Wrap a device. Unloaded devices load lazily on first poll.
    pub fn new(api: Arc<dyn RawJoystickApi>, device: Device) -> Self {
        Self { api, device }
    }

    pub fn id(&self) -> u32 {
        self.device.id()
    }

    /// Product name, or `""` while unloaded.
    pub fn name(&self) -> &str {
        self.device.capabilities().map_or("", |c| c.name.as_str())
    }

    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.device.capabilities()
    }

    pub fn is_loaded(&self) -> bool {
        self.device.is_loaded()
    }

    /// Load capabilities if needed. Returns whether the device is loaded.
    pub fn load(&mut self) -> bool {
        self.transition(|device, api| (device.load(api), ()));
        self.device.is_loaded()
    }

    /// Read the current state. See [`Device::poll`].
    pub fn poll(&mut self) -> Option<DeviceState> {
        self.transition(Device::poll)
    }

    fn transition<T>(&mut self, step: impl FnOnce(Device, &dyn RawJoystickApi) -> (Device, T)) -> T {
        let id = self.device.id();
        let current = std::mem::replace(&mut self.device, Device::new(id));
        let (next, out) = step(current, self.api.as_ref());
        self.device = next;
        out
    }
}

impl fmt::Debug for Joystick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joystick")
            .field("backend", &self.api.name())
            .field("device", &self.device)
            .finish()
    }
}

impl fmt::Display for Joystick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.device.capabilities() {
            Some(caps) => write!(
                f,
                "#{} {} [{:04x}:{:04x}]",
                self.id(),
                caps.name,
                caps.vendor_id,
                caps.product_id
            ),
            None => write!(f, "#{} (not loaded)", self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::{demo_capabilities, VirtualJoystickApi};
    use crate::axis::Axis;

    #[test]
    fn lazy_device_loads_once() {
        let api = VirtualJoystickApi::demo();
        let (device, first) = Device::new(0).poll(&api);
        assert!(device.is_loaded());
        assert!(first.is_some());
        let (device, second) = device.poll(&api);
        assert!(second.is_some());
        assert_eq!(device.capabilities(), Some(&demo_capabilities()));
        assert_eq!(api.capability_queries(0), 1);
        assert_eq!(api.position_queries(0), 2);
    }

    #[test]
    fn failed_load_skips_position_and_retries() {
        let api = VirtualJoystickApi::new(1);
        let (device, state) = Device::new(0).poll(&api);
        assert_eq!(device, Device::Unloaded { id: 0 });
        assert!(state.is_none());
        assert_eq!(api.position_queries(0), 0);

        api.attach(0, demo_capabilities());
        let (device, state) = device.poll(&api);
        assert!(device.is_loaded());
        assert!(state.is_some());
        assert_eq!(api.capability_queries(0), 2);
    }

    #[test]
    fn failed_position_keeps_capabilities() {
        let api = Arc::new(VirtualJoystickApi::demo());
        let mut stick = Joystick::new(api.clone(), Device::loaded(0, demo_capabilities()));
        assert!(stick.poll().is_some());

        api.unplug(0);
        assert!(stick.poll().is_none());
        assert_eq!(stick.capabilities(), Some(&demo_capabilities()));
        assert_eq!(api.capability_queries(0), 0);

        api.replug(0);
        api.set_axis(0, Axis::Y, 7);
        let state = stick.poll().expect("state after replug");
        assert_eq!(state.axis(Axis::Y), 7);
    }

    #[test]
    fn explicit_load_reports_success() {
        let api = Arc::new(VirtualJoystickApi::new(1));
        let mut stick = Joystick::new(api.clone(), Device::new(0));
        assert!(!stick.load());
        api.attach(0, demo_capabilities());
        assert!(stick.load());
        assert!(stick.load());
        assert_eq!(api.capability_queries(0), 2);
        assert_eq!(stick.name(), "Virtual Joystick");
    }

    #[test]
    fn display_shows_identity() {
        let stick = Joystick::new(
            Arc::new(VirtualJoystickApi::demo()),
            Device::loaded(3, demo_capabilities()),
        );
        assert_eq!(stick.to_string(), "#3 Virtual Joystick [1209:0001]");
        let lazy = Joystick::new(Arc::new(VirtualJoystickApi::demo()), Device::new(0));
        assert_eq!(lazy.to_string(), "#0 (not loaded)");
        assert_eq!(lazy.name(), "");
    }
}
