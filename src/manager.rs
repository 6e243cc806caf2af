//! Device discovery and bulk polling.
//!
//! [`DeviceEnumerator`] walks every slot the subsystem reports and returns a
//! loaded [`Joystick`] for each slot whose capability query succeeds, in
//! ascending index order. Code that wants "the first joystick" can rely on
//! that ordering.

use crate::caps::decode_capabilities;
use crate::device::{Device, Joystick};
use crate::raw::RawJoystickApi;
use crate::snapshot::Snapshot;
use std::sync::Arc;
use tracing::{info, trace};

pub struct DeviceEnumerator {
    api: Arc<dyn RawJoystickApi>,
}

impl DeviceEnumerator {
    pub fn new(api: Arc<dyn RawJoystickApi>) -> Self {
        Self { api }
    }

    /// Discover all active joysticks.
    ///
    /// Never fails: a missing subsystem or an empty machine yields an empty
    /// list, and inactive slots are skipped.
    pub fn enumerate(&self) -> Vec<Joystick> {
        let count = self.api.device_count();
        let mut found = Vec::new();

        for index in 0..count {
            match self.api.query_capabilities(index) {
                Ok(buf) => {
                    let device = Device::loaded(index, decode_capabilities(&buf));
                    found.push(Joystick::new(self.api.clone(), device));
                }
                Err(e) => trace!(index, error = %e, "skipping joystick slot"),
            }
        }

        info!(
            backend = self.api.name(),
            slots = count,
            found = found.len(),
            "joystick enumeration finished"
        );
        found
    }

    /// A handle for a known slot without querying it yet.
    ///
    /// Capabilities are read on the first poll.
    pub fn open(&self, id: u32) -> Joystick {
        Joystick::new(self.api.clone(), Device::new(id))
    }
}

/// Poll every joystick once.
///
/// Devices whose poll fails this tick are absent from the snapshot.
pub fn poll_all(joysticks: &mut [Joystick]) -> Snapshot {
    joysticks
        .iter_mut()
        .filter_map(|js| js.poll().map(|state| (js.id(), state)))
        .collect()
}
