//! Per-tick snapshot of device states.
//!
//! [`Snapshot`] is an **owned**, read-only view of the states read in one
//! pass of [`poll_all`](crate::manager::poll_all). Keys are device ids; a
//! device whose poll failed that tick is simply missing.
//!
//! Devices keep no history, so a snapshot is the only place states from the
//! same tick live together.
//!
//! # Examples
//! ```no_run
//! use mmjoy::{backends, manager::{poll_all, DeviceEnumerator}};
//!
//! let mut sticks = DeviceEnumerator::new(backends::system_api()).enumerate();
//! let snap = poll_all(&mut sticks);
//! for (id, state) in snap.iter() {
//!     println!("{id}: {:?}", state.axes);
//! }
//! ```

use crate::state::DeviceState;
use serde::Serialize;
use std::collections::BTreeMap;

/// Owned snapshot of device states (`device id → DeviceState`), ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot(pub BTreeMap<u32, DeviceState>);

impl Snapshot {
    #[inline]
    pub fn get(&self, id: u32) -> Option<&DeviceState> {
        self.0.get(&id)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&u32, &DeviceState)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, DeviceState)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (u32, DeviceState)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_id_order() {
        let snap: Snapshot = [(4, DeviceState::default()), (1, DeviceState::default())]
            .into_iter()
            .collect();
        let ids: Vec<u32> = snap.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, [1, 4]);
        assert_eq!(snap.len(), 2);
        assert!(snap.get(4).is_some());
        assert!(snap.get(2).is_none());
    }

    #[test]
    fn empty_tick_is_empty() {
        let snap: Snapshot = std::iter::empty().collect();
        assert!(snap.is_empty());
        assert_eq!(serde_json::to_string(&snap).expect("serialize"), "{}");
    }
}
