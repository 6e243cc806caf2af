//! Axes and channel descriptions.
//!
//! The legacy joystick API knows six analog axes. They are named after their
//! DirectInput counterparts rather than the winmm field letters:
//!
//! | winmm | here |
//! |---|---|
//! | X, Y, Z | `X`, `Y`, `Z` |
//! | R | `RX` |
//! | U | `RY` |
//! | V | `RZ` |
//!
//! Every decoded record carries all six, whether or not the physical device
//! has them. Unsupported axes simply hold whatever the OS reported (usually 0).

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the six canonical axes, in buffer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
    RX,
    RY,
    RZ,
}

impl Axis {
    pub const ALL: [Axis; 6] = [Axis::X, Axis::Y, Axis::Z, Axis::RX, Axis::RY, Axis::RZ];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::RX => "RX",
            Axis::RY => "RY",
            Axis::RZ => "RZ",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value for each of the six axes. No key can be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisMap<T>([T; 6]);

impl<T> AxisMap<T> {
    /// Build from values in [`Axis::ALL`] order.
    pub fn new(values: [T; 6]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self(Axis::ALL.map(&mut f))
    }

    /// Iterate `(axis, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; 6] {
        &self.0
    }
}

impl<T> Index<Axis> for AxisMap<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.0[axis.slot()]
    }
}

impl<T> IndexMut<Axis> for AxisMap<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis.slot()]
    }
}

impl<T: Serialize> Serialize for AxisMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (axis, value) in self.iter() {
            map.serialize_entry(axis.name(), value)?;
        }
        map.end()
    }
}

/// Category of an input channel on a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    Axis,
    Button,
    Hat,
}

/// Describes a channel exposed by a device.
///
/// Built from the capability descriptor by
/// [`Capabilities::describe`](crate::caps::Capabilities::describe) so UIs can
/// list what a device reports without decoding buffers themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelDesc {
    pub kind: ChannelKind,
    /// Device-local channel index.
    pub idx: u16,
    pub name: String,
    /// Raw minimum reported by the device. Buttons are `0..=1`.
    pub logical_min: u32,
    /// Raw maximum reported by the device.
    pub logical_max: u32,
}
