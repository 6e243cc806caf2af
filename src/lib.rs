//! mmjoy — joystick readout through the Windows legacy multimedia API.
//!
//! Discovers joysticks via `winmm`, decodes each one's capability descriptor,
//! and polls live axis/button/POV state on demand.
//!
//! ```no_run
//! use mmjoy::{backends, DeviceEnumerator};
//!
//! let sticks = DeviceEnumerator::new(backends::system_api()).enumerate();
//! if let Some(mut stick) = sticks.into_iter().next() {
//!     println!("{stick}");
//!     if let Some(state) = stick.poll() {
//!         println!("{:?} {:?}", state.axes, state.buttons);
//!     }
//! }
//! ```

pub mod axis;
pub mod backends;
pub mod caps;
pub mod config;
pub mod device;
pub mod error;
pub mod layout;
pub mod manager;
pub mod raw;
pub mod snapshot;
pub mod state;

pub use caps::{decode_capabilities, Capabilities, CapsFlags, ChannelExtent};
pub use device::{Device, Joystick};
pub use error::{Error, Result};
pub use axis::{Axis, AxisMap, ChannelDesc, ChannelKind};
pub use manager::{poll_all, DeviceEnumerator};
pub use raw::RawJoystickApi;
pub use snapshot::Snapshot;
pub use state::{decode_state, DeviceState, PositionReport};
