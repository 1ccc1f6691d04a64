// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state snapshot types.
//!
//! [`DeviceState`] is the accumulating snapshot published on the bus.
//! [`StateUpdate`] is a partial update: applying it overwrites only the
//! fields it carries and keeps everything else.
//!
//! # Examples
//!
//! ```
//! use lgtv_bridge::state::{DeviceState, StateUpdate};
//! use lgtv_bridge::types::PowerState;
//! use serde_json::json;
//!
//! let mut state = DeviceState::new();
//! state.apply(&StateUpdate::new().with_volume(json!({"volume": 5})));
//! state.apply(&StateUpdate::new().with_mute(json!({"mute": true})));
//! state.apply(&StateUpdate::power(PowerState::On));
//!
//! assert_eq!(state.volume(), Some(&json!({"volume": 5})));
//! assert_eq!(state.mute(), Some(&json!({"mute": true})));
//! assert_eq!(state.power(), Some(PowerState::On));
//! ```

mod device_state;
mod field;
mod launch_points;
mod state_update;

pub use device_state::{DeviceState, ForegroundApp};
pub use field::StateField;
pub use launch_points::{ICON_OVERRIDE_MARKER, LaunchPoint, LaunchPoints, process_launch_points};
pub use state_update::StateUpdate;
