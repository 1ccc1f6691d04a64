// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for TV control.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state reported in the device snapshot
//! - [`MacAddress`] - Wake-on-LAN target
//! - [`Command`] - Parsed remote-control command
//! - [`MediaAction`] - Fixed media-control actions

mod command;
mod mac_address;
mod power;

pub use command::{Command, MediaAction};
pub use mac_address::MacAddress;
pub use power::PowerState;
