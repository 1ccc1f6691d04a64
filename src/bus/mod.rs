// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control bus adapter.
//!
//! [`MqttBus`] owns the broker connection, [`TopicRoot`] names the topics,
//! and [`run_bridge`] moves snapshots and commands between the bus and a
//! [`SessionRegistry`](crate::registry::SessionRegistry).

mod bridge;
mod message;
mod mqtt;
mod topics;

pub use bridge::{Publisher, run_bridge};
pub use message::{CommandResult, InboundCommand, StatusMessage};
pub use mqtt::{MqttBus, MqttBusBuilder};
pub use topics::{CommandTopic, TopicRoot};
