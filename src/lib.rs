// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `lgtv_bridge` - Bridge LG webOS TVs to an MQTT control bus.
//!
//! Each configured TV gets a [`Session`] that keeps a persistent,
//! authenticated WebSocket session with the device, aggregates the pushes
//! it receives into a single [`DeviceState`] snapshot, and dispatches
//! remote-control commands to it.
//!
//! # Supported Features
//!
//! - **State aggregation**: foreground app, volume, mute, app status and
//!   launch points merged into one snapshot
//! - **Remote control**: key presses, app launch, media controls
//! - **Power sequencing**: power-off request, wake-on-LAN power-on with
//!   confirmation polling
//! - **Reconnection**: optional supervisor with exponential backoff
//! - **MQTT bridge**: retained status topic, command topics, result topic
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use lgtv_bridge::{MagicPacketSender, Session, SsapConnector, types::PowerState};
//!
//! #[tokio::main]
//! async fn main() -> lgtv_bridge::Result<()> {
//!     let session = Session::builder(
//!         "192.168.1.20",
//!         SsapConnector::new(PathBuf::from(".")),
//!         MagicPacketSender::default(),
//!     )
//!     .hardware_identifier("a8:23:fe:01:02:03".parse()?)
//!     .build();
//!
//!     session.connect();
//!     session.power(PowerState::On).await?;
//!     session.command("remote", "KEY_VOLUMEUP").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Bridging to MQTT
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use lgtv_bridge::bus::{MqttBus, run_bridge};
//! use lgtv_bridge::{MagicPacketSender, Session, SessionRegistry, SsapConnector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (bus, commands) = MqttBus::builder().host("192.168.1.50").build().await?;
//!
//! let mut registry = SessionRegistry::new();
//! registry.insert(
//!     Session::builder("192.168.1.20", SsapConnector::new(PathBuf::from(".")), MagicPacketSender::default())
//!         .build(),
//! );
//! registry.connect_all();
//!
//! run_bridge(bus, commands, Arc::new(registry)).await;
//! # Ok(())
//! # }
//! ```

pub mod bus;
pub mod config;
pub mod error;
pub mod event;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod state;
pub mod types;
pub mod wake;

pub use error::{ConfigError, Error, ProtocolError, Result, WakeError};
pub use event::{EventBus, SessionEvent};
pub use protocol::{SsapConnection, SsapConnector};
pub use registry::SessionRegistry;
pub use session::{ReconnectionPolicy, Session, SessionBuilder, supervise};
pub use state::{DeviceState, StateUpdate};
pub use types::{Command, MacAddress, PowerState};
pub use wake::{MagicPacketSender, WakeSender};
