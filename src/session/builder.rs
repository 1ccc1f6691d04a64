// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for [`Session`].

use std::sync::Arc;
use std::time::Duration;

use crate::event::EventBus;
use crate::protocol::Connector;
use crate::types::MacAddress;
use crate::wake::WakeSender;

use super::Session;

/// Number of power checks after a wake signal.
pub const DEFAULT_POWER_ON_ATTEMPTS: u32 = 5;

/// Interval between power checks.
pub const DEFAULT_POWER_ON_INTERVAL: Duration = Duration::from_secs(1);

/// Power-on poll settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerOnPolling {
    /// Number of checks before giving up.
    pub attempts: u32,
    /// Wait before each check.
    pub interval: Duration,
}

impl Default for PowerOnPolling {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_POWER_ON_ATTEMPTS,
            interval: DEFAULT_POWER_ON_INTERVAL,
        }
    }
}

/// Builder for a device session.
///
/// # Examples
///
/// ```no_run
/// use lgtv_bridge::protocol::SsapConnector;
/// use lgtv_bridge::session::Session;
/// use lgtv_bridge::wake::MagicPacketSender;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Session::builder("192.168.1.20", SsapConnector::new("."), MagicPacketSender::new())
///     .hardware_identifier("a8:23:fe:01:02:03".parse()?)
///     .build();
/// session.connect();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionBuilder<C, W> {
    address: String,
    connector: C,
    wake: W,
    hardware_identifier: Option<MacAddress>,
    polling: PowerOnPolling,
    events: Option<EventBus>,
}

impl<C: Connector, W: WakeSender> SessionBuilder<C, W> {
    pub(crate) fn new(address: impl Into<String>, connector: C, wake: W) -> Self {
        Self {
            address: address.into(),
            connector,
            wake,
            hardware_identifier: None,
            polling: PowerOnPolling::default(),
            events: None,
        }
    }

    /// Sets the wake-on-LAN target. Without one, power-on is unsupported.
    #[must_use]
    pub fn hardware_identifier(mut self, mac: MacAddress) -> Self {
        self.hardware_identifier = Some(mac);
        self
    }

    /// Sets the wake-on-LAN target if present.
    #[must_use]
    pub fn maybe_hardware_identifier(mut self, mac: Option<MacAddress>) -> Self {
        self.hardware_identifier = mac;
        self
    }

    /// Overrides the power-on poll settings.
    #[must_use]
    pub fn power_on_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.polling = PowerOnPolling { attempts, interval };
        self
    }

    /// Publishes lifecycle events on a shared bus instead of a private one.
    #[must_use]
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds the session and starts its mailbox task.
    ///
    /// The session is idle until [`Session::connect`] is called.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn build(self) -> Arc<Session<C, W>> {
        Session::start(
            self.address,
            self.hardware_identifier,
            self.connector,
            self.wake,
            self.polling,
            self.events.unwrap_or_default(),
        )
    }
}
