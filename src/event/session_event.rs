// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session event types.

use crate::state::DeviceState;

/// Events emitted by a session.
///
/// Every event carries the device address of the emitting session.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::event::SessionEvent;
///
/// let event = SessionEvent::disconnected("192.168.1.20");
/// assert!(event.is_connection());
/// assert_eq!(event.address(), "192.168.1.20");
/// ```
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The connected sequence completed for a new connection.
    Connected {
        /// Device address.
        address: String,
    },

    /// The connection was torn down after a graceful disconnect.
    Disconnected {
        /// Device address.
        address: String,
    },

    /// The state snapshot was updated.
    ///
    /// Emitted after every merge, carrying the full snapshot.
    StateChanged {
        /// Device address.
        address: String,
        /// The complete new state of the device.
        state: DeviceState,
    },
}

impl SessionEvent {
    /// Returns the device address associated with this event.
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Connected { address }
            | Self::Disconnected { address }
            | Self::StateChanged { address, .. } => address,
        }
    }

    /// Returns `true` if this is a connection event.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connected { .. } | Self::Disconnected { .. })
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates a connected event.
    #[must_use]
    pub fn connected(address: impl Into<String>) -> Self {
        Self::Connected {
            address: address.into(),
        }
    }

    /// Creates a disconnected event.
    #[must_use]
    pub fn disconnected(address: impl Into<String>) -> Self {
        Self::Disconnected {
            address: address.into(),
        }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(address: impl Into<String>, state: DeviceState) -> Self {
        Self::StateChanged {
            address: address.into(),
            state,
        }
    }
}
