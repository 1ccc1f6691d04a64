// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::state::DeviceState;

/// Retained status payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// When the snapshot was published.
    pub timestamp: DateTime<Utc>,
    /// The full device state.
    pub state: DeviceState,
}

impl StatusMessage {
    /// Wraps `state` with the current time.
    #[must_use]
    pub fn now(state: DeviceState) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
        }
    }
}

/// A command received from the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    /// Target device address.
    pub address: String,
    /// Originating control key.
    pub key: String,
    /// Command string.
    pub command: String,
}

/// Outcome of a dispatched command.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::bus::CommandResult;
/// use lgtv_bridge::Error;
///
/// let result = CommandResult::new("remote", "FOO", &Err(Error::UnknownCommand("FOO".into())));
/// assert!(!result.ok);
/// assert_eq!(result.error.as_deref(), Some("unknown command FOO"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Originating control key.
    pub key: String,
    /// Command string as received.
    pub command: String,
    /// Whether the command succeeded.
    pub ok: bool,
    /// Error message on failure.
    pub error: Option<String>,
    /// When the command completed.
    pub timestamp: DateTime<Utc>,
}

impl CommandResult {
    /// Builds the result payload for a dispatch outcome.
    #[must_use]
    pub fn new(key: &str, command: &str, outcome: &Result<(), Error>) -> Self {
        Self {
            key: key.to_string(),
            command: command.to_string(),
            ok: outcome.is_ok(),
            error: outcome.as_ref().err().map(ToString::to_string),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateUpdate;
    use crate::types::PowerState;
    use serde_json::json;

    #[test]
    fn status_message_shape() {
        let mut state = DeviceState::new();
        state.apply(&StateUpdate::power(PowerState::On));

        let value = serde_json::to_value(StatusMessage::now(state)).unwrap();
        assert_eq!(value["state"], json!({"power": "on"}));
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn successful_result() {
        let result = CommandResult::new("ok", "KEY_ENTER", &Ok(()));
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["key"], "ok");
        assert_eq!(value["command"], "KEY_ENTER");
        assert_eq!(value["ok"], true);
        assert!(value["error"].is_null());
    }

    #[test]
    fn failed_result_carries_message() {
        let result = CommandResult::new("power", "POWERON", &Err(Error::NoHardwareIdentifier));
        assert!(!result.ok);
        assert_eq!(
            result.error.as_deref(),
            Some("no hardware identifier configured for wake-on-LAN")
        );
    }
}
