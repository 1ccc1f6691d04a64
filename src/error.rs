// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! Command dispatch and the power sequencer surface [`Error`] to the caller.
//! Connection-level failures are carried as [`ProtocolError`] inside
//! connection events and absorbed by the session.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation was attempted while no live device session exists.
    #[error("TV is not connected")]
    NotConnected,

    /// Power-on was requested but no hardware identifier is configured.
    #[error("no hardware identifier configured for wake-on-LAN")]
    NoHardwareIdentifier,

    /// The TV did not report power-on within the poll window.
    #[error("TV did not power on")]
    PowerOnTimeout,

    /// The dispatch input did not match any known command.
    #[error("unknown command {0}")]
    UnknownCommand(String),

    /// Error surfaced by the device protocol client.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The wake signal could not be transmitted.
    #[error("wake signal failed: {0}")]
    Transmission(#[from] WakeError),

    /// No session is registered under the given address.
    #[error("no session for device {0}")]
    DeviceNotFound(String),

    /// Configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to the device protocol or the control bus.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// WebSocket transport failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),

    /// MQTT client failure.
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// A frame could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection to the device or broker failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device refused the pairing handshake.
    #[error("registration failed: {0}")]
    Registration(String),

    /// The device answered a request with an error.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The device closed the session with a non-normal close code.
    #[error("connection closed: {0}")]
    Closed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for ProtocolError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

/// Errors raised while transmitting a wake signal.
#[derive(Debug, Error)]
pub enum WakeError {
    /// Socket setup or send failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The packet was only partially written.
    #[error("short write: sent {sent} of {expected} bytes")]
    ShortWrite {
        /// Bytes actually sent.
        sent: usize,
        /// Bytes that should have been sent.
        expected: usize,
    },
}

/// Errors related to process configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A hardware identifier could not be parsed.
    #[error("invalid MAC address: {0}")]
    InvalidMac(String),

    /// A device entry could not be parsed.
    #[error("invalid device entry: {0}")]
    InvalidDevice(String),

    /// The broker URL could not be parsed.
    #[error("invalid broker URL: {0}")]
    InvalidBroker(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_names_input() {
        let err = Error::UnknownCommand("FOO".to_string());
        assert_eq!(err.to_string(), "unknown command FOO");
    }

    #[test]
    fn error_from_protocol_error() {
        let err: Error = ProtocolError::Rejected("404 no such service".to_string()).into();
        assert!(matches!(err, Error::Protocol(ProtocolError::Rejected(_))));
    }

    #[test]
    fn error_from_wake_error() {
        let err: Error = WakeError::ShortWrite {
            sent: 10,
            expected: 102,
        }
        .into();
        assert!(matches!(err, Error::Transmission(_)));
        assert_eq!(
            err.to_string(),
            "wake signal failed: short write: sent 10 of 102 bytes"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidDevice(";a8:23:fe:01:02:03".to_string());
        assert_eq!(err.to_string(), "invalid device entry: ;a8:23:fe:01:02:03");
    }
}
