// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device protocol client.
//!
//! The session core talks to a TV only through the traits in this module:
//!
//! - [`Connector`] opens a session and reports [`ConnectionEvent`]s on a channel
//! - [`Connection`] issues requests, subscriptions, and opens the input socket
//! - [`InputSocket`] injects keystrokes without awaiting acknowledgment
//!
//! [`SsapConnector`] implements them for LG webOS TVs over WebSocket.

mod pointer;
mod ssap;
mod ssap_message;

use std::future::Future;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::ProtocolError;

pub use pointer::PointerSocket;
pub use ssap::{SsapConnection, SsapConnector};

/// URI of the request returning the pointer input socket path.
pub const POINTER_SOCKET_URI: &str = "ssap://com.webos.service.networkinput/getPointerInputSocket";

/// URI listing (and subscribing to) installed applications.
pub const LAUNCH_POINTS_URI: &str = "ssap://com.webos.applicationManager/listLaunchPoints";

/// Stream of subscription pushes.
pub type PushReceiver = mpsc::Receiver<Result<Value, ProtocolError>>;

/// Connection lifecycle notifications.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// The session is open and registered.
    Connected,
    /// The session ended. `Some` marks a transient drop that keeps the
    /// connection handle; a socket that is gone is reported with `None`.
    Disconnected(Option<ProtocolError>),
    /// A transport error occurred. The session may still be usable.
    Error(ProtocolError),
}

/// Opens protocol sessions.
pub trait Connector: Send + Sync + 'static {
    /// The connection handle type.
    type Connection: Connection;

    /// Opens a new session to `address`.
    ///
    /// Returns immediately; lifecycle notifications are delivered on `events`.
    fn connect(&self, address: &str, events: mpsc::Sender<ConnectionEvent>) -> Self::Connection;
}

/// A live protocol session.
pub trait Connection: Send + Sync + 'static {
    /// The input socket type.
    type Input: InputSocket;

    /// Issues a request and waits for the device's response payload.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be sent, times out, or
    /// the device answers with an error.
    fn request(
        &self,
        uri: &str,
        payload: Option<Value>,
    ) -> impl Future<Output = Result<Value, ProtocolError>> + Send;

    /// Subscribes to a topic. Every push (including the first response) is
    /// delivered on the returned receiver.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the session is no longer running.
    fn subscribe(&self, uri: &str) -> Result<PushReceiver, ProtocolError>;

    /// Opens the secondary socket used for keystroke injection.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the socket cannot be obtained.
    fn input_socket(&self) -> impl Future<Output = Result<Self::Input, ProtocolError>> + Send;

    /// Closes the session without emitting further events.
    fn close(&self);
}

/// Keystroke injection channel.
pub trait InputSocket: Send + Sync + 'static {
    /// Sends a button press. Does not wait for acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the socket is closed.
    fn send_button(&self, name: &str) -> Result<(), ProtocolError>;
}
