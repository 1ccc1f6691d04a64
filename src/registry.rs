// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lookup table of sessions keyed by device address.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::protocol::Connector;
use crate::session::Session;
use crate::wake::WakeSender;

/// Owns one [`Session`] per configured device.
///
/// Built once at startup and shared with the bus adapter. It only routes
/// commands; it never touches session internals.
#[derive(Debug)]
pub struct SessionRegistry<C: Connector, W: WakeSender> {
    sessions: BTreeMap<String, Arc<Session<C, W>>>,
}

impl<C: Connector, W: WakeSender> SessionRegistry<C, W> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }

    /// Adds a session under its address, returning any session it replaced.
    pub fn insert(&mut self, session: Arc<Session<C, W>>) -> Option<Arc<Session<C, W>>> {
        self.sessions.insert(session.address().to_string(), session)
    }

    /// Returns the session for `address`.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<&Arc<Session<C, W>>> {
        self.sessions.get(address)
    }

    /// Returns the registered addresses in sorted order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    /// Iterates over the registered sessions.
    pub fn sessions(&self) -> impl Iterator<Item = &Arc<Session<C, W>>> {
        self.sessions.values()
    }

    /// Returns the number of sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no session is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Routes a command to the session for `address`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown address, otherwise the
    /// session's dispatch error.
    pub async fn dispatch(&self, address: &str, key: &str, command: &str) -> Result<()> {
        let session = self
            .get(address)
            .ok_or_else(|| Error::DeviceNotFound(address.to_string()))?;
        session.command(key, command).await
    }

    /// Calls [`Session::connect`] on every session.
    pub fn connect_all(&self) {
        for session in self.sessions.values() {
            session.connect();
        }
    }
}

impl<C: Connector, W: WakeSender> Default for SessionRegistry<C, W> {
    fn default() -> Self {
        Self::new()
    }
}
