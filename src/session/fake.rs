// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory protocol client and wake sender for session tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::{Notify, mpsc};

use crate::error::{ProtocolError, WakeError};
use crate::protocol::{
    Connection, ConnectionEvent, Connector, InputSocket, LAUNCH_POINTS_URI, PushReceiver,
};
use crate::types::MacAddress;
use crate::wake::WakeSender;

type PushTx = mpsc::Sender<Result<Value, ProtocolError>>;

struct Shared {
    links: Mutex<Vec<Arc<FakeLink>>>,
    opened: Notify,
    launch_points: Mutex<Value>,
    rejected: Mutex<HashSet<String>>,
    fail_input: AtomicBool,
    buttons: Arc<Mutex<Vec<String>>>,
}

/// Connector handing out scripted connections.
#[derive(Clone)]
pub(crate) struct FakeConnector {
    shared: Arc<Shared>,
}

impl FakeConnector {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                links: Mutex::new(Vec::new()),
                opened: Notify::new(),
                launch_points: Mutex::new(json!({"launchPoints": []})),
                rejected: Mutex::new(HashSet::new()),
                fail_input: AtomicBool::new(false),
                buttons: Arc::new(Mutex::new(Vec::new())),
            }),
        }
    }

    /// Returns the `index`-th opened connection.
    pub(crate) fn connection(&self, index: usize) -> Arc<FakeLink> {
        Arc::clone(&self.shared.links.lock()[index])
    }

    pub(crate) fn connection_count(&self) -> usize {
        self.shared.links.lock().len()
    }

    pub(crate) async fn wait_for_connections(&self, count: usize) {
        loop {
            let opened = self.shared.opened.notified();
            if self.connection_count() >= count {
                return;
            }
            opened.await;
        }
    }

    /// Sets the launch point list response.
    pub(crate) fn set_launch_points(&self, raw: Value) {
        *self.shared.launch_points.lock() = raw;
    }

    /// Makes every request to `uri` fail.
    pub(crate) fn reject(&self, uri: &str) {
        self.shared.rejected.lock().insert(uri.to_string());
    }

    pub(crate) fn fail_input_socket(&self) {
        self.shared.fail_input.store(true, Ordering::SeqCst);
    }

    /// Buttons sent through any input socket.
    pub(crate) fn buttons(&self) -> Vec<String> {
        self.shared.buttons.lock().clone()
    }
}

impl Connector for FakeConnector {
    type Connection = FakeConnection;

    fn connect(&self, address: &str, events: mpsc::Sender<ConnectionEvent>) -> FakeConnection {
        let link = Arc::new(FakeLink {
            address: address.to_string(),
            events,
            requests: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        });
        self.shared.links.lock().push(Arc::clone(&link));
        self.shared.opened.notify_waiters();

        FakeConnection {
            link,
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Test-side view of one connection.
pub(crate) struct FakeLink {
    pub(crate) address: String,
    events: mpsc::Sender<ConnectionEvent>,
    requests: Mutex<Vec<(String, Option<Value>)>>,
    subscriptions: Mutex<HashMap<String, PushTx>>,
    closed: AtomicBool,
}

impl FakeLink {
    pub(crate) async fn emit(&self, event: ConnectionEvent) {
        let _ = self.events.send(event).await;
    }

    /// Delivers a push on the subscription for `uri`.
    pub(crate) async fn push(&self, uri: &str, result: Result<Value, ProtocolError>) {
        let tx = self
            .subscriptions
            .lock()
            .get(uri)
            .cloned()
            .unwrap_or_else(|| panic!("no subscription for {uri}"));
        tx.send(result).await.unwrap();
    }

    pub(crate) fn requests(&self) -> Vec<(String, Option<Value>)> {
        self.requests.lock().clone()
    }

    pub(crate) fn subscribed(&self) -> HashSet<String> {
        self.subscriptions.lock().keys().cloned().collect()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeConnection {
    link: Arc<FakeLink>,
    shared: Arc<Shared>,
}

impl Connection for FakeConnection {
    type Input = FakeInput;

    async fn request(&self, uri: &str, payload: Option<Value>) -> Result<Value, ProtocolError> {
        self.link
            .requests
            .lock()
            .push((uri.to_string(), payload));

        if self.shared.rejected.lock().contains(uri) {
            return Err(ProtocolError::Rejected(format!("{uri} rejected")));
        }
        if uri == LAUNCH_POINTS_URI {
            return Ok(self.shared.launch_points.lock().clone());
        }
        Ok(json!({"returnValue": true}))
    }

    fn subscribe(&self, uri: &str) -> Result<PushReceiver, ProtocolError> {
        let (tx, rx) = mpsc::channel(16);
        self.link.subscriptions.lock().insert(uri.to_string(), tx);
        Ok(rx)
    }

    async fn input_socket(&self) -> Result<FakeInput, ProtocolError> {
        if self.shared.fail_input.load(Ordering::SeqCst) {
            return Err(ProtocolError::Rejected("no pointer socket".to_string()));
        }
        Ok(FakeInput {
            buttons: Arc::clone(&self.shared.buttons),
        })
    }

    fn close(&self) {
        self.link.closed.store(true, Ordering::SeqCst);
    }
}

pub(crate) struct FakeInput {
    buttons: Arc<Mutex<Vec<String>>>,
}

impl InputSocket for FakeInput {
    fn send_button(&self, name: &str) -> Result<(), ProtocolError> {
        self.buttons.lock().push(name.to_string());
        Ok(())
    }
}

/// Wake sender recording targets.
#[derive(Clone, Default)]
pub(crate) struct FakeWake {
    sent: Arc<Mutex<Vec<MacAddress>>>,
    fail: bool,
}

impl FakeWake {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<MacAddress> {
        self.sent.lock().clone()
    }
}

impl WakeSender for FakeWake {
    async fn wake(&self, mac: &MacAddress) -> Result<(), WakeError> {
        if self.fail {
            return Err(WakeError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "broadcast not permitted",
            )));
        }
        self.sent.lock().push(*mac);
        Ok(())
    }
}
