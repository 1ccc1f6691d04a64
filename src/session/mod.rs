// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device session manager.
//!
//! A [`Session`] owns the protocol connection to one TV, folds subscription
//! pushes into a [`DeviceState`] snapshot, dispatches remote-control
//! commands, and sequences power-on through a wake signal.
//!
//! # Serialization
//!
//! Connection events and subscription pushes are forwarded into a single
//! mailbox and handled one at a time by the session's task. Every
//! [`connect`](Session::connect) bumps a connection generation; messages
//! tagged with an older generation are dropped, so only the latest
//! connection is ever acted on.
//!
//! Commands run on the caller's task. They only read the session fields
//! (under a short-lived lock) and the snapshot.
//!
//! # Reconnection
//!
//! The session never reconnects by itself. Wrap it with [`supervise`] to
//! reconnect after a graceful disconnect.

mod aggregation;
mod builder;
#[cfg(test)]
pub(crate) mod fake;
mod supervisor;

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::{broadcast, mpsc, watch};

use crate::error::{Error, ProtocolError, Result};
use crate::event::{EventBus, SessionEvent};
use crate::protocol::{Connection, ConnectionEvent, Connector, InputSocket, LAUNCH_POINTS_URI, PushReceiver};
use crate::state::{DeviceState, StateField, StateUpdate, process_launch_points};
use crate::types::{Command, MacAddress, PowerState};
use crate::wake::WakeSender;

pub use builder::{
    DEFAULT_POWER_ON_ATTEMPTS, DEFAULT_POWER_ON_INTERVAL, PowerOnPolling, SessionBuilder,
};
pub use supervisor::{ReconnectionPolicy, SupervisorHandle, supervise};

const EVENT_BUFFER: usize = 16;

const LAUNCH_ACTION: &str = "system.launcher/launch";
const TURN_OFF_ACTION: &str = "system/turnOff";

/// Where a push came from.
#[derive(Debug, Clone, Copy)]
enum PushSource {
    Field(StateField),
    LaunchPoints,
}

enum Message {
    Connection {
        generation: u64,
        event: ConnectionEvent,
    },
    Push {
        generation: u64,
        source: PushSource,
        result: std::result::Result<Value, ProtocolError>,
    },
}

struct Fields<Conn: Connection> {
    generation: u64,
    /// Opened but not yet reported connected.
    pending: Option<Arc<Conn>>,
    /// Present exactly while the session is connected.
    connection: Option<Arc<Conn>>,
    input: Option<Arc<Conn::Input>>,
}

impl<Conn: Connection> Default for Fields<Conn> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
            connection: None,
            input: None,
        }
    }
}

/// Session manager for one TV.
///
/// Created with [`Session::builder`]; always handled through an `Arc`.
pub struct Session<C: Connector, W: WakeSender> {
    address: String,
    hardware_identifier: Option<MacAddress>,
    connector: C,
    wake: W,
    polling: PowerOnPolling,
    fields: Mutex<Fields<C::Connection>>,
    state_tx: watch::Sender<DeviceState>,
    events: EventBus,
    mailbox: mpsc::UnboundedSender<Message>,
}

impl<C: Connector, W: WakeSender> fmt::Debug for Session<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("hardware_identifier", &self.hardware_identifier)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl<C: Connector, W: WakeSender> Session<C, W> {
    /// Starts building a session for the TV at `address`.
    pub fn builder(address: impl Into<String>, connector: C, wake: W) -> SessionBuilder<C, W> {
        SessionBuilder::new(address, connector, wake)
    }

    fn start(
        address: String,
        hardware_identifier: Option<MacAddress>,
        connector: C,
        wake: W,
        polling: PowerOnPolling,
        events: EventBus,
    ) -> Arc<Self> {
        let (mailbox, mailbox_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(DeviceState::new());

        Arc::new_cyclic(|weak| {
            tokio::spawn(run_mailbox(weak.clone(), mailbox_rx));
            Self {
                address,
                hardware_identifier,
                connector,
                wake,
                polling,
                fields: Mutex::new(Fields::default()),
                state_tx,
                events,
                mailbox,
            }
        })
    }

    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the wake-on-LAN target, if configured.
    #[must_use]
    pub fn hardware_identifier(&self) -> Option<MacAddress> {
        self.hardware_identifier
    }

    /// Returns `true` between a connect event and the next teardown.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.fields.lock().connection.is_some()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state_tx.borrow().clone()
    }

    /// Returns a receiver that always holds the latest snapshot.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<DeviceState> {
        self.state_tx.subscribe()
    }

    /// Subscribes to lifecycle and state events.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Opens a new protocol session, invalidating any previous one.
    ///
    /// Returns immediately; the connected sequence runs when the TV
    /// reports the session open.
    pub fn connect(&self) {
        let (events_tx, mut events_rx) = mpsc::channel(EVENT_BUFFER);

        let generation = {
            let mut fields = self.fields.lock();
            fields.generation += 1;
            for old in [fields.pending.take(), fields.connection.take()]
                .into_iter()
                .flatten()
            {
                old.close();
            }
            fields.input = None;
            fields.pending = Some(Arc::new(self.connector.connect(&self.address, events_tx)));
            fields.generation
        };

        tracing::info!(host = %self.address, generation, "Connecting");

        let mailbox = self.mailbox.clone();
        tokio::spawn(async move {
            while let Some(event) = events_rx.recv().await {
                if mailbox.send(Message::Connection { generation, event }).is_err() {
                    break;
                }
            }
        });
    }

    /// Parses and executes a command string.
    ///
    /// `key` names the control that issued the command and is only logged.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownCommand` for unrecognized input, or the error
    /// of the executed command.
    pub async fn command(&self, key: &str, command: &str) -> Result<()> {
        tracing::info!(host = %self.address, key, command, "Dispatching command");
        let command: Command = command.parse()?;
        self.execute(&command).await
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying request, keystroke, or power
    /// sequence.
    pub async fn execute(&self, command: &Command) -> Result<()> {
        match command {
            Command::PowerOn => self.power(PowerState::On).await,
            Command::PowerOff => self.power(PowerState::Off).await,
            Command::Key(name) => self.send_key(name),
            Command::Launch(app_id) => self
                .request(LAUNCH_ACTION, Some(json!({ "id": app_id })))
                .await
                .map(drop),
            Command::Media(action) => self.request(action.action_path(), None).await.map(drop),
        }
    }

    /// Issues a protocol request for `action` (e.g. `audio/volumeUp`).
    ///
    /// Full `ssap://` URIs are passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` without contacting the TV if the session
    /// is not connected, or `Error::Protocol` if the TV rejects the request.
    pub async fn request(&self, action: &str, payload: Option<Value>) -> Result<Value> {
        let connection = self.fields.lock().connection.clone().ok_or(Error::NotConnected)?;

        let uri = if action.starts_with("ssap://") {
            action.to_string()
        } else {
            format!("ssap://{action}")
        };
        Ok(connection.request(&uri, payload).await?)
    }

    /// Sends a button press through the input socket.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` if the session or its input socket is
    /// unavailable.
    pub fn send_key(&self, name: &str) -> Result<()> {
        let input = {
            let fields = self.fields.lock();
            if fields.connection.is_none() {
                return Err(Error::NotConnected);
            }
            fields.input.clone().ok_or(Error::NotConnected)?
        };

        tracing::debug!(host = %self.address, key = name, "Sending button");
        input.send_button(name)?;
        Ok(())
    }

    /// Drives the TV towards `target`.
    ///
    /// Power-off issues the turn-off request. Power-on sends a wake signal,
    /// then polls the snapshot until it reports power on.
    ///
    /// # Errors
    ///
    /// - `Error::NotConnected` when powering off a disconnected TV
    /// - `Error::NoHardwareIdentifier` when powering on without a MAC
    /// - `Error::Transmission` if the wake signal cannot be sent
    /// - `Error::PowerOnTimeout` if power-on is never observed
    pub async fn power(&self, target: PowerState) -> Result<()> {
        match target {
            PowerState::Off => self.request(TURN_OFF_ACTION, None).await.map(drop),
            PowerState::On => self.power_on().await,
        }
    }

    async fn power_on(&self) -> Result<()> {
        let mac = self.hardware_identifier.ok_or(Error::NoHardwareIdentifier)?;
        self.wake.wake(&mac).await?;
        tracing::debug!(host = %self.address, mac = %mac, "Wake signal sent");

        for attempt in 1..=self.polling.attempts {
            tokio::time::sleep(self.polling.interval).await;
            if self.state_tx.borrow().is_on() {
                tracing::info!(host = %self.address, attempt, "TV powered on");
                return Ok(());
            }
            tracing::debug!(host = %self.address, attempt, "TV not on yet");
        }

        tracing::warn!(host = %self.address, "TV did not power on");
        Err(Error::PowerOnTimeout)
    }

    fn current_generation(&self, generation: u64) -> bool {
        self.fields.lock().generation == generation
    }

    /// Merges `update` and republishes the full snapshot.
    fn merge(&self, update: &StateUpdate) {
        self.state_tx.send_modify(|state| {
            state.apply(update);
        });
        let snapshot = self.state_tx.borrow().clone();
        self.events
            .publish(SessionEvent::state_changed(&self.address, snapshot));
    }

    async fn handle(&self, message: Message) {
        match message {
            Message::Connection { generation, event } => {
                if !self.current_generation(generation) {
                    tracing::trace!(host = %self.address, generation, "Dropping stale connection event");
                    return;
                }
                match event {
                    ConnectionEvent::Connected => self.on_connected(generation).await,
                    ConnectionEvent::Disconnected(err) => self.on_disconnected(err),
                    ConnectionEvent::Error(err) => self.on_error(&err),
                }
            }
            Message::Push {
                generation,
                source,
                result,
            } => {
                if self.current_generation(generation) {
                    self.on_push(source, result);
                }
            }
        }
    }

    fn on_error(&self, err: &ProtocolError) {
        tracing::warn!(host = %self.address, error = %err, "Connection error");
        self.fields.lock().input = None;
    }

    fn on_disconnected(&self, err: Option<ProtocolError>) {
        if let Some(err) = err {
            tracing::warn!(host = %self.address, error = %err, "Connection dropped");
            self.merge(&StateUpdate::power(PowerState::Off));
            return;
        }

        {
            let mut fields = self.fields.lock();
            fields.pending = None;
            fields.connection = None;
            fields.input = None;
        }
        tracing::info!(host = %self.address, "Disconnected");
        self.merge(&StateUpdate::power(PowerState::Off));
        self.events.publish(SessionEvent::disconnected(&self.address));
    }

    async fn on_connected(&self, generation: u64) {
        let connection = {
            let mut fields = self.fields.lock();
            let Some(connection) = fields.pending.take() else {
                return;
            };
            fields.connection = Some(Arc::clone(&connection));
            connection
        };
        tracing::info!(host = %self.address, "Connected");

        match connection.input_socket().await {
            Ok(input) => {
                let mut fields = self.fields.lock();
                if fields.generation == generation {
                    fields.input = Some(Arc::new(input));
                }
            }
            Err(e) => tracing::warn!(host = %self.address, error = %e, "Input socket unavailable"),
        }

        match connection.request(LAUNCH_POINTS_URI, None).await {
            Ok(payload) => match process_launch_points(&payload) {
                Some(launch_points) => self.merge(&StateUpdate::launch_points(launch_points)),
                None => tracing::warn!(host = %self.address, "Launch point response has no list"),
            },
            Err(e) => tracing::warn!(host = %self.address, error = %e, "Failed to list launch points"),
        }

        for field in StateField::ALL {
            match connection.subscribe(field.uri()) {
                Ok(pushes) => self.forward_pushes(generation, PushSource::Field(field), pushes),
                Err(e) => tracing::warn!(host = %self.address, field = %field, error = %e, "Subscription failed"),
            }
        }

        match connection.subscribe(LAUNCH_POINTS_URI) {
            Ok(pushes) => self.forward_pushes(generation, PushSource::LaunchPoints, pushes),
            Err(e) => tracing::warn!(host = %self.address, error = %e, "Launch point subscription failed"),
        }

        self.merge(&StateUpdate::power(PowerState::On));
        self.events.publish(SessionEvent::connected(&self.address));
    }

    fn forward_pushes(&self, generation: u64, source: PushSource, mut pushes: PushReceiver) {
        let mailbox = self.mailbox.clone();
        tokio::spawn(async move {
            while let Some(result) = pushes.recv().await {
                let message = Message::Push {
                    generation,
                    source,
                    result,
                };
                if mailbox.send(message).is_err() {
                    break;
                }
            }
        });
    }

    fn on_push(&self, source: PushSource, result: std::result::Result<Value, ProtocolError>) {
        let info = match result {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(host = %self.address, source = ?source, error = %e, "Subscription push failed");
                return;
            }
        };

        let update = match source {
            PushSource::LaunchPoints => match process_launch_points(&info) {
                Some(launch_points) => StateUpdate::launch_points(launch_points),
                None => return,
            },
            PushSource::Field(field) => {
                let connected = self.is_connected();
                let current = self.state_tx.borrow().clone();
                match aggregation::push_update(field, info, &current, connected) {
                    Ok(update) => update,
                    Err(e) => {
                        tracing::warn!(host = %self.address, field = %field, error = %e, "Malformed push");
                        return;
                    }
                }
            }
        };

        tracing::trace!(host = %self.address, source = ?source, "Applying push");
        self.merge(&update);
    }
}

async fn run_mailbox<C: Connector, W: WakeSender>(
    session: Weak<Session<C, W>>,
    mut mailbox: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(message) = mailbox.recv().await {
        let Some(session) = session.upgrade() else {
            break;
        };
        session.handle(message).await;
    }
}
