// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT connection of the bridge.
//!
//! # Examples
//!
//! ```no_run
//! use lgtv_bridge::bus::MqttBus;
//!
//! # async fn example() -> Result<(), lgtv_bridge::ProtocolError> {
//! let (bus, mut commands) = MqttBus::builder()
//!     .host("192.168.1.50")
//!     .port(1883)
//!     .topic_root("lgtv")
//!     .build()
//!     .await?;
//!
//! while let Some(command) = commands.recv().await {
//!     println!("{} <- {}", command.address, command.command);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, Publish, QoS};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::config::{BrokerAddress, DEFAULT_MQTT_PORT, DEFAULT_TOPIC_ROOT};
use crate::error::ProtocolError;
use crate::state::DeviceState;

use super::bridge::Publisher;
use super::message::{CommandResult, InboundCommand, StatusMessage};
use super::topics::TopicRoot;

/// Pause between poll attempts after a connection error.
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Capacity of the inbound command channel.
const COMMAND_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct MqttBusConfig {
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
    keep_alive: Duration,
    connection_timeout: Duration,
    topics: TopicRoot,
}

impl Default for MqttBusConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_MQTT_PORT,
            credentials: None,
            keep_alive: Duration::from_secs(30),
            connection_timeout: Duration::from_secs(10),
            topics: TopicRoot::new(DEFAULT_TOPIC_ROOT),
        }
    }
}

/// Connection to the control bus.
///
/// Cheaply cloneable. Publishes state snapshots and command results; inbound
/// commands arrive on the receiver returned by [`MqttBusBuilder::build`].
#[derive(Clone)]
pub struct MqttBus {
    inner: Arc<MqttBusInner>,
}

struct MqttBusInner {
    client: AsyncClient,
    config: MqttBusConfig,
    connected: AtomicBool,
}

impl MqttBus {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> MqttBusBuilder {
        MqttBusBuilder::default()
    }

    /// Connects to `broker` using the topic namespace `root`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectionFailed` if the broker does not
    /// acknowledge the connection in time.
    pub async fn connect(
        broker: &BrokerAddress,
        root: &str,
    ) -> Result<(Self, mpsc::Receiver<InboundCommand>), ProtocolError> {
        Self::builder()
            .host(&broker.host)
            .port(broker.port)
            .topic_root(root)
            .build()
            .await
    }

    /// Returns whether the broker connection is currently up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::Acquire)
    }

    /// Returns the topic namespace.
    #[must_use]
    pub fn topics(&self) -> &TopicRoot {
        &self.inner.config.topics
    }

    /// Disconnects from the broker.
    ///
    /// # Errors
    ///
    /// Returns error if the disconnect request cannot be queued.
    pub async fn disconnect(&self) -> Result<(), ProtocolError> {
        tracing::info!(
            host = %self.inner.config.host,
            port = %self.inner.config.port,
            "Disconnecting from MQTT broker"
        );
        self.inner.client.disconnect().await?;
        self.inner.connected.store(false, Ordering::Release);
        Ok(())
    }

    async fn publish(&self, topic: String, retain: bool, payload: Vec<u8>) -> Result<(), ProtocolError> {
        tracing::debug!(topic = %topic, retain, "Publishing");
        self.inner
            .client
            .publish(topic, QoS::AtLeastOnce, retain, payload)
            .await?;
        Ok(())
    }
}

impl Publisher for MqttBus {
    async fn publish_state(&self, address: &str, state: &DeviceState) -> Result<(), ProtocolError> {
        let payload = serde_json::to_vec(&StatusMessage::now(state.clone()))?;
        self.publish(self.topics().status(address), true, payload).await
    }

    async fn publish_result(&self, address: &str, result: &CommandResult) -> Result<(), ProtocolError> {
        let payload = serde_json::to_vec(result)?;
        self.publish(self.topics().result(address), false, payload).await
    }
}

impl std::fmt::Debug for MqttBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MqttBus")
            .field("host", &self.inner.config.host)
            .field("port", &self.inner.config.port)
            .field("root", &self.inner.config.topics.root())
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Builder for an [`MqttBus`].
#[derive(Debug, Default)]
pub struct MqttBusBuilder {
    config: MqttBusConfig,
}

impl MqttBusBuilder {
    /// Sets the broker host address.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the broker port (default: 1883).
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets authentication credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the keep-alive interval (default: 30 seconds).
    #[must_use]
    pub fn keep_alive(mut self, duration: Duration) -> Self {
        self.config.keep_alive = duration;
        self
    }

    /// Sets the connection timeout (default: 10 seconds).
    #[must_use]
    pub fn connection_timeout(mut self, duration: Duration) -> Self {
        self.config.connection_timeout = duration;
        self
    }

    /// Sets the topic root (default: `lgtv`).
    #[must_use]
    pub fn topic_root(mut self, root: impl Into<String>) -> Self {
        self.config.topics = TopicRoot::new(root);
        self
    }

    /// Connects to the broker and waits for its acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Host is not set
    /// - The connection is not acknowledged within the timeout
    pub async fn build(self) -> Result<(MqttBus, mpsc::Receiver<InboundCommand>), ProtocolError> {
        if self.config.host.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "MQTT broker host is required".to_string(),
            ));
        }

        let client_id = format!("lgtv_bridge_{}", Uuid::new_v4().simple());
        let mut options = MqttOptions::new(&client_id, &self.config.host, self.config.port);
        options.set_keep_alive(self.config.keep_alive);
        options.set_clean_session(true);
        if let Some((ref username, ref password)) = self.config.credentials {
            options.set_credentials(username, password);
        }

        let (client, event_loop) = AsyncClient::new(options, 10);
        let bus = MqttBus {
            inner: Arc::new(MqttBusInner {
                client,
                config: self.config,
                connected: AtomicBool::new(false),
            }),
        };

        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (connack_tx, connack_rx) = oneshot::channel();
        let task = tokio::spawn(handle_bus_events(
            event_loop,
            bus.clone(),
            commands_tx,
            connack_tx,
        ));

        let config = &bus.inner.config;
        match tokio::time::timeout(config.connection_timeout, connack_rx).await {
            Ok(Ok(())) => {
                tracing::info!(
                    host = %config.host,
                    port = %config.port,
                    client_id = %client_id,
                    "Connected to MQTT broker"
                );
                Ok((bus, commands_rx))
            }
            Ok(Err(_)) => {
                task.abort();
                Err(ProtocolError::ConnectionFailed(
                    "MQTT event loop terminated unexpectedly".to_string(),
                ))
            }
            Err(_) => {
                task.abort();
                Err(ProtocolError::ConnectionFailed(format!(
                    "MQTT connection timeout after {}s",
                    config.connection_timeout.as_secs()
                )))
            }
        }
    }
}

/// Converts a publish on a command topic into an [`InboundCommand`].
fn inbound_command(topics: &TopicRoot, publish: &Publish) -> Option<InboundCommand> {
    let Some(parsed) = topics.parse_command(&publish.topic) else {
        tracing::debug!(topic = %publish.topic, "Ignoring message on foreign topic");
        return None;
    };
    let Ok(command) = std::str::from_utf8(&publish.payload) else {
        tracing::warn!(topic = %publish.topic, "Ignoring non UTF-8 command payload");
        return None;
    };

    Some(InboundCommand {
        address: parsed.address.to_string(),
        key: parsed.key.to_string(),
        command: command.trim().to_string(),
    })
}

/// Drives the MQTT event loop until the command receiver is dropped.
///
/// Subscribes to the command filter on every ConnAck so that the
/// subscription survives broker reconnects.
async fn handle_bus_events(
    mut event_loop: EventLoop,
    bus: MqttBus,
    commands: mpsc::Sender<InboundCommand>,
    connack_tx: oneshot::Sender<()>,
) {
    let mut connack_tx = Some(connack_tx);
    let filter = bus.topics().command_filter();

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                tracing::debug!(?connack, "MQTT broker connected");
                bus.inner.connected.store(true, Ordering::Release);
                if let Err(e) = bus.inner.client.try_subscribe(&filter, QoS::AtLeastOnce) {
                    tracing::warn!(filter = %filter, error = %e, "Failed to subscribe to command topics");
                }
                if let Some(tx) = connack_tx.take() {
                    let _ = tx.send(());
                }
            }
            Ok(Event::Incoming(Packet::SubAck(suback))) => {
                tracing::debug!(?suback, "MQTT subscription acknowledged");
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                let Some(command) = inbound_command(bus.topics(), &publish) else {
                    continue;
                };
                tracing::debug!(
                    host = %command.address,
                    key = %command.key,
                    command = %command.command,
                    "Command received"
                );
                if commands.send(command).await.is_err() {
                    break;
                }
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                tracing::info!("MQTT broker disconnected");
                bus.inner.connected.store(false, Ordering::Release);
            }
            Ok(_) => {}
            Err(e) => {
                bus.inner.connected.store(false, Ordering::Release);
                if commands.is_closed() {
                    break;
                }
                tracing::warn!(error = %e, "MQTT event loop error, retrying");
                tokio::time::sleep(RETRY_PAUSE).await;
            }
        }
    }
    tracing::debug!("MQTT event loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_default_values() {
        let builder = MqttBusBuilder::default();
        assert!(builder.config.host.is_empty());
        assert_eq!(builder.config.port, 1883);
        assert!(builder.config.credentials.is_none());
        assert_eq!(builder.config.keep_alive, Duration::from_secs(30));
        assert_eq!(builder.config.connection_timeout, Duration::from_secs(10));
        assert_eq!(builder.config.topics.root(), "lgtv");
    }

    #[test]
    fn builder_chain() {
        let builder = MqttBusBuilder::default()
            .host("192.168.1.50")
            .port(8883)
            .credentials("admin", "secret")
            .keep_alive(Duration::from_secs(45))
            .connection_timeout(Duration::from_secs(15))
            .topic_root("home/tv");

        assert_eq!(builder.config.host, "192.168.1.50");
        assert_eq!(builder.config.port, 8883);
        assert_eq!(
            builder.config.credentials,
            Some(("admin".to_string(), "secret".to_string()))
        );
        assert_eq!(builder.config.keep_alive, Duration::from_secs(45));
        assert_eq!(builder.config.connection_timeout, Duration::from_secs(15));
        assert_eq!(builder.config.topics.root(), "home/tv");
    }

    #[tokio::test]
    async fn builder_missing_host_fails() {
        let result = MqttBusBuilder::default().build().await;
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn publish_on_command_topic_becomes_command() {
        let topics = TopicRoot::new("lgtv");
        let publish = Publish::new("lgtv/10.0.0.20/set/remote", QoS::AtLeastOnce, " KEY_ENTER\n");

        assert_eq!(
            inbound_command(&topics, &publish),
            Some(InboundCommand {
                address: "10.0.0.20".to_string(),
                key: "remote".to_string(),
                command: "KEY_ENTER".to_string(),
            })
        );
    }

    #[test]
    fn foreign_or_binary_publish_is_ignored() {
        let topics = TopicRoot::new("lgtv");

        let status = Publish::new("lgtv/10.0.0.20/status", QoS::AtLeastOnce, "{}");
        assert!(inbound_command(&topics, &status).is_none());

        let binary = Publish::new("lgtv/10.0.0.20/set/power", QoS::AtLeastOnce, vec![0xff, 0xfe]);
        assert!(inbound_command(&topics, &binary).is_none());
    }
}
