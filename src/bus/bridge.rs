// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Glue between the bus and the session registry.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::ProtocolError;
use crate::event::SessionEvent;
use crate::protocol::Connector;
use crate::registry::SessionRegistry;
use crate::state::DeviceState;
use crate::wake::WakeSender;

use super::message::{CommandResult, InboundCommand};

/// Outbound side of the bus.
pub trait Publisher: Clone + Send + Sync + 'static {
    /// Publishes the full state snapshot of `address`.
    fn publish_state(
        &self,
        address: &str,
        state: &DeviceState,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Publishes the outcome of a command sent to `address`.
    fn publish_result(
        &self,
        address: &str,
        result: &CommandResult,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

/// Runs the bridge until `commands` is closed.
///
/// Every merge into the snapshot of a registered session is published
/// through `publisher`, in order and without coalescing. Each inbound
/// command is dispatched on its own task so a slow device never holds up
/// the others; its result is published when dispatch completes.
pub async fn run_bridge<P, C, W>(
    publisher: P,
    mut commands: mpsc::Receiver<InboundCommand>,
    registry: Arc<SessionRegistry<C, W>>,
) where
    P: Publisher,
    C: Connector,
    W: WakeSender,
{
    let mut forwarders = JoinSet::new();
    for session in registry.sessions() {
        let publisher = publisher.clone();
        let address = session.address().to_string();
        let latest = session.watch_state();
        let mut events = session.subscribe_events();
        forwarders.spawn(async move {
            loop {
                let snapshot = match events.recv().await {
                    Ok(SessionEvent::StateChanged { address: from, state }) if from == address => state,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(host = %address, skipped, "State publisher lagged, publishing latest snapshot");
                        latest.borrow().clone()
                    }
                    Err(RecvError::Closed) => break,
                };
                if let Err(e) = publisher.publish_state(&address, &snapshot).await {
                    tracing::warn!(host = %address, error = %e, "Failed to publish state");
                }
            }
        });
    }
    tracing::info!(devices = registry.len(), "Bridge running");

    while let Some(command) = commands.recv().await {
        let publisher = publisher.clone();
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let InboundCommand {
                address,
                key,
                command,
            } = command;

            let outcome = registry.dispatch(&address, &key, &command).await;
            match &outcome {
                Ok(()) => tracing::debug!(host = %address, key = %key, command = %command, "Command completed"),
                Err(e) => tracing::warn!(host = %address, key = %key, command = %command, error = %e, "Command failed"),
            }

            let result = CommandResult::new(&key, &command, &outcome);
            if let Err(e) = publisher.publish_result(&address, &result).await {
                tracing::warn!(host = %address, error = %e, "Failed to publish command result");
            }
        });
    }

    tracing::info!("Command stream closed, stopping bridge");
    forwarders.abort_all();
}
