// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `lgtv-bridge` binary: reads flags and environment, connects the bus, and
//! runs one session per configured TV until interrupted.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lgtv_bridge::bus::{MqttBus, run_bridge};
use lgtv_bridge::config::BridgeConfig;
use lgtv_bridge::{
    MagicPacketSender, ProtocolError, ReconnectionPolicy, Session, SessionRegistry, SsapConnector,
    supervise,
};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = BridgeConfig::parse();
    init_logging();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Bridge stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: BridgeConfig) -> Result<(), ProtocolError> {
    let (bus, commands) = MqttBus::connect(&config.broker, &config.topic_root).await?;

    let connector = SsapConnector::new(config.key_dir.clone());
    let mut registry = SessionRegistry::new();
    let mut supervisors = Vec::new();
    for device in &config.devices {
        let session = Session::builder(&device.address, connector.clone(), MagicPacketSender::default())
            .maybe_hardware_identifier(device.mac)
            .build();
        if config.reconnect {
            supervisors.push(supervise(&session, ReconnectionPolicy::default()));
        }
        tracing::info!(host = %device.address, mac = ?device.mac, "Device configured");
        registry.insert(session);
    }
    registry.connect_all();

    let bridge = tokio::spawn(run_bridge(bus.clone(), commands, Arc::new(registry)));
    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted, shutting down"),
        result = bridge => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Bridge task failed");
            }
        }
    }

    for supervisor in &supervisors {
        supervisor.abort();
    }
    bus.disconnect().await
}
