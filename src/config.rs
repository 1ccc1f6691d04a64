// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process configuration.
//!
//! Every option can be given on the command line or through its
//! environment variable:
//!
//! | Flag          | Variable         | Required | Meaning                                   |
//! |---------------|------------------|----------|-------------------------------------------|
//! | `--mqtt-host` | `MQTT_HOST`      | yes      | Broker URL (`mqtt://host[:port]`)         |
//! | `--hosts`     | `LGTV_HOSTS`     | yes      | Comma-separated `address[;mac]` entries   |
//! | `--topic-root`| `TOPIC_ROOT`     | no       | Topic prefix, default `lgtv`              |
//! | `--key-dir`   | `LGTV_KEY_DIR`   | no       | Pairing key directory, default `.`        |
//! | `--reconnect` | `LGTV_RECONNECT` | no       | `on`/`off`, default `on`                  |

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser};

use crate::error::ConfigError;
use crate::types::MacAddress;

/// Default MQTT port.
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Default topic root.
pub const DEFAULT_TOPIC_ROOT: &str = "lgtv";

/// Broker host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl FromStr for BrokerAddress {
    type Err = ConfigError;

    /// Parses `mqtt://host[:port]`, `tcp://host[:port]` or a bare host.
    ///
    /// # Examples
    ///
    /// ```
    /// use lgtv_bridge::config::BrokerAddress;
    ///
    /// let broker: BrokerAddress = "mqtt://192.168.1.50:1884".parse().unwrap();
    /// assert_eq!(broker.host, "192.168.1.50");
    /// assert_eq!(broker.port, 1884);
    ///
    /// let broker: BrokerAddress = "broker.local".parse().unwrap();
    /// assert_eq!(broker.port, 1883);
    /// ```
    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidBroker(url.to_string());
        let url = url.trim();
        let rest = url
            .strip_prefix("mqtt://")
            .or_else(|| url.strip_prefix("tcp://"))
            .unwrap_or(url)
            .trim_end_matches('/');

        let (host, port) = match rest.rsplit_once(':') {
            Some((host, port)) => (host, port.parse().map_err(|_| invalid())?),
            None => (rest, DEFAULT_MQTT_PORT),
        };
        if host.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

/// One configured TV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Network address of the TV.
    pub address: String,
    /// Wake-on-LAN target.
    pub mac: Option<MacAddress>,
}

impl FromStr for DeviceConfig {
    type Err = ConfigError;

    /// Parses an `address[;mac]` entry. An empty MAC counts as absent.
    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (address, mac) = match entry.split_once(';') {
            Some((address, mac)) => (address.trim(), mac.trim()),
            None => (entry.trim(), ""),
        };
        if address.is_empty() {
            return Err(ConfigError::InvalidDevice(entry.to_string()));
        }

        let mac = if mac.is_empty() {
            None
        } else {
            Some(mac.parse()?)
        };
        Ok(Self {
            address: address.to_string(),
            mac,
        })
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(format!("expected on or off, got {other}")),
    }
}

/// Bridge configuration.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "lgtv-bridge")]
#[command(about = "Bridge LG webOS TVs to an MQTT control bus")]
#[command(version)]
pub struct BridgeConfig {
    /// MQTT broker URL (mqtt://host[:port])
    #[arg(long = "mqtt-host", env = "MQTT_HOST", value_name = "URL")]
    pub broker: BrokerAddress,

    /// TVs to bridge, comma-separated address[;mac] entries
    #[arg(
        long = "hosts",
        env = "LGTV_HOSTS",
        value_name = "DEVICES",
        value_delimiter = ',',
        required = true
    )]
    pub devices: Vec<DeviceConfig>,

    /// Topic prefix
    #[arg(long, env = "TOPIC_ROOT", default_value = DEFAULT_TOPIC_ROOT)]
    pub topic_root: String,

    /// Directory holding pairing key files
    #[arg(long, env = "LGTV_KEY_DIR", value_name = "DIR", default_value = ".")]
    pub key_dir: PathBuf,

    /// Reconnect after the TV closes its session (on/off)
    #[arg(
        long,
        env = "LGTV_RECONNECT",
        value_name = "on|off",
        default_value = "on",
        action = ArgAction::Set,
        value_parser = parse_switch
    )]
    pub reconnect: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<BridgeConfig, clap::Error> {
        BridgeConfig::try_parse_from(std::iter::once("lgtv-bridge").chain(args.iter().copied()))
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse(&["--mqtt-host", "mqtt://broker", "--hosts", "192.168.1.20"]).unwrap();

        assert_eq!(config.broker.host, "broker");
        assert_eq!(config.broker.port, 1883);
        assert_eq!(
            config.devices,
            vec![DeviceConfig {
                address: "192.168.1.20".to_string(),
                mac: None
            }]
        );
        assert_eq!(config.topic_root, "lgtv");
        assert_eq!(config.key_dir, PathBuf::from("."));
        assert!(config.reconnect);
    }

    #[test]
    fn full_config() {
        let config = parse(&[
            "--mqtt-host",
            "tcp://10.0.0.5:1884",
            "--hosts",
            "10.0.0.20;a8:23:fe:01:02:03, 10.0.0.21;",
            "--topic-root",
            "home/tv",
            "--key-dir",
            "/var/lib/lgtv",
            "--reconnect",
            "off",
        ])
        .unwrap();

        assert_eq!(config.broker.port, 1884);
        assert_eq!(config.devices.len(), 2);
        assert_eq!(
            config.devices[0].mac,
            Some(MacAddress::new([0xa8, 0x23, 0xfe, 0x01, 0x02, 0x03]))
        );
        assert_eq!(config.devices[1].address, "10.0.0.21");
        assert!(config.devices[1].mac.is_none());
        assert_eq!(config.topic_root, "home/tv");
        assert_eq!(config.key_dir, PathBuf::from("/var/lib/lgtv"));
        assert!(!config.reconnect);
    }

    #[test]
    fn missing_broker_or_hosts() {
        let err = parse(&["--hosts", "10.0.0.20"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["--mqtt-host", "broker"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let err = parse(&["--mqtt-host", "broker", "--hosts", "10.0.0.20;zz:00"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = parse(&["--mqtt-host", "broker:port", "--hosts", "10.0.0.20"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = parse(&[
            "--mqtt-host",
            "broker",
            "--hosts",
            "10.0.0.20",
            "--reconnect",
            "maybe",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn device_entry_parsing() {
        let entry: DeviceConfig = " 10.0.0.20 ; ".parse().unwrap();
        assert_eq!(entry.address, "10.0.0.20");
        assert!(entry.mac.is_none());

        assert_eq!(
            "10.0.0.20;zz:00".parse::<DeviceConfig>(),
            Err(ConfigError::InvalidMac("zz:00".to_string()))
        );
        assert!(matches!(
            ";a8:23:fe:01:02:03".parse::<DeviceConfig>(),
            Err(ConfigError::InvalidDevice(_))
        ));
    }

    #[test]
    fn broker_url_forms() {
        let broker: BrokerAddress = "tcp://10.0.0.5".parse().unwrap();
        assert_eq!((broker.host.as_str(), broker.port), ("10.0.0.5", 1883));

        assert!(matches!(
            "mqtt://broker:port".parse::<BrokerAddress>(),
            Err(ConfigError::InvalidBroker(_))
        ));
        assert!("mqtt://".parse::<BrokerAddress>().is_err());
    }
}
