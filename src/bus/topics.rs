// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topic naming.
//!
//! ```text
//! <root>/<address>/status        retained state snapshot
//! <root>/<address>/set/<key>     inbound command, payload = command string
//! <root>/<address>/result        command outcome
//! ```

/// A command topic split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTopic<'a> {
    /// Target device address.
    pub address: &'a str,
    /// Originating control key (may be empty).
    pub key: &'a str,
}

/// Topic namespace of the bridge.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::bus::TopicRoot;
///
/// let topics = TopicRoot::new("lgtv");
/// assert_eq!(topics.status("192.168.1.20"), "lgtv/192.168.1.20/status");
///
/// let parsed = topics.parse_command("lgtv/192.168.1.20/set/power").unwrap();
/// assert_eq!(parsed.address, "192.168.1.20");
/// assert_eq!(parsed.key, "power");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRoot {
    root: String,
}

impl TopicRoot {
    /// Creates a namespace under `root`. Trailing slashes are ignored.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the root prefix.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Topic carrying the retained state snapshot of `address`.
    #[must_use]
    pub fn status(&self, address: &str) -> String {
        format!("{}/{address}/status", self.root)
    }

    /// Topic carrying command results of `address`.
    #[must_use]
    pub fn result(&self, address: &str) -> String {
        format!("{}/{address}/result", self.root)
    }

    /// Topic a command for `address` issued by control `key` is sent to.
    #[must_use]
    pub fn command(&self, address: &str, key: &str) -> String {
        format!("{}/{address}/set/{key}", self.root)
    }

    /// Subscription filter matching every command topic.
    #[must_use]
    pub fn command_filter(&self) -> String {
        format!("{}/+/set/#", self.root)
    }

    /// Splits a command topic, or returns `None` if `topic` is not one.
    #[must_use]
    pub fn parse_command<'a>(&self, topic: &'a str) -> Option<CommandTopic<'a>> {
        let rest = topic.strip_prefix(self.root.as_str())?.strip_prefix('/')?;
        let (address, rest) = rest.split_once('/')?;
        if address.is_empty() {
            return None;
        }

        let key = match rest.split_once('/') {
            Some(("set", key)) => key,
            None if rest == "set" => "",
            _ => return None,
        };
        Some(CommandTopic { address, key })
    }
}
