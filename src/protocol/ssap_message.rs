// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SSAP frame encoding and decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ProtocolError;

/// Id of the registration request.
pub(crate) const REGISTER_ID: &str = "register_0";

const PERMISSIONS: &[&str] = &[
    "LAUNCH",
    "LAUNCH_WEBAPP",
    "APP_TO_APP",
    "CLOSE",
    "TEST_OPEN",
    "TEST_PROTECTED",
    "CONTROL_AUDIO",
    "CONTROL_DISPLAY",
    "CONTROL_INPUT_JOYSTICK",
    "CONTROL_INPUT_MEDIA_RECORDING",
    "CONTROL_INPUT_MEDIA_PLAYBACK",
    "CONTROL_INPUT_TV",
    "CONTROL_POWER",
    "CONTROL_INPUT_TEXT",
    "CONTROL_MOUSE_AND_KEYBOARD",
    "READ_APP_STATUS",
    "READ_CURRENT_CHANNEL",
    "READ_INPUT_DEVICE_LIST",
    "READ_NETWORK_STATE",
    "READ_RUNNING_APPS",
    "READ_TV_CHANNEL_LIST",
    "READ_INSTALLED_APPS",
    "READ_POWER_STATE",
    "READ_COUNTRY_INFO",
    "READ_SETTINGS",
    "WRITE_NOTIFICATION_TOAST",
];

/// Frame kinds sent to the TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutgoingKind {
    Register,
    Request,
    Subscribe,
}

/// A frame sent to the TV.
#[derive(Debug, Serialize)]
pub(crate) struct OutgoingFrame<'a> {
    #[serde(rename = "type")]
    pub kind: OutgoingKind,
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<&'a Value>,
}

impl<'a> OutgoingFrame<'a> {
    pub fn request(id: &'a str, uri: &'a str, payload: Option<&'a Value>) -> Self {
        Self {
            kind: OutgoingKind::Request,
            id,
            uri: Some(uri),
            payload,
        }
    }

    pub fn subscribe(id: &'a str, uri: &'a str) -> Self {
        Self {
            kind: OutgoingKind::Subscribe,
            id,
            uri: Some(uri),
            payload: None,
        }
    }

    pub fn register(payload: &'a Value) -> Self {
        Self {
            kind: OutgoingKind::Register,
            id: REGISTER_ID,
            uri: None,
            payload: Some(payload),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

/// A frame received from the TV.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IncomingFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl IncomingFrame {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(Into::into)
    }

    pub fn is_registered(&self) -> bool {
        self.kind == "registered"
    }

    pub fn is_error(&self) -> bool {
        self.kind == "error"
    }

    /// Returns the client key carried by a `registered` frame.
    pub fn client_key(&self) -> Option<&str> {
        self.payload.as_ref()?.get("client-key")?.as_str()
    }

    /// Converts a response frame into the request outcome.
    ///
    /// `type: "error"` and `returnValue: false` are both rejections.
    pub fn into_result(self) -> Result<Value, ProtocolError> {
        if self.is_error() {
            return Err(ProtocolError::Rejected(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let payload = self.payload.unwrap_or_else(|| json!({}));
        if payload.get("returnValue").and_then(Value::as_bool) == Some(false) {
            let reason = payload
                .get("errorText")
                .and_then(Value::as_str)
                .map(ToString::to_string)
                .or_else(|| payload.get("errorCode").map(ToString::to_string))
                .unwrap_or_else(|| "returnValue false".to_string());
            return Err(ProtocolError::Rejected(reason));
        }
        Ok(payload)
    }
}

/// Builds the registration payload, reusing a stored client key if present.
pub(crate) fn register_payload(client_key: Option<&str>) -> Value {
    let mut payload = json!({
        "forcePairing": false,
        "pairingType": "PROMPT",
        "manifest": {
            "manifestVersion": 1,
            "appVersion": "1.1",
            "permissions": PERMISSIONS,
        },
    });
    if let Some(key) = client_key {
        payload["client-key"] = Value::String(key.to_string());
    }
    payload
}

/// Formats a pointer socket button frame.
pub(crate) fn button_frame(name: &str) -> String {
    format!("type:button\nname:{name}\n\n")
}
