// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::PowerState;

use super::{LaunchPoints, StateUpdate};

/// Foreground application as reported by the TV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForegroundApp {
    /// Application id. An empty id means no application is in the foreground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Remaining payload fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Last known state of a TV.
///
/// All fields are optional because state is unknown until the TV reports
/// it. The serialized form uses the snapshot keys published on the bus
/// (`power`, `foregroundApp`, `appStatus`, `appState`, `volume`, `mute`,
/// `volumeStatus`, `launchPoints`, plus the auxiliary subscription keys).
///
/// # Examples
///
/// ```
/// use lgtv_bridge::state::{DeviceState, StateUpdate};
/// use lgtv_bridge::types::PowerState;
///
/// let mut state = DeviceState::new();
/// assert!(state.apply(&StateUpdate::power(PowerState::On)));
/// assert!(!state.apply(&StateUpdate::power(PowerState::On)));
/// assert_eq!(state.power(), Some(PowerState::On));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power: Option<PowerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    foreground_app: Option<ForegroundApp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mute: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume_status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    launch_points: Option<LaunchPoints>,
    /// Payloads from the identifier-only subscriptions.
    #[serde(flatten)]
    auxiliary: BTreeMap<String, Value>,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns `true` if the TV is known to be on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_some_and(|p| p.is_on())
    }

    /// Returns `true` if the TV is known to be off.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.power == Some(PowerState::Off)
    }

    /// Returns the foreground application.
    #[must_use]
    pub fn foreground_app(&self) -> Option<&ForegroundApp> {
        self.foreground_app.as_ref()
    }

    /// Returns the application status payload.
    #[must_use]
    pub fn app_status(&self) -> Option<&Value> {
        self.app_status.as_ref()
    }

    /// Returns the launcher state payload.
    #[must_use]
    pub fn app_state(&self) -> Option<&Value> {
        self.app_state.as_ref()
    }

    /// Returns the volume payload.
    #[must_use]
    pub fn volume(&self) -> Option<&Value> {
        self.volume.as_ref()
    }

    /// Returns the mute payload.
    #[must_use]
    pub fn mute(&self) -> Option<&Value> {
        self.mute.as_ref()
    }

    /// Returns the audio status payload.
    #[must_use]
    pub fn volume_status(&self) -> Option<&Value> {
        self.volume_status.as_ref()
    }

    /// Returns the launch points keyed by application id.
    #[must_use]
    pub fn launch_points(&self) -> Option<&LaunchPoints> {
        self.launch_points.as_ref()
    }

    /// Returns an auxiliary subscription payload by field name.
    #[must_use]
    pub fn auxiliary(&self, name: &str) -> Option<&Value> {
        self.auxiliary.get(name)
    }

    /// Merges a partial update into this state.
    ///
    /// Fields absent from the update are left untouched.
    ///
    /// Returns `true` if any field actually changed.
    pub fn apply(&mut self, update: &StateUpdate) -> bool {
        let mut changed = false;

        macro_rules! update_if_some {
            ($field:ident) => {
                if let Some(v) = &update.$field
                    && self.$field.as_ref() != Some(v)
                {
                    self.$field = Some(v.clone());
                    changed = true;
                }
            };
        }

        update_if_some!(power);
        update_if_some!(foreground_app);
        update_if_some!(app_status);
        update_if_some!(app_state);
        update_if_some!(volume);
        update_if_some!(mute);
        update_if_some!(volume_status);
        update_if_some!(launch_points);

        for (name, value) in &update.auxiliary {
            if self.auxiliary.get(name) != Some(value) {
                self.auxiliary.insert(name.clone(), value.clone());
                changed = true;
            }
        }

        changed
    }
}
