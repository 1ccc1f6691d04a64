// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial state updates.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::PowerState;

use super::{ForegroundApp, LaunchPoints, StateField};

/// A partial update to a [`DeviceState`](super::DeviceState).
///
/// Only the fields set on the update are written when it is applied.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::state::{StateField, StateUpdate};
/// use lgtv_bridge::types::PowerState;
/// use serde_json::json;
///
/// let update = StateUpdate::from_push(StateField::Volume, json!({"volume": 12})).unwrap()
///     .with_power(PowerState::On);
/// assert_eq!(update.power, Some(PowerState::On));
/// assert!(update.foreground_app.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    /// New power state.
    pub power: Option<PowerState>,
    /// New foreground application.
    pub foreground_app: Option<ForegroundApp>,
    /// New application status payload.
    pub app_status: Option<Value>,
    /// New launcher state payload.
    pub app_state: Option<Value>,
    /// New volume payload.
    pub volume: Option<Value>,
    /// New mute payload.
    pub mute: Option<Value>,
    /// New audio status payload.
    pub volume_status: Option<Value>,
    /// Replacement launch point mapping.
    pub launch_points: Option<LaunchPoints>,
    /// Auxiliary subscription payloads keyed by field name.
    pub auxiliary: BTreeMap<String, Value>,
}

impl StateUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an update that only sets the power state.
    #[must_use]
    pub fn power(state: PowerState) -> Self {
        Self::new().with_power(state)
    }

    /// Creates an update that only replaces the launch points.
    #[must_use]
    pub fn launch_points(launch_points: LaunchPoints) -> Self {
        Self {
            launch_points: Some(launch_points),
            ..Self::default()
        }
    }

    /// Creates an update carrying a subscription push for `field`.
    ///
    /// # Errors
    ///
    /// Returns an error if a foreground-app push is not a JSON object.
    pub fn from_push(field: StateField, info: Value) -> Result<Self, serde_json::Error> {
        let mut update = Self::new();
        match field {
            StateField::ForegroundApp => {
                update.foreground_app = Some(serde_json::from_value(info)?);
            }
            StateField::AppStatus => update.app_status = Some(info),
            StateField::AppState => update.app_state = Some(info),
            StateField::Volume => update.volume = Some(info),
            StateField::Mute => update.mute = Some(info),
            StateField::VolumeStatus => update.volume_status = Some(info),
            StateField::CloseApp
            | StateField::CloseMedia
            | StateField::CloseWebapp
            | StateField::PowerOn
            | StateField::PowerOff => {
                update.auxiliary.insert(field.name().to_string(), info);
            }
        }
        Ok(update)
    }

    /// Sets the power state on this update.
    #[must_use]
    pub fn with_power(mut self, state: PowerState) -> Self {
        self.power = Some(state);
        self
    }

    /// Sets the volume payload on this update.
    #[must_use]
    pub fn with_volume(mut self, volume: Value) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Sets the mute payload on this update.
    #[must_use]
    pub fn with_mute(mut self, mute: Value) -> Self {
        self.mute = Some(mute);
        self
    }

    /// Returns `true` if this update carries a foreground app with an empty id.
    #[must_use]
    pub fn left_foreground_app(&self) -> bool {
        self.foreground_app
            .as_ref()
            .is_some_and(|app| app.app_id.as_deref() == Some(""))
    }

    /// Returns `true` if the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
