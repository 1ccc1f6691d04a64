// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription push aggregation rules.

use serde_json::Value;

use crate::state::{DeviceState, StateField, StateUpdate};
use crate::types::PowerState;

/// Builds the update for a push on `field`, given the current snapshot.
///
/// - a foreground app push with an empty `appId` also sets power off
/// - otherwise, any push while power is off on a live session sets power on
pub(crate) fn push_update(
    field: StateField,
    info: Value,
    current: &DeviceState,
    connected: bool,
) -> Result<StateUpdate, serde_json::Error> {
    let update = StateUpdate::from_push(field, info)?;

    if update.left_foreground_app() {
        Ok(update.with_power(PowerState::Off))
    } else if current.is_off() && connected {
        Ok(update.with_power(PowerState::On))
    } else {
        Ok(update)
    }
}
