// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Launch point (installed application) descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application ids containing this marker get bundled icon overrides.
pub const ICON_OVERRIDE_MARKER: &str = "vudu";

const OVERRIDE_ICON: &str = "/img/vudu.png";
const OVERRIDE_ICON_LARGE: &str = "/img/vudu_128x128.png";

/// Launch points keyed by application id.
pub type LaunchPoints = BTreeMap<String, LaunchPoint>;

/// A launchable application as reported by the TV.
///
/// Only the id is interpreted on the way in. Every other descriptor field
/// (title, icons, colors, flags) is kept in `extra` whatever its JSON type
/// and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPoint {
    /// Application id.
    pub id: String,
    /// Remaining descriptor fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LaunchPoint {
    /// Returns the display title when the TV reports it as a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    /// Returns the icon URL.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.text("icon")
    }

    /// Returns the large icon URL.
    #[must_use]
    pub fn icon_large(&self) -> Option<&str> {
        self.text("iconLarge")
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.extra.get(field).and_then(Value::as_str)
    }

    fn apply_icon_override(&mut self) {
        if self.id.contains(ICON_OVERRIDE_MARKER) {
            self.extra
                .insert("icon".to_string(), Value::from(OVERRIDE_ICON));
            self.extra
                .insert("iconLarge".to_string(), Value::from(OVERRIDE_ICON_LARGE));
        }
    }
}

/// Builds the launch point mapping from a raw `listLaunchPoints` payload.
///
/// Returns `None` when the payload carries no `launchPoints` list (for
/// instance an incremental change notification). Entries that do not
/// describe an application with an id are skipped.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::state::process_launch_points;
/// use serde_json::json;
///
/// let raw = json!({"launchPoints": [
///     {"id": "netflix", "title": "Netflix"},
///     {"id": "vudu.app", "title": "Vudu", "icon": "http://tv/vudu.png"},
/// ]});
/// let points = process_launch_points(&raw).unwrap();
///
/// assert_eq!(points["netflix"].icon(), None);
/// assert_eq!(points["vudu.app"].icon(), Some("/img/vudu.png"));
/// ```
#[must_use]
pub fn process_launch_points(raw: &Value) -> Option<LaunchPoints> {
    let entries = raw.get("launchPoints")?.as_array()?;

    let mut launch_points = LaunchPoints::new();
    for entry in entries {
        match serde_json::from_value::<LaunchPoint>(entry.clone()) {
            Ok(mut app) => {
                app.apply_icon_override();
                launch_points.insert(app.id.clone(), app);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed launch point");
            }
        }
    }
    Some(launch_points)
}
