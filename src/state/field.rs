// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status topics subscribed on every connection.

use std::fmt;

/// A subscribed status topic and the snapshot field its pushes land in.
///
/// The last five variants are subscribed for completeness but rarely carry
/// live payloads; their pushes are kept in the snapshot's auxiliary map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    /// Application currently in the foreground.
    ForegroundApp,
    /// Application status notifications.
    AppStatus,
    /// Launcher application state.
    AppState,
    /// Volume level.
    Volume,
    /// Mute flag.
    Mute,
    /// Combined audio status.
    VolumeStatus,
    /// Launcher close notifications.
    CloseApp,
    /// Media viewer close notifications.
    CloseMedia,
    /// Web app close notifications.
    CloseWebapp,
    /// Power-on notifications.
    PowerOn,
    /// Power-off notifications.
    PowerOff,
}

impl StateField {
    /// Every subscribed field, in subscription order.
    pub const ALL: [Self; 11] = [
        Self::ForegroundApp,
        Self::AppStatus,
        Self::AppState,
        Self::Volume,
        Self::Mute,
        Self::VolumeStatus,
        Self::CloseApp,
        Self::CloseMedia,
        Self::CloseWebapp,
        Self::PowerOn,
        Self::PowerOff,
    ];

    /// Returns the snapshot key for this field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ForegroundApp => "foregroundApp",
            Self::AppStatus => "appStatus",
            Self::AppState => "appState",
            Self::Volume => "volume",
            Self::Mute => "mute",
            Self::VolumeStatus => "volumeStatus",
            Self::CloseApp => "CLOSE_APP_URI",
            Self::CloseMedia => "CLOSE_MEDIA_URI",
            Self::CloseWebapp => "CLOSE_WEBAPP_URI",
            Self::PowerOn => "powerOn",
            Self::PowerOff => "powerOff",
        }
    }

    /// Returns the protocol URI subscribed for this field.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::ForegroundApp => "ssap://com.webos.applicationManager/getForegroundAppInfo",
            Self::AppStatus => "ssap://com.webos.service.appstatus/getAppStatus",
            Self::AppState => "ssap://system.launcher/getAppState",
            Self::Volume => "ssap://audio/getVolume",
            Self::Mute => "ssap://audio/getMute",
            Self::VolumeStatus => "ssap://audio/getStatus",
            Self::CloseApp => "ssap://system.launcher/close",
            Self::CloseMedia => "ssap://media.viewer/close",
            Self::CloseWebapp => "ssap://webapp/closeWebApp",
            Self::PowerOn => "ssap://power/on",
            Self::PowerOff => "ssap://power/off",
        }
    }

    /// Returns `true` for fields kept in the auxiliary map.
    #[must_use]
    pub const fn is_auxiliary(&self) -> bool {
        matches!(
            self,
            Self::CloseApp | Self::CloseMedia | Self::CloseWebapp | Self::PowerOn | Self::PowerOff
        )
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
