// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote-control commands received from the bus.
//!
//! Commands arrive as plain strings. Matching is exact and case-sensitive:
//!
//! | Input | Command |
//! |---|---|
//! | `POWERON` / `POWEROFF` | [`Command::PowerOn`] / [`Command::PowerOff`] |
//! | `KEY_<NAME>` | [`Command::Key`] with `<NAME>` |
//! | `LAUNCH-<APP>` | [`Command::Launch`] with `<APP>` |
//! | `REWIND`, `STOP`, `PAUSE`, `PLAY`, `FASTFORWARD`, `BACK` | [`Command::Media`] |

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const KEY_PREFIX: &str = "KEY_";
const LAUNCH_PREFIX: &str = "LAUNCH-";

/// Fixed media-control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaAction {
    /// Rewind playback.
    Rewind,
    /// Stop playback.
    Stop,
    /// Pause playback.
    Pause,
    /// Start or resume playback.
    Play,
    /// Fast-forward playback.
    FastForward,
    /// Navigate back.
    Back,
}

impl MediaAction {
    /// Returns the device action path for this media control.
    #[must_use]
    pub const fn action_path(&self) -> &'static str {
        match self {
            Self::Rewind => "media.controls/rewind",
            Self::Stop => "media.controls/stop",
            Self::Pause => "media.controls/pause",
            Self::Play => "media.controls/play",
            Self::FastForward => "media.controls/fastForward",
            Self::Back => "media.controls/back",
        }
    }

    /// Returns the bus command name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rewind => "REWIND",
            Self::Stop => "STOP",
            Self::Pause => "PAUSE",
            Self::Play => "PLAY",
            Self::FastForward => "FASTFORWARD",
            Self::Back => "BACK",
        }
    }
}

/// A parsed remote-control command.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::types::Command;
///
/// let cmd: Command = "KEY_ENTER".parse().unwrap();
/// assert_eq!(cmd, Command::Key("ENTER".to_string()));
///
/// let cmd: Command = "LAUNCH-netflix".parse().unwrap();
/// assert_eq!(cmd, Command::Launch("netflix".to_string()));
///
/// assert!("FOO".parse::<Command>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Wake the TV and wait for it to report power-on.
    PowerOn,
    /// Turn the TV off.
    PowerOff,
    /// Send a keystroke through the input socket.
    Key(String),
    /// Launch an application by id.
    Launch(String),
    /// Issue a fixed media-control request.
    Media(MediaAction),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(key) = s.strip_prefix(KEY_PREFIX) {
            return Ok(Self::Key(key.to_string()));
        }
        if let Some(app) = s.strip_prefix(LAUNCH_PREFIX) {
            return Ok(Self::Launch(app.to_string()));
        }

        let command = match s {
            "POWERON" => Self::PowerOn,
            "POWEROFF" => Self::PowerOff,
            "REWIND" => Self::Media(MediaAction::Rewind),
            "STOP" => Self::Media(MediaAction::Stop),
            "PAUSE" => Self::Media(MediaAction::Pause),
            "PLAY" => Self::Media(MediaAction::Play),
            "FASTFORWARD" => Self::Media(MediaAction::FastForward),
            "BACK" => Self::Media(MediaAction::Back),
            _ => return Err(Error::UnknownCommand(s.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerOn => write!(f, "POWERON"),
            Self::PowerOff => write!(f, "POWEROFF"),
            Self::Key(key) => write!(f, "{KEY_PREFIX}{key}"),
            Self::Launch(app) => write!(f, "{LAUNCH_PREFIX}{app}"),
            Self::Media(action) => write!(f, "{}", action.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_power_commands() {
        assert_eq!("POWERON".parse::<Command>().unwrap(), Command::PowerOn);
        assert_eq!("POWEROFF".parse::<Command>().unwrap(), Command::PowerOff);
    }

    #[test]
    fn parse_key_strips_prefix() {
        assert_eq!(
            "KEY_ENTER".parse::<Command>().unwrap(),
            Command::Key("ENTER".to_string())
        );
        assert_eq!(
            "KEY_VOLUMEUP".parse::<Command>().unwrap(),
            Command::Key("VOLUMEUP".to_string())
        );
    }

    #[test]
    fn parse_launch_strips_prefix() {
        assert_eq!(
            "LAUNCH-netflix".parse::<Command>().unwrap(),
            Command::Launch("netflix".to_string())
        );
        assert_eq!(
            "LAUNCH-com.webos.app.hdmi1".parse::<Command>().unwrap(),
            Command::Launch("com.webos.app.hdmi1".to_string())
        );
    }

    #[test]
    fn parse_media_actions() {
        let cases = [
            ("REWIND", MediaAction::Rewind),
            ("STOP", MediaAction::Stop),
            ("PAUSE", MediaAction::Pause),
            ("PLAY", MediaAction::Play),
            ("FASTFORWARD", MediaAction::FastForward),
            ("BACK", MediaAction::Back),
        ];
        for (input, action) in cases {
            assert_eq!(input.parse::<Command>().unwrap(), Command::Media(action));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(matches!(
            "poweron".parse::<Command>(),
            Err(Error::UnknownCommand(input)) if input == "poweron"
        ));
        assert!("key_ENTER".parse::<Command>().is_err());
    }

    #[test]
    fn parse_unknown_names_input() {
        let err = "FOO".parse::<Command>().unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(ref input) if input == "FOO"));
    }

    #[test]
    fn media_action_paths() {
        assert_eq!(MediaAction::Rewind.action_path(), "media.controls/rewind");
        assert_eq!(
            MediaAction::FastForward.action_path(),
            "media.controls/fastForward"
        );
        assert_eq!(MediaAction::Back.action_path(), "media.controls/back");
    }

    #[test]
    fn display_matches_bus_input() {
        for input in ["POWERON", "KEY_HOME", "LAUNCH-youtube.leanback.v4", "PLAY"] {
            assert_eq!(input.parse::<Command>().unwrap().to_string(), input);
        }
    }
}
