// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lifecycle events emitted by sessions.
//!
//! Each [`Session`](crate::session::Session) owns an [`EventBus`] and
//! publishes [`SessionEvent`]s on it whenever the device connects,
//! disconnects, or its state snapshot changes.
//!
//! # Examples
//!
//! ```
//! use lgtv_bridge::event::{EventBus, SessionEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(SessionEvent::connected("192.168.1.20"));
//! ```

mod event_bus;
mod session_event;

pub use event_bus::EventBus;
pub use session_event::SessionEvent;
