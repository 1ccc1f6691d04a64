// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting session events.

use tokio::sync::broadcast;

use super::SessionEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcast channel for session events.
///
/// Slow subscribers lose the oldest events once the buffer (default 256)
/// fills up and observe `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::event::{EventBus, SessionEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
/// assert_eq!(bus.publish(SessionEvent::connected("tv")), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns a receiver for all events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event and returns how many subscribers received it.
    ///
    /// Without subscribers the event is discarded and 0 is returned.
    #[allow(clippy::must_use_candidate)]
    pub fn publish(&self, event: SessionEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let bus = EventBus::new();

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn publish_delivers_to_multiple_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(SessionEvent::connected("192.168.1.20"));

        assert_eq!(rx1.recv().await.unwrap().address(), "192.168.1.20");
        assert_eq!(rx2.recv().await.unwrap().address(), "192.168.1.20");
    }

    #[test]
    fn publish_returns_zero_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(SessionEvent::disconnected("tv")), 0);
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::with_capacity(16);
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
