// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconnect supervisor.
//!
//! Sits above a [`Session`] and calls [`Session::connect`] again after a
//! graceful disconnect, waiting per [`ReconnectionPolicy`] between attempts.
//! Transient drops (a disconnect carrying an error) are left alone.

use std::sync::{Arc, Weak};
use std::time::Duration;

use rand::Rng;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::event::SessionEvent;
use crate::protocol::Connector;
use crate::wake::WakeSender;

use super::Session;

/// Reconnect backoff: `min(initial_delay * 2^attempt, max_delay) + jitter`.
///
/// The default caps the delay at 4 s plus up to 500 ms of jitter, which
/// keeps a reconnect inside the default 5 s power-on poll.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lgtv_bridge::session::ReconnectionPolicy;
///
/// let policy = ReconnectionPolicy::default();
/// assert_eq!(policy.base_delay(10), Duration::from_secs(4));
///
/// let policy = ReconnectionPolicy::default()
///     .with_max_retries(5)
///     .with_initial_delay(Duration::from_millis(250))
///     .with_jitter(Duration::ZERO);
/// assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectionPolicy {
    /// Consecutive attempts before giving up (`None` retries forever).
    pub max_retries: Option<u32>,
    /// Delay before the first attempt.
    pub initial_delay: Duration,
    /// Cap on the doubled delay.
    pub max_delay: Duration,
    /// Upper bound of the random delay added to every attempt.
    pub jitter: Duration,
}

impl ReconnectionPolicy {
    /// Stops after `max_retries` consecutive attempts without a connect.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the jitter bound. `Duration::ZERO` makes delays deterministic.
    #[must_use]
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Returns the capped exponential delay for `attempt` (zero-based),
    /// without jitter.
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Returns the delay to sleep before `attempt`, jitter included.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ms)
        };
        self.base_delay(attempt) + Duration::from_millis(jitter)
    }

    /// Returns `true` if `attempt` is still allowed.
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        self.max_retries.is_none_or(|max| attempt < max)
    }
}

impl Default for ReconnectionPolicy {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(4),
            jitter: Duration::from_millis(500),
        }
    }
}

/// Handle to a running supervisor task.
#[derive(Debug)]
pub struct SupervisorHandle {
    task: JoinHandle<()>,
}

impl SupervisorHandle {
    /// Stops supervising. The session itself is left as is.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Returns `true` once the supervisor has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Reconnects `session` after graceful disconnects according to `policy`.
///
/// The supervisor subscribes before returning, so a disconnect emitted
/// right after this call is not missed. A successful connect resets the
/// backoff. It stops once the session is dropped.
pub fn supervise<C: Connector, W: WakeSender>(
    session: &Arc<Session<C, W>>,
    policy: ReconnectionPolicy,
) -> SupervisorHandle {
    let mut events = session.subscribe_events();
    let address = session.address().to_string();
    let session: Weak<Session<C, W>> = Arc::downgrade(session);

    let task = tokio::spawn(async move {
        let mut attempt = 0u32;

        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(host = %address, skipped, "Supervisor lagged behind session events");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if event.address() != address {
                continue;
            }

            match event {
                SessionEvent::Connected { .. } => attempt = 0,
                SessionEvent::Disconnected { .. } => {
                    if !policy.should_retry(attempt) {
                        tracing::warn!(host = %address, attempt, "Giving up on reconnection");
                        continue;
                    }

                    let delay = policy.delay_for_attempt(attempt);
                    attempt += 1;
                    tracing::info!(host = %address, attempt, delay = ?delay, "Reconnecting");
                    tokio::time::sleep(delay).await;

                    let Some(session) = session.upgrade() else {
                        break;
                    };
                    session.connect();
                }
                SessionEvent::StateChanged { .. } => {}
            }
        }
    });

    SupervisorHandle { task }
}
