// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pointer input socket.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use super::InputSocket;
use super::ssap_message::button_frame;
use crate::error::ProtocolError;

/// Secondary WebSocket used to inject button presses.
///
/// Frames are queued to a writer task; sending never waits for the TV.
#[derive(Debug, Clone)]
pub struct PointerSocket {
    frames: mpsc::UnboundedSender<String>,
}

impl PointerSocket {
    /// Opens the pointer socket at `path` (a `ws://` URL returned by the TV).
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::WebSocket` if the socket cannot be opened.
    pub async fn connect(path: &str) -> Result<Self, ProtocolError> {
        let (ws, _) = tokio_tungstenite::connect_async(path).await?;
        let (mut ws_tx, mut ws_rx) = ws.split();
        let (frames, mut frames_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    frame = frames_rx.recv() => {
                        let Some(frame) = frame else {
                            let _ = ws_tx.send(Message::Close(None)).await;
                            break;
                        };
                        if let Err(e) = ws_tx.send(Message::Text(frame.into())).await {
                            tracing::debug!(error = %e, "Pointer socket write failed");
                            break;
                        }
                    }
                    // Drained so control frames are answered.
                    message = ws_rx.next() => {
                        if !matches!(message, Some(Ok(_))) {
                            break;
                        }
                    }
                }
            }
        });

        Ok(Self { frames })
    }
}

impl InputSocket for PointerSocket {
    fn send_button(&self, name: &str) -> Result<(), ProtocolError> {
        self.frames
            .send(button_frame(name))
            .map_err(|_| ProtocolError::ChannelClosed("pointer socket closed".to_string()))
    }
}
