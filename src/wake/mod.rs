// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wake-on-LAN signalling.
//!
//! The session's power sequencer only needs "send a wake signal to this
//! hardware identifier"; [`WakeSender`] is that seam and
//! [`MagicPacketSender`] the network implementation.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use tokio::net::UdpSocket;

use crate::error::WakeError;
use crate::types::MacAddress;

/// Length of a magic packet: 6 sync bytes plus 16 repetitions of the MAC.
pub const MAGIC_PACKET_LEN: usize = 6 + 16 * 6;

/// Default destination of the broadcast.
pub const DEFAULT_TARGET: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::BROADCAST, 9);

/// Transmits wake signals.
///
/// Delivery is never confirmed; success only means the signal left this host.
pub trait WakeSender: Send + Sync + 'static {
    /// Sends a wake signal to `mac`.
    ///
    /// # Errors
    ///
    /// Returns `WakeError` if the signal could not be transmitted.
    fn wake(&self, mac: &MacAddress) -> impl Future<Output = Result<(), WakeError>> + Send;
}

/// Builds the magic packet for `mac`.
///
/// # Examples
///
/// ```
/// use lgtv_bridge::types::MacAddress;
/// use lgtv_bridge::wake::{magic_packet, MAGIC_PACKET_LEN};
///
/// let mac: MacAddress = "a8:23:fe:01:02:03".parse().unwrap();
/// let packet = magic_packet(&mac);
/// assert_eq!(packet.len(), MAGIC_PACKET_LEN);
/// assert_eq!(&packet[..6], &[0xFF; 6]);
/// ```
#[must_use]
pub fn magic_packet(mac: &MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [0xFF; MAGIC_PACKET_LEN];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac.octets());
    }
    packet
}

/// Sends magic packets over UDP broadcast.
#[derive(Debug, Clone, Copy)]
pub struct MagicPacketSender {
    target: SocketAddr,
}

impl MagicPacketSender {
    /// Creates a sender broadcasting to `255.255.255.255:9`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: SocketAddr::V4(DEFAULT_TARGET),
        }
    }

    /// Overrides the destination address.
    #[must_use]
    pub fn with_target(mut self, target: SocketAddr) -> Self {
        self.target = target;
        self
    }

    /// Returns the destination address.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Default for MagicPacketSender {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeSender for MagicPacketSender {
    async fn wake(&self, mac: &MacAddress) -> Result<(), WakeError> {
        let packet = magic_packet(mac);
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        socket.set_broadcast(true)?;

        let sent = socket.send_to(&packet, self.target).await?;
        if sent != packet.len() {
            return Err(WakeError::ShortWrite {
                sent,
                expected: packet.len(),
            });
        }

        tracing::debug!(mac = %mac, target = %self.target, "Sent magic packet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_repeats_mac() {
        let mac = MacAddress::new([1, 2, 3, 4, 5, 6]);
        let packet = magic_packet(&mac);

        assert_eq!(packet.len(), 102);
        assert!(packet[..6].iter().all(|&b| b == 0xFF));
        for chunk in packet[6..].chunks(6) {
            assert_eq!(chunk, &[1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn default_target_is_broadcast_discard_port() {
        let sender = MagicPacketSender::default();
        assert_eq!(sender.target().to_string(), "255.255.255.255:9");
    }

    #[tokio::test]
    async fn sends_packet_to_target() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let sender = MagicPacketSender::new().with_target(receiver.local_addr().unwrap());
        let mac = MacAddress::new([0xa8, 0x23, 0xfe, 0x10, 0x20, 0x30]);

        sender.wake(&mac).await.unwrap();

        let mut buf = [0u8; 256];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], &magic_packet(&mac)[..]);
    }
}
