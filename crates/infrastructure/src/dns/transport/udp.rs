//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing) and limited to 512 bytes. A fresh
//! socket is bound for every exchange and dropped when the exchange ends, on
//! success, error and timeout alike.

use super::{DnsTransport, TransportResponse};
use crate::dns::wire::MAX_PACKET_SIZE;
use async_trait::async_trait;
use dns_relay_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
    local_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, local_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            local_addr,
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::UpstreamTimeout {
            server: self.server_addr.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let exchange = async {
            let socket = UdpSocket::bind(self.local_addr).await.map_err(|e| {
                DomainError::NetworkIo(format!(
                    "Failed to bind UDP socket on {}: {}",
                    self.local_addr, e
                ))
            })?;

            let bytes_sent = socket
                .send_to(message_bytes, self.server_addr)
                .await
                .map_err(|e| {
                    DomainError::NetworkIo(format!(
                        "Failed to send UDP query to {}: {}",
                        self.server_addr, e
                    ))
                })?;

            debug!(
                server = %self.server_addr,
                bytes_sent = bytes_sent,
                "UDP query sent"
            );

            // One spare byte tells an oversized reply apart from a full one.
            let mut recv_buf = vec![0u8; MAX_PACKET_SIZE + 1];
            let (bytes_received, from_addr) =
                socket.recv_from(&mut recv_buf).await.map_err(|e| {
                    DomainError::NetworkIo(format!(
                        "Failed to receive UDP response from {}: {}",
                        self.server_addr, e
                    ))
                })?;

            Ok::<_, DomainError>((recv_buf, bytes_received, from_addr))
        };

        // One deadline covers bind, send and receive.
        let (mut recv_buf, bytes_received, from_addr) = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| self.timeout_error())??;

        if bytes_received > MAX_PACKET_SIZE {
            return Err(DomainError::MessageTooLarge {
                len: bytes_received,
            });
        }

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            from: from_addr,
        })
    }

    fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
