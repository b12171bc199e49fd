pub mod udp;

use async_trait::async_trait;
use dns_relay_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub from: SocketAddr,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Send one message and wait for exactly one reply, bounded by `timeout`.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn server_addr(&self) -> SocketAddr;

    fn protocol_name(&self) -> &'static str;
}
