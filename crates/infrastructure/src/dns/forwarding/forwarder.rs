use crate::dns::transport::DnsTransport;
use crate::dns::wire::PacketCodec;
use async_trait::async_trait;
use dns_relay_application::ports::UpstreamResolver;
use dns_relay_domain::{DomainError, Packet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Forwards query packets to one upstream resolver over a [`DnsTransport`].
pub struct UdpForwarder {
    transport: Arc<dyn DnsTransport>,
    codec: PacketCodec,
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new(transport: Arc<dyn DnsTransport>, codec: PacketCodec, timeout: Duration) -> Self {
        Self {
            transport,
            codec,
            timeout,
        }
    }
}

#[async_trait]
impl UpstreamResolver for UdpForwarder {
    async fn forward(&self, query: &Packet) -> Result<Packet, DomainError> {
        let mut query = query.clone();
        let query_bytes = self.codec.encode(&mut query)?;

        let response = self.transport.send(&query_bytes, self.timeout).await?;
        validate_response_id(&query_bytes, &response.bytes, self.transport.server_addr())?;

        let packet = self.codec.decode(&response.bytes)?;

        debug!(
            server = %response.from,
            protocol = self.transport.protocol_name(),
            id = packet.header.id,
            rcode = %packet.header.rescode,
            "Upstream response decoded"
        );

        Ok(packet)
    }

    fn server(&self) -> String {
        self.transport.server_addr().to_string()
    }
}

/// The reply must echo the id of the query it answers.
pub fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::NetworkIo(format!(
            "Message from {} too short to carry an id",
            server
        )));
    }

    let query_id = u16::from_be_bytes([query[0], query[1]]);
    let response_id = u16::from_be_bytes([response[0], response[1]]);

    if query_id != response_id {
        return Err(DomainError::NetworkIo(format!(
            "Response id mismatch from {}: sent {}, got {}",
            server, query_id, response_id
        )));
    }

    Ok(())
}
