use async_trait::async_trait;
use dns_relay_domain::{DomainError, Packet};

/// Sends one query packet to the upstream resolver and returns its decoded
/// answer. Implementations own the transport and the wire codec.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn forward(&self, query: &Packet) -> Result<Packet, DomainError>;

    /// Upstream address, for logging.
    fn server(&self) -> String;
}
