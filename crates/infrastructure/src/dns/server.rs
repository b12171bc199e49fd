use crate::dns::wire::PacketCodec;
use dns_relay_application::use_cases::HandleDnsQueryUseCase;
use dns_relay_domain::{DomainError, Packet, QueryPhase};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Turns one inbound datagram into at most one outbound datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    codec: PacketCodec,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>, codec: PacketCodec) -> Self {
        Self { use_case, codec }
    }

    /// Returns the encoded reply, or `None` when the query was abandoned.
    ///
    /// Any failure abandons only this query; the client gets no response.
    pub async fn handle_raw_udp(&self, query_bytes: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        debug!(
            phase = %QueryPhase::ReceivedQuery,
            client = %client,
            bytes = query_bytes.len(),
            "Datagram received"
        );

        match self.process(query_bytes, client).await {
            Ok(reply) => {
                debug!(
                    phase = %QueryPhase::Recomposed,
                    client = %client,
                    bytes = reply.len(),
                    "Reply ready"
                );
                Some(reply)
            }
            Err((phase, e)) if e.is_codec_error() => {
                warn!(
                    phase = %phase,
                    client = %client,
                    error = %e,
                    "Query abandoned: malformed message"
                );
                None
            }
            Err((phase, e)) => {
                error!(
                    phase = %phase,
                    client = %client,
                    error = %e,
                    "Query abandoned: upstream exchange failed"
                );
                None
            }
        }
    }

    async fn process(
        &self,
        query_bytes: &[u8],
        client: SocketAddr,
    ) -> Result<Vec<u8>, (QueryPhase, DomainError)> {
        let request = self
            .codec
            .decode(query_bytes)
            .map_err(|e| (QueryPhase::ReceivedQuery, e))?;

        log_request(&request, client);

        let mut reply = self
            .use_case
            .execute(&request)
            .await
            .map_err(|e| match e {
                DomainError::EmptyQuestion => (QueryPhase::Decoded, e),
                e => (QueryPhase::AwaitingUpstream, e),
            })?;

        self.codec
            .encode(&mut reply)
            .map_err(|e| (QueryPhase::Recomposed, e))
    }
}

fn log_request(request: &Packet, client: SocketAddr) {
    match request.questions.first() {
        Some(question) => info!(
            phase = %QueryPhase::Decoded,
            id = request.header.id,
            domain = %question.name,
            record_type = %question.qtype,
            client = %client.ip(),
            "DNS query received"
        ),
        None => info!(
            phase = %QueryPhase::Decoded,
            id = request.header.id,
            client = %client.ip(),
            "DNS query received without question"
        ),
    }
}
