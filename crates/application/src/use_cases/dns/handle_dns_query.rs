use crate::ports::UpstreamResolver;
use dns_relay_domain::{DomainError, Header, Packet, QueryPhase, RecordData, ResourceRecord};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Forwards a decoded client query upstream and builds the client-facing reply.
pub struct HandleDnsQueryUseCase {
    upstream: Arc<dyn UpstreamResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(upstream: Arc<dyn UpstreamResolver>) -> Self {
        Self { upstream }
    }

    pub async fn execute(&self, request: &Packet) -> Result<Packet, DomainError> {
        let start = Instant::now();

        if request.questions.is_empty() {
            return Err(DomainError::EmptyQuestion);
        }

        let upstream_query = Self::build_upstream_query(request);

        debug!(
            phase = %QueryPhase::AwaitingUpstream,
            client_id = request.header.id,
            upstream_id = upstream_query.header.id,
            server = %self.upstream.server(),
            "Forwarding query"
        );

        let upstream_response = self.upstream.forward(&upstream_query).await?;

        debug!(
            phase = %QueryPhase::UpstreamDecoded,
            rcode = %upstream_response.header.rescode,
            answers = upstream_response.answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Upstream answered"
        );

        Ok(Self::recompose(request, upstream_response))
    }

    /// Fresh id, the client's questions, recursion desired.
    pub fn build_upstream_query(request: &Packet) -> Packet {
        let mut header = Header::new(fastrand::u16(..));
        header.recursion_desired = true;

        let mut query = Packet::new(header);
        query.questions = request.questions.clone();
        query.sync_counts();
        query
    }

    /// Client id and questions, upstream result code and records.
    ///
    /// Records of unknown type are dropped: their payload was never kept, so
    /// they cannot be written back out.
    pub fn recompose(request: &Packet, upstream: Packet) -> Packet {
        let mut header = Header::new(request.header.id);
        header.response = true;
        header.recursion_desired = request.header.recursion_desired;
        header.recursion_available = true;
        header.rescode = upstream.header.rescode;

        let mut reply = Packet::new(header);
        reply.questions = request.questions.clone();
        reply.answers = relayable(upstream.answers);
        reply.authorities = relayable(upstream.authorities);
        reply.resources = relayable(upstream.resources);
        reply.sync_counts();
        reply
    }
}

fn relayable(records: Vec<ResourceRecord>) -> Vec<ResourceRecord> {
    records
        .into_iter()
        .filter(|record| match record.data {
            RecordData::Unknown { qtype, data_len } => {
                debug!(domain = %record.domain, qtype, data_len, "Dropping unknown record from reply");
                false
            }
            _ => true,
        })
        .collect()
}
