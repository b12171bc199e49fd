#![allow(dead_code)]

use async_trait::async_trait;
use dns_relay_application::ports::UpstreamResolver;
use dns_relay_domain::{
    DomainError, Header, Packet, QueryType, Question, ResourceRecord, ResultCode,
};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockUpstreamResolver {
    response: Arc<Mutex<Option<Result<Packet, DomainError>>>>,
    received: Arc<Mutex<Vec<Packet>>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_response(&self, packet: Packet) {
        *self.response.lock().unwrap() = Some(Ok(packet));
    }

    pub fn set_error(&self, error: DomainError) {
        *self.response.lock().unwrap() = Some(Err(error));
    }

    pub fn received(&self) -> Vec<Packet> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn forward(&self, query: &Packet) -> Result<Packet, DomainError> {
        self.received.lock().unwrap().push(query.clone());
        self.response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(DomainError::NetworkIo("no response configured".into())))
    }

    fn server(&self) -> String {
        "mock://upstream".to_string()
    }
}

pub struct PacketBuilder {
    packet: Packet,
}

impl PacketBuilder {
    pub fn query(id: u16, name: &str, qtype: QueryType) -> Self {
        let mut header = Header::new(id);
        header.recursion_desired = true;
        let mut packet = Packet::new(header);
        packet.questions.push(Question::new(name, qtype));
        Self { packet }
    }

    pub fn response(id: u16, name: &str, qtype: QueryType) -> Self {
        let mut builder = Self::query(id, name, qtype);
        builder.packet.header.response = true;
        builder.packet.header.recursion_available = true;
        builder
    }

    pub fn rescode(mut self, rescode: ResultCode) -> Self {
        self.packet.header.rescode = rescode;
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.packet.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.packet.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.packet.resources.push(record);
        self
    }

    pub fn build(mut self) -> Packet {
        self.packet.sync_counts();
        self.packet
    }
}
