use super::cursor::PacketCursor;
use super::header::HeaderCodec;
use super::question::QuestionCodec;
use super::record::{RecordCodec, RecordTypePolicy};
use dns_relay_domain::{DomainError, Packet, ResourceRecord};
use tracing::debug;

/// Composes the header, question and record codecs into whole messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacketCodec {
    policy: RecordTypePolicy,
}

impl PacketCodec {
    pub fn new(policy: RecordTypePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RecordTypePolicy {
        self.policy
    }

    /// Decode a received datagram. Any failing record aborts the whole packet.
    pub fn decode(&self, bytes: &[u8]) -> Result<Packet, DomainError> {
        let mut cursor = PacketCursor::from_bytes(bytes)?;
        self.read(&mut cursor)
    }

    /// Encode a packet, first syncing the header counts with its sections.
    pub fn encode(&self, packet: &mut Packet) -> Result<Vec<u8>, DomainError> {
        let mut cursor = PacketCursor::new();
        Self::write(packet, &mut cursor)?;
        Ok(cursor.written()?.to_vec())
    }

    pub fn read(&self, cursor: &mut PacketCursor) -> Result<Packet, DomainError> {
        let header = HeaderCodec::read(cursor)?;
        within_datagram(cursor, ())?;
        let mut packet = Packet::new(header);

        for parsed in 0..header.questions {
            let question = QuestionCodec::read(cursor)
                .and_then(|q| within_datagram(cursor, q))
                .map_err(|e| section_error(e, "question", header.questions, parsed))?;
            packet.questions.push(question);
        }

        packet.answers = self.read_records(cursor, "answer", header.answers)?;
        packet.authorities = self.read_records(cursor, "authority", header.authoritative_entries)?;
        packet.resources = self.read_records(cursor, "additional", header.resource_entries)?;

        debug!(
            id = header.id,
            questions = packet.questions.len(),
            answers = packet.answers.len(),
            authorities = packet.authorities.len(),
            resources = packet.resources.len(),
            "Packet decoded"
        );

        Ok(packet)
    }

    pub fn write(packet: &mut Packet, cursor: &mut PacketCursor) -> Result<(), DomainError> {
        packet.sync_counts();

        HeaderCodec::write(&packet.header, cursor)?;

        for question in &packet.questions {
            QuestionCodec::write(question, cursor)?;
        }
        for record in packet
            .answers
            .iter()
            .chain(&packet.authorities)
            .chain(&packet.resources)
        {
            RecordCodec::write(record, cursor)?;
        }

        Ok(())
    }

    fn read_records(
        &self,
        cursor: &mut PacketCursor,
        section: &'static str,
        declared: u16,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut records = Vec::new();
        for parsed in 0..declared {
            let record = RecordCodec::read(cursor, self.policy)
                .and_then(|r| within_datagram(cursor, r))
                .map_err(|e| section_error(e, section, declared, parsed))?;
            records.push(record);
        }
        Ok(records)
    }
}

/// A record that ends past the received bytes was read from the zeroed tail
/// of the arena, meaning the header promised more than the datagram holds.
fn within_datagram<T>(cursor: &PacketCursor, value: T) -> Result<T, DomainError> {
    match cursor.filled() {
        Some(filled) if cursor.position() > filled => Err(DomainError::OutOfBounds {
            position: filled,
            len: cursor.position() - filled,
        }),
        _ => Ok(value),
    }
}

fn section_error(
    error: DomainError,
    section: &'static str,
    declared: u16,
    parsed: u16,
) -> DomainError {
    match error {
        DomainError::OutOfBounds { .. } => DomainError::MalformedSectionCount {
            section,
            declared,
            parsed,
        },
        other => other,
    }
}
