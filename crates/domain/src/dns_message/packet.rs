use super::{Header, Question};
use crate::dns_record::ResourceRecord;

/// A full DNS message: header plus the four ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub resources: Vec<ResourceRecord>,
}

impl Packet {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Overwrite the header counts with the actual section lengths.
    ///
    /// Sections longer than `u16::MAX` cannot fit in a 512-byte message, so
    /// the counts saturate and the write fails on buffer bounds instead.
    pub fn sync_counts(&mut self) {
        self.header.questions = saturating_count(self.questions.len());
        self.header.answers = saturating_count(self.answers.len());
        self.header.authoritative_entries = saturating_count(self.authorities.len());
        self.header.resource_entries = saturating_count(self.resources.len());
    }

    pub fn record_count(&self) -> usize {
        self.answers.len() + self.authorities.len() + self.resources.len()
    }
}

fn saturating_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}
