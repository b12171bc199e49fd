use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Buffer access out of bounds: {len} byte(s) at position {position}")]
    OutOfBounds { position: usize, len: usize },

    #[error("Name compression loop: more than {max_jumps} pointer jumps")]
    NameCompressionLoop { max_jumps: usize },

    #[error("Label '{label}' is {len} bytes, limit is 63")]
    LabelTooLong { label: String, len: usize },

    #[error("Reserved label type 0x{byte:02X} at position {position}")]
    ReservedLabelType { position: usize, byte: u8 },

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(u16),

    #[error("Malformed {section} section: header declares {declared} record(s), buffer holds {parsed}")]
    MalformedSectionCount {
        section: &'static str,
        declared: u16,
        parsed: u16,
    },

    #[error("{record_type} record data must be {expected} bytes, got {actual}")]
    RecordLengthMismatch {
        record_type: &'static str,
        expected: u16,
        actual: u16,
    },

    #[error("Message of {len} bytes exceeds the 512-byte limit")]
    MessageTooLarge { len: usize },

    #[error("Query has no question to forward")]
    EmptyQuestion,

    #[error("Network I/O error: {0}")]
    NetworkIo(String),

    #[error("Upstream timeout waiting for {server}")]
    UpstreamTimeout { server: String },
}

impl DomainError {
    /// True for failures of the codec itself, as opposed to the transport.
    pub fn is_codec_error(&self) -> bool {
        !matches!(
            self,
            DomainError::NetworkIo(_) | DomainError::UpstreamTimeout { .. }
        )
    }
}
