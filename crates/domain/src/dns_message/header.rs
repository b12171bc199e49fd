use super::ResultCode;

/// Fixed 12-byte message header.
///
/// The four counts mirror the section lengths of a [`Packet`](super::Packet);
/// they are recomputed from the lists whenever a packet is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,

    pub response: bool,
    pub opcode: u8,
    pub authoritative_answer: bool,
    pub truncated_message: bool,
    pub recursion_desired: bool,

    pub recursion_available: bool,
    pub z: bool,
    pub authed_data: bool,
    pub checking_disabled: bool,
    pub rescode: ResultCode,

    pub questions: u16,
    pub answers: u16,
    pub authoritative_entries: u16,
    pub resource_entries: u16,
}

impl Header {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
