use super::cursor::PacketCursor;
use dns_relay_domain::{DomainError, Header, ResultCode};

pub const HEADER_LEN: usize = 12;

/// Reads and writes the 12-byte header and its bit-packed flags.
pub struct HeaderCodec;

impl HeaderCodec {
    pub fn read(cursor: &mut PacketCursor) -> Result<Header, DomainError> {
        let id = cursor.read_u16()?;
        let flags = cursor.read_u16()?;
        let a = (flags >> 8) as u8;
        let b = (flags & 0xFF) as u8;

        Ok(Header {
            id,

            recursion_desired: (a & (1 << 0)) > 0,
            truncated_message: (a & (1 << 1)) > 0,
            authoritative_answer: (a & (1 << 2)) > 0,
            opcode: (a >> 3) & 0x0F,
            response: (a & (1 << 7)) > 0,

            rescode: ResultCode::from_u8(b & 0x0F),
            checking_disabled: (b & (1 << 4)) > 0,
            authed_data: (b & (1 << 5)) > 0,
            z: (b & (1 << 6)) > 0,
            recursion_available: (b & (1 << 7)) > 0,

            questions: cursor.read_u16()?,
            answers: cursor.read_u16()?,
            authoritative_entries: cursor.read_u16()?,
            resource_entries: cursor.read_u16()?,
        })
    }

    pub fn write(header: &Header, cursor: &mut PacketCursor) -> Result<(), DomainError> {
        cursor.write_u16(header.id)?;

        cursor.write_u8(
            (header.recursion_desired as u8)
                | ((header.truncated_message as u8) << 1)
                | ((header.authoritative_answer as u8) << 2)
                | ((header.opcode & 0x0F) << 3)
                | ((header.response as u8) << 7),
        )?;

        cursor.write_u8(
            header.rescode.to_u8()
                | ((header.checking_disabled as u8) << 4)
                | ((header.authed_data as u8) << 5)
                | ((header.z as u8) << 6)
                | ((header.recursion_available as u8) << 7),
        )?;

        cursor.write_u16(header.questions)?;
        cursor.write_u16(header.answers)?;
        cursor.write_u16(header.authoritative_entries)?;
        cursor.write_u16(header.resource_entries)
    }
}
