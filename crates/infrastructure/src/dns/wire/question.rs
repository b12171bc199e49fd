use super::cursor::PacketCursor;
use super::name::NameCodec;
use dns_relay_domain::{DomainError, QueryType, Question};

/// Class IN, the only class ever written.
pub const CLASS_IN: u16 = 1;

pub struct QuestionCodec;

impl QuestionCodec {
    /// The class field is consumed but not validated.
    pub fn read(cursor: &mut PacketCursor) -> Result<Question, DomainError> {
        let name = NameCodec::read(cursor)?;
        let qtype = QueryType::from_u16(cursor.read_u16()?);
        let _class = cursor.read_u16()?;

        Ok(Question { name, qtype })
    }

    pub fn write(question: &Question, cursor: &mut PacketCursor) -> Result<(), DomainError> {
        NameCodec::write(cursor, &question.name)?;
        cursor.write_u16(question.qtype.to_u16())?;
        cursor.write_u16(CLASS_IN)
    }
}
