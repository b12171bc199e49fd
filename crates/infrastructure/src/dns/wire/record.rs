use super::cursor::PacketCursor;
use super::name::NameCodec;
use super::question::CLASS_IN;
use dns_relay_domain::{DomainError, QueryType, RecordData, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// How records of an unrecognised type are treated on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordTypePolicy {
    /// Skip the payload and keep an `Unknown` record.
    #[default]
    Tolerant,
    /// Abort the packet with `UnsupportedRecordType`.
    Strict,
}

impl RecordTypePolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            RecordTypePolicy::Strict
        } else {
            RecordTypePolicy::Tolerant
        }
    }
}

pub struct RecordCodec;

impl RecordCodec {
    pub fn read(
        cursor: &mut PacketCursor,
        policy: RecordTypePolicy,
    ) -> Result<ResourceRecord, DomainError> {
        let domain = NameCodec::read(cursor)?;
        let qtype = QueryType::from_u16(cursor.read_u16()?);
        let _class = cursor.read_u16()?;
        let ttl = cursor.read_u32()?;
        let data_len = cursor.read_u16()?;

        let data = match qtype {
            QueryType::A => {
                expect_len("A", 4, data_len)?;
                let raw = cursor.read_u32()?;
                RecordData::A {
                    addr: Ipv4Addr::from(raw),
                }
            }
            QueryType::AAAA => {
                expect_len("AAAA", 16, data_len)?;
                let mut octets = [0u8; 16];
                for group in octets.chunks_exact_mut(4) {
                    group.copy_from_slice(&cursor.read_u32()?.to_be_bytes());
                }
                RecordData::AAAA {
                    addr: Ipv6Addr::from(octets),
                }
            }
            QueryType::CNAME => RecordData::CNAME {
                host: NameCodec::read(cursor)?,
            },
            QueryType::NS => RecordData::NS {
                host: NameCodec::read(cursor)?,
            },
            QueryType::MX => {
                let priority = cursor.read_u16()?;
                let host = NameCodec::read(cursor)?;
                RecordData::MX { priority, host }
            }
            QueryType::Unknown(code) => match policy {
                RecordTypePolicy::Strict => {
                    return Err(DomainError::UnsupportedRecordType(code));
                }
                RecordTypePolicy::Tolerant => {
                    debug!(qtype = code, data_len, domain = %domain, "Skipping unknown record");
                    cursor.step(data_len as usize)?;
                    RecordData::Unknown {
                        qtype: code,
                        data_len,
                    }
                }
            },
        };

        Ok(ResourceRecord { domain, ttl, data })
    }

    /// Write a record, patching RDLENGTH once the payload size is known.
    ///
    /// `Unknown` records carry no payload and cannot be written.
    pub fn write(record: &ResourceRecord, cursor: &mut PacketCursor) -> Result<(), DomainError> {
        if let RecordData::Unknown { qtype, .. } = record.data {
            return Err(DomainError::UnsupportedRecordType(qtype));
        }

        NameCodec::write(cursor, &record.domain)?;
        cursor.write_u16(record.query_type().to_u16())?;
        cursor.write_u16(CLASS_IN)?;
        cursor.write_u32(record.ttl)?;

        let len_pos = cursor.position();
        cursor.write_u16(0)?;
        let data_start = cursor.position();

        match &record.data {
            RecordData::A { addr } => cursor.write_slice(&addr.octets())?,
            RecordData::AAAA { addr } => {
                for group in addr.octets().chunks_exact(4) {
                    cursor.write_slice(group)?;
                }
            }
            RecordData::CNAME { host } | RecordData::NS { host } => {
                NameCodec::write(cursor, host)?;
            }
            RecordData::MX { priority, host } => {
                cursor.write_u16(*priority)?;
                NameCodec::write(cursor, host)?;
            }
            RecordData::Unknown { qtype, .. } => {
                return Err(DomainError::UnsupportedRecordType(*qtype));
            }
        }

        let end = cursor.position();
        let data_len = u16::try_from(end - data_start).map_err(|_| DomainError::OutOfBounds {
            position: data_start,
            len: end - data_start,
        })?;

        cursor.seek(len_pos);
        cursor.write_u16(data_len)?;
        cursor.seek(end);

        Ok(())
    }
}

fn expect_len(record_type: &'static str, expected: u16, actual: u16) -> Result<(), DomainError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DomainError::RecordLengthMismatch {
            record_type,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(record: &ResourceRecord) -> Vec<u8> {
        let mut cursor = PacketCursor::new();
        RecordCodec::write(record, &mut cursor).unwrap();
        cursor.written().unwrap().to_vec()
    }

    #[test]
    fn test_a_record_layout() {
        let bytes = write(&ResourceRecord::a("a.io", Ipv4Addr::new(10, 0, 0, 1), 300));

        assert_eq!(
            bytes,
            b"\x01a\x02io\x00\x00\x01\x00\x01\x00\x00\x01\x2C\x00\x04\x0A\x00\x00\x01".to_vec()
        );
    }

    #[test]
    fn test_rdlength_is_patched_for_names() {
        let bytes = write(&ResourceRecord::mx("a.io", 10, "mail.a.io", 60));
        // name(6) + type/class/ttl(8) = 14: rdlength sits at 14..16
        let rdlength = u16::from_be_bytes([bytes[14], bytes[15]]) as usize;

        assert_eq!(rdlength, 2 + 11);
        assert_eq!(bytes.len(), 16 + rdlength);
    }

    #[test]
    fn test_write_resumes_at_end_of_payload() {
        let mut cursor = PacketCursor::new();
        RecordCodec::write(&ResourceRecord::cname("x.io", "y.io", 5), &mut cursor).unwrap();
        let after_first = cursor.position();
        RecordCodec::write(&ResourceRecord::cname("y.io", "z.io", 5), &mut cursor).unwrap();

        assert_eq!(cursor.position(), after_first * 2);
        cursor.seek(0);
        let first = RecordCodec::read(&mut cursor, RecordTypePolicy::Tolerant).unwrap();
        let second = RecordCodec::read(&mut cursor, RecordTypePolicy::Tolerant).unwrap();
        assert_eq!(first.host(), Some("y.io"));
        assert_eq!(second.domain, "y.io");
        assert_eq!(second.host(), Some("z.io"));
    }

    #[test]
    fn test_unknown_record_skipped_in_tolerant_mode() {
        // TXT record with 5 payload bytes followed by a marker byte
        let bytes = b"\x01a\x02io\x00\x00\x10\x00\x01\x00\x00\x00\x3C\x00\x05\x04abcd\x99";
        let mut cursor = PacketCursor::from_bytes(bytes).unwrap();
        let record = RecordCodec::read(&mut cursor, RecordTypePolicy::Tolerant).unwrap();

        assert_eq!(
            record.data,
            RecordData::Unknown {
                qtype: 16,
                data_len: 5
            }
        );
        assert_eq!(record.ttl, 60);
        assert_eq!(cursor.read_u8().unwrap(), 0x99);
    }

    #[test]
    fn test_unknown_record_rejected_in_strict_mode() {
        let bytes = b"\x01a\x02io\x00\x00\x10\x00\x01\x00\x00\x00\x3C\x00\x05\x04abcd";
        let mut cursor = PacketCursor::from_bytes(bytes).unwrap();

        assert_eq!(
            RecordCodec::read(&mut cursor, RecordTypePolicy::Strict),
            Err(DomainError::UnsupportedRecordType(16))
        );
    }

    #[test]
    fn test_a_record_with_wrong_length_is_rejected() {
        let bytes = b"\x01a\x02io\x00\x00\x01\x00\x01\x00\x00\x00\x3C\x00\x05\x01\x02\x03\x04\x05";
        let mut cursor = PacketCursor::from_bytes(bytes).unwrap();

        assert!(matches!(
            RecordCodec::read(&mut cursor, RecordTypePolicy::Tolerant),
            Err(DomainError::RecordLengthMismatch {
                record_type: "A",
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_unknown_record_cannot_be_written() {
        let record = ResourceRecord::new(
            "a.io",
            60,
            RecordData::Unknown {
                qtype: 6,
                data_len: 22,
            },
        );
        let mut cursor = PacketCursor::new();

        assert_eq!(
            RecordCodec::write(&record, &mut cursor),
            Err(DomainError::UnsupportedRecordType(6))
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_from_strict_flag() {
        assert_eq!(RecordTypePolicy::from_strict_flag(true), RecordTypePolicy::Strict);
        assert_eq!(RecordTypePolicy::from_strict_flag(false), RecordTypePolicy::Tolerant);
    }
}
