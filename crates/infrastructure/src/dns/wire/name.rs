//! Domain name encoding with compression-pointer decoding.

use super::cursor::{PacketCursor, MAX_PACKET_SIZE};
use dns_relay_domain::DomainError;

/// Pointer jumps allowed while decoding one name.
pub const MAX_JUMPS: usize = 5;

pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0xC0;

pub struct NameCodec;

impl NameCodec {
    /// Read a sequence of length-prefixed labels, following compression
    /// pointers, and return them joined by `.`.
    ///
    /// The caller's cursor moves past the first pointer met (two bytes) and
    /// never follows later jumps; labels are read through a local offset.
    /// Pointer targets and labels must lie within the received bytes.
    pub fn read(cursor: &mut PacketCursor) -> Result<String, DomainError> {
        let limit = cursor.filled().unwrap_or(MAX_PACKET_SIZE);
        let mut pos = cursor.position();
        let mut jumped = false;
        let mut jumps = 0;
        let mut name = String::new();

        loop {
            if jumps > MAX_JUMPS {
                return Err(DomainError::NameCompressionLoop {
                    max_jumps: MAX_JUMPS,
                });
            }

            if pos >= limit {
                return Err(DomainError::OutOfBounds { position: pos, len: 1 });
            }
            let len = cursor.peek(pos)?;

            match len & POINTER_MASK {
                POINTER_MASK => {
                    let low = cursor.peek(pos + 1)?;
                    if !jumped {
                        cursor.seek(pos + 2);
                    }
                    pos = (((len ^ POINTER_MASK) as usize) << 8) | low as usize;
                    jumped = true;
                    jumps += 1;
                    continue;
                }
                0 => {}
                _ => {
                    return Err(DomainError::ReservedLabelType {
                        position: pos,
                        byte: len,
                    });
                }
            }

            pos += 1;
            if len == 0 {
                break;
            }

            if pos + len as usize > limit {
                return Err(DomainError::OutOfBounds {
                    position: pos,
                    len: len as usize,
                });
            }
            let label = cursor.read_range(pos, len as usize)?;
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(&String::from_utf8_lossy(label));
            pos += len as usize;
        }

        if !jumped {
            cursor.seek(pos);
        }

        Ok(name)
    }

    /// Write `name` as uncompressed labels followed by the root label.
    ///
    /// Empty labels (a trailing dot, or the root name itself) are skipped.
    pub fn write(cursor: &mut PacketCursor, name: &str) -> Result<(), DomainError> {
        for label in name.split('.').filter(|label| !label.is_empty()) {
            let len = label.len();
            if len > MAX_LABEL_LEN {
                return Err(DomainError::LabelTooLong {
                    label: label.to_string(),
                    len,
                });
            }
            cursor.write_u8(len as u8)?;
            cursor.write_slice(label.as_bytes())?;
        }

        cursor.write_u8(0)
    }
}
