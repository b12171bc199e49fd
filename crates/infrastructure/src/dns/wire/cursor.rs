//! Fixed-capacity byte arena with a read/write position.
//!
//! Every message passes through a [`PacketCursor`]. The buffer never grows:
//! any access past [`MAX_PACKET_SIZE`] fails with `OutOfBounds`, which is how
//! the 512-byte UDP limit is enforced on both read and write paths.

use dns_relay_domain::DomainError;

pub const MAX_PACKET_SIZE: usize = 512;

pub struct PacketCursor {
    buf: [u8; MAX_PACKET_SIZE],
    pos: usize,
    /// Length of the loaded datagram; `None` for a cursor built for writing.
    filled: Option<usize>,
}

impl PacketCursor {
    pub fn new() -> Self {
        Self {
            buf: [0u8; MAX_PACKET_SIZE],
            pos: 0,
            filled: None,
        }
    }

    /// Load a received datagram. Messages larger than the arena are rejected
    /// rather than truncated.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.len() > MAX_PACKET_SIZE {
            return Err(DomainError::MessageTooLarge { len: bytes.len() });
        }
        let mut cursor = Self::new();
        cursor.buf[..bytes.len()].copy_from_slice(bytes);
        cursor.filled = Some(bytes.len());
        Ok(cursor)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn filled(&self) -> Option<usize> {
        self.filled
    }

    /// Move to an absolute position. Bounds are checked by the next access.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn step(&mut self, steps: usize) -> Result<(), DomainError> {
        self.check(self.pos, steps)?;
        self.pos += steps;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DomainError> {
        let value = self.peek(self.pos)?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, DomainError> {
        let bytes = self.read_range(self.pos, 2)?;
        let value = u16::from_be_bytes([bytes[0], bytes[1]]);
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, DomainError> {
        let bytes = self.read_range(self.pos, 4)?;
        let value = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        self.pos += 4;
        Ok(value)
    }

    /// Read the byte at `pos` without moving the cursor.
    pub fn peek(&self, pos: usize) -> Result<u8, DomainError> {
        self.check(pos, 1)?;
        Ok(self.buf[pos])
    }

    /// View `len` bytes starting at `start` without moving the cursor.
    pub fn read_range(&self, start: usize, len: usize) -> Result<&[u8], DomainError> {
        self.check(start, len)?;
        Ok(&self.buf[start..start + len])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), DomainError> {
        self.check(self.pos, 1)?;
        self.buf[self.pos] = value;
        self.pos += 1;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), DomainError> {
        self.write_slice(&value.to_be_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), DomainError> {
        self.write_slice(&value.to_be_bytes())
    }

    pub fn write_slice(&mut self, bytes: &[u8]) -> Result<(), DomainError> {
        self.check(self.pos, bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Bytes written so far, i.e. everything before the current position.
    pub fn written(&self) -> Result<&[u8], DomainError> {
        self.read_range(0, self.pos)
    }

    fn check(&self, start: usize, len: usize) -> Result<(), DomainError> {
        match start.checked_add(len) {
            Some(end) if end <= MAX_PACKET_SIZE => Ok(()),
            _ => Err(DomainError::OutOfBounds {
                position: start,
                len,
            }),
        }
    }
}

impl Default for PacketCursor {
    fn default() -> Self {
        Self::new()
    }
}
