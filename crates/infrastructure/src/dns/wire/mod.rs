//! DNS wire format codec.
//!
//! Layered bottom-up: [`PacketCursor`] owns the bytes, [`NameCodec`] handles
//! labels and compression pointers, the header/question/record codecs build
//! on those, and [`PacketCodec`] composes a full message.

pub mod cursor;
pub mod header;
pub mod name;
pub mod packet;
pub mod question;
pub mod record;

pub use cursor::{PacketCursor, MAX_PACKET_SIZE};
pub use header::{HeaderCodec, HEADER_LEN};
pub use name::{NameCodec, MAX_JUMPS, MAX_LABEL_LEN};
pub use packet::PacketCodec;
pub use question::QuestionCodec;
pub use record::{RecordCodec, RecordTypePolicy};
