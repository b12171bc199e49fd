mod header;
mod packet;
mod question;
mod result_code;

pub use header::Header;
pub use packet::Packet;
pub use question::Question;
pub use result_code::ResultCode;
