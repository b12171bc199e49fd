pub mod forwarding;
pub mod server;
pub mod transport;
pub mod wire;

pub use forwarding::UdpForwarder;
pub use server::DnsServerHandler;
pub use wire::{PacketCodec, RecordTypePolicy};
