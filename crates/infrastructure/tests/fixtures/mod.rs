#![allow(dead_code)]

/// Captured client query: id 12877, RD and AD set, one question google.com A.
pub const QUERY_PACKET: &[u8] = include_bytes!("query_packet.bin");

/// Upstream reply to [`QUERY_PACKET`]: one compressed A answer, ttl 116.
pub const RESPONSE_PACKET: &[u8] = include_bytes!("response_packet.bin");

pub const FIXTURE_ID: u16 = 12877;
pub const FIXTURE_DOMAIN: &str = "google.com";
pub const FIXTURE_ADDR: [u8; 4] = [142, 250, 196, 110];
pub const FIXTURE_TTL: u32 = 116;
