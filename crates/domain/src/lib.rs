//! DNS Relay Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod query_phase;

pub use config::{CliOverrides, Config};
pub use dns_message::{Header, Packet, Question, ResultCode};
pub use dns_record::{QueryType, RecordData, ResourceRecord};
pub use errors::DomainError;
pub use query_phase::QueryPhase;
