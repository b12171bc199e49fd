use super::QueryType;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Type-specific payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A { addr: Ipv4Addr },
    AAAA { addr: Ipv6Addr },
    CNAME { host: String },
    NS { host: String },
    MX { priority: u16, host: String },
    /// Payload skipped on read; only the type code and length survive.
    Unknown { qtype: u16, data_len: u16 },
}

impl RecordData {
    pub fn query_type(&self) -> QueryType {
        match self {
            RecordData::A { .. } => QueryType::A,
            RecordData::AAAA { .. } => QueryType::AAAA,
            RecordData::CNAME { .. } => QueryType::CNAME,
            RecordData::NS { .. } => QueryType::NS,
            RecordData::MX { .. } => QueryType::MX,
            RecordData::Unknown { qtype, .. } => QueryType::Unknown(*qtype),
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A { addr } => write!(f, "{}", addr),
            RecordData::AAAA { addr } => {
                let groups = addr.segments();
                write!(
                    f,
                    "{:x}:{:x}:{:x}:{:x}:{:x}:{:x}:{:x}:{:x}",
                    groups[0],
                    groups[1],
                    groups[2],
                    groups[3],
                    groups[4],
                    groups[5],
                    groups[6],
                    groups[7]
                )
            }
            RecordData::CNAME { host } | RecordData::NS { host } => write!(f, "{}", host),
            RecordData::MX { priority, host } => write!(f, "{} {}", priority, host),
            RecordData::Unknown { data_len, .. } => write!(f, "<{} bytes skipped>", data_len),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub domain: String,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(domain: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            domain: domain.into(),
            ttl,
            data,
        }
    }

    pub fn a(domain: impl Into<String>, addr: Ipv4Addr, ttl: u32) -> Self {
        Self::new(domain, ttl, RecordData::A { addr })
    }

    pub fn aaaa(domain: impl Into<String>, addr: Ipv6Addr, ttl: u32) -> Self {
        Self::new(domain, ttl, RecordData::AAAA { addr })
    }

    pub fn cname(domain: impl Into<String>, host: impl Into<String>, ttl: u32) -> Self {
        Self::new(domain, ttl, RecordData::CNAME { host: host.into() })
    }

    pub fn ns(domain: impl Into<String>, host: impl Into<String>, ttl: u32) -> Self {
        Self::new(domain, ttl, RecordData::NS { host: host.into() })
    }

    pub fn mx(domain: impl Into<String>, priority: u16, host: impl Into<String>, ttl: u32) -> Self {
        Self::new(
            domain,
            ttl,
            RecordData::MX {
                priority,
                host: host.into(),
            },
        )
    }

    pub fn query_type(&self) -> QueryType {
        self.data.query_type()
    }

    /// Target name for alias and delegation records.
    pub fn host(&self) -> Option<&str> {
        match &self.data {
            RecordData::CNAME { host } | RecordData::NS { host } | RecordData::MX { host, .. } => {
                Some(host)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} IN {} {}",
            self.domain,
            self.ttl,
            self.query_type(),
            self.data
        )
    }
}
