use std::fmt;
use std::str::FromStr;

/// Record type code carried in questions and resource records.
///
/// Only the types the relay understands get their own variant; every other
/// code is kept in `Unknown` so a question can still be forwarded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    A,
    NS,
    CNAME,
    MX,
    AAAA,
    Unknown(u16),
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::A => "A",
            QueryType::NS => "NS",
            QueryType::CNAME => "CNAME",
            QueryType::MX => "MX",
            QueryType::AAAA => "AAAA",
            QueryType::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            QueryType::A => 1,
            QueryType::NS => 2,
            QueryType::CNAME => 5,
            QueryType::MX => 15,
            QueryType::AAAA => 28,
            QueryType::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => QueryType::A,
            2 => QueryType::NS,
            5 => QueryType::CNAME,
            15 => QueryType::MX,
            28 => QueryType::AAAA,
            _ => QueryType::Unknown(code),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, QueryType::Unknown(_))
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Unknown(code) => write!(f, "UNKNOWN({})", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(QueryType::A),
            "NS" => Ok(QueryType::NS),
            "CNAME" => Ok(QueryType::CNAME),
            "MX" => Ok(QueryType::MX),
            "AAAA" => Ok(QueryType::AAAA),
            _ => Err(format!("Unknown query type: {}", s)),
        }
    }
}
