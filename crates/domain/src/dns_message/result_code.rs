use std::fmt;

/// 4-bit RCODE from the second flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResultCode {
    /// Only the low four bits are significant.
    pub fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => ResultCode::NoError,
            1 => ResultCode::FormErr,
            2 => ResultCode::ServFail,
            3 => ResultCode::NxDomain,
            4 => ResultCode::NotImp,
            5 => ResultCode::Refused,
            other => ResultCode::Other(other),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            ResultCode::NoError => 0,
            ResultCode::FormErr => 1,
            ResultCode::ServFail => 2,
            ResultCode::NxDomain => 3,
            ResultCode::NotImp => 4,
            ResultCode::Refused => 5,
            ResultCode::Other(value) => value & 0x0F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCode::NoError => "NOERROR",
            ResultCode::FormErr => "FORMERR",
            ResultCode::ServFail => "SERVFAIL",
            ResultCode::NxDomain => "NXDOMAIN",
            ResultCode::NotImp => "NOTIMP",
            ResultCode::Refused => "REFUSED",
            ResultCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::Other(value) => write!(f, "RCODE{}", value),
            code => write!(f, "{}", code.as_str()),
        }
    }
}
