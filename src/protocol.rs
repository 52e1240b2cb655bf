use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Transport protocol of a load balancer frontend.
/// NONE means the protocol is unspecified and matches any of them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum L4Type {
    #[default]
    NONE,
    TCP,
    UDP,
}

impl std::fmt::Display for L4Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NONE => write!(f, "NONE"),
            Self::TCP => write!(f, "TCP"),
            Self::UDP => write!(f, "UDP"),
        }
    }
}

impl FromStr for L4Type {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(L4Type::TCP),
            "udp" => Ok(L4Type::UDP),
            "none" | "any" => Ok(L4Type::NONE),
            _ => {
                tracing::debug!(protocol = s, "unknown L4 protocol");
                Err(Error::UnknownProtocol(s.to_string()))
            }
        }
    }
}

impl TryFrom<u8> for L4Type {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(L4Type::NONE),
            6 => Ok(L4Type::TCP),
            17 => Ok(L4Type::UDP),
            _ => Err(Error::InvalidProtocolNumber(value)),
        }
    }
}

impl From<L4Type> for u8 {
    fn from(value: L4Type) -> Self {
        match value {
            L4Type::NONE => 0,
            L4Type::TCP => 6,
            L4Type::UDP => 17,
        }
    }
}
