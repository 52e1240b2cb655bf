use std::{
    hash::{Hash, Hasher},
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, protocol::L4Type};

// Equality over optional values.
// Both absent is equal, one absent is not, both present compares the values.
pub fn equals<T: PartialEq>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(_), None) | (None, Some(_)) => false,
        (Some(a), Some(b)) => a == b,
    }
}

// IPv4-mapped IPv6 addresses are folded into IPv4 so that both encodings compare and hash the same.
fn canonical(ip: &IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(_) => *ip,
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => *ip,
        },
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L4Addr {
    pub protocol: L4Type,
    pub port: u16,
}

impl L4Addr {
    pub fn new(protocol: L4Type, port: u16) -> L4Addr {
        L4Addr { protocol, port }
    }

    pub fn equals(&self, other: Option<&L4Addr>) -> bool {
        equals(Some(self), other)
    }
}

impl std::fmt::Display for L4Addr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// L3n4Addr is an IP address combined with a transport endpoint.
/// It identifies a single load balancer frontend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L3n4Addr {
    pub ip: IpAddr,
    #[serde(flatten)]
    pub l4: L4Addr,
}

impl L3n4Addr {
    pub fn new(protocol: L4Type, ip: IpAddr, port: u16) -> L3n4Addr {
        L3n4Addr {
            ip,
            l4: L4Addr::new(protocol, port),
        }
    }

    pub fn protocol(&self) -> L4Type {
        self.l4.protocol
    }

    pub fn port(&self) -> u16 {
        self.l4.port
    }

    pub fn equals(&self, other: Option<&L3n4Addr>) -> bool {
        equals(Some(self), other)
    }

    // An IPv4-mapped IPv6 address is treated as IPv4.
    pub fn is_ipv6(&self) -> bool {
        canonical(&self.ip).is_ipv6()
    }

    pub fn string_with_protocol(&self) -> String {
        format!("{}/{}", self, self.l4.protocol)
    }
}

impl PartialEq for L3n4Addr {
    fn eq(&self, other: &Self) -> bool {
        self.l4 == other.l4 && canonical(&self.ip) == canonical(&other.ip)
    }
}

impl Eq for L3n4Addr {}

impl Hash for L3n4Addr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical(&self.ip).hash(state);
        self.l4.hash(state);
    }
}

impl std::fmt::Display for L3n4Addr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", SocketAddr::new(canonical(&self.ip), self.l4.port))
    }
}

// Accepts "ip:port", "[ipv6]:port" and either of them suffixed with "/PROTO".
impl FromStr for L3n4Addr {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            tracing::debug!(input = s, "invalid frontend address");
            Error::InvalidAddress(s.to_string())
        };
        let (addr, protocol) = match s.rsplit_once('/') {
            Some((addr, proto)) => (addr, L4Type::from_str(proto)?),
            None => (s, L4Type::NONE),
        };
        let (host, port) = match addr.strip_prefix('[') {
            Some(rest) => {
                let (host, rest) = rest.split_once(']').ok_or_else(invalid)?;
                (host, rest.strip_prefix(':').ok_or_else(invalid)?)
            }
            None => {
                let (host, port) = addr.rsplit_once(':').ok_or_else(invalid)?;
                if host.contains(':') {
                    return Err(invalid());
                }
                (host, port)
            }
        };
        let port = port
            .parse::<u16>()
            .map_err(|_| Error::InvalidPort(port.to_string()))?;
        let ip = IpAddr::from_str(host).map_err(|_| invalid())?;
        Ok(L3n4Addr::new(protocol, ip, port))
    }
}

/// Identifier of a load balancer service.
/// IDs are assigned by the service registry; nothing in this crate allocates them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceID(pub u32);

impl From<u32> for ServiceID {
    fn from(value: u32) -> Self {
        ServiceID(value)
    }
}

impl From<ServiceID> for u32 {
    fn from(value: ServiceID) -> Self {
        value.0
    }
}

impl std::fmt::Display for ServiceID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L3n4AddrID {
    #[serde(flatten)]
    pub addr: L3n4Addr,
    pub id: ServiceID,
}

impl L3n4AddrID {
    pub fn new(protocol: L4Type, ip: IpAddr, port: u16, id: ServiceID) -> L3n4AddrID {
        L3n4AddrID {
            addr: L3n4Addr::new(protocol, ip, port),
            id,
        }
    }

    pub fn equals(&self, other: Option<&L3n4AddrID>) -> bool {
        equals(Some(self), other)
    }

    pub fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }
}

impl std::fmt::Display for L3n4AddrID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.addr.string_with_protocol(), self.id)
    }
}
