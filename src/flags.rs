use std::{ops::BitOr, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Classification of how a load balancer service is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SVCType {
    NodePort,
    ClusterIP,
    ExternalIPs,
    LoadBalancer,
    HostPort,
    LocalRedirect,
    // externalTrafficPolicy: Local
    Local,
}

impl SVCType {
    // Ascending bit order. NodePort owns no bit and is not listed.
    const FLAGGED: [SVCType; 6] = [
        SVCType::ExternalIPs,
        SVCType::ClusterIP,
        SVCType::LoadBalancer,
        SVCType::HostPort,
        SVCType::LocalRedirect,
        SVCType::Local,
    ];

    fn flag(&self) -> ServiceFlags {
        match self {
            SVCType::NodePort => SERVICE_FLAG_NONE,
            SVCType::ExternalIPs => SERVICE_FLAG_EXTERNAL_IPS,
            SVCType::ClusterIP => SERVICE_FLAG_CLUSTER_IP,
            SVCType::LoadBalancer => SERVICE_FLAG_LOAD_BALANCER,
            SVCType::HostPort => SERVICE_FLAG_HOST_PORT,
            SVCType::LocalRedirect => SERVICE_FLAG_LOCAL_REDIRECT,
            SVCType::Local => SERVICE_FLAG_LOCAL,
        }
    }
}

impl std::fmt::Display for SVCType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodePort => write!(f, "NodePort"),
            Self::ClusterIP => write!(f, "ClusterIP"),
            Self::ExternalIPs => write!(f, "ExternalIPs"),
            Self::LoadBalancer => write!(f, "LoadBalancer"),
            Self::HostPort => write!(f, "HostPort"),
            Self::LocalRedirect => write!(f, "LocalRedirect"),
            Self::Local => write!(f, "Local"),
        }
    }
}

impl FromStr for SVCType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NodePort" => Ok(SVCType::NodePort),
            "ClusterIP" => Ok(SVCType::ClusterIP),
            "ExternalIPs" => Ok(SVCType::ExternalIPs),
            "LoadBalancer" => Ok(SVCType::LoadBalancer),
            "HostPort" => Ok(SVCType::HostPort),
            "LocalRedirect" => Ok(SVCType::LocalRedirect),
            "Local" => Ok(SVCType::Local),
            _ => {
                tracing::debug!(svc_type = s, "unknown service type");
                Err(Error::UnknownServiceType(s.to_string()))
            }
        }
    }
}

/// ServiceFlags is the set of service types that apply to a frontend.
/// NodePort is the baseline behavior and is represented by no bit at all,
/// so a NodePort-only service has the zero value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ServiceFlags(u16);

pub const SERVICE_FLAG_NONE: ServiceFlags = ServiceFlags(0);
pub const SERVICE_FLAG_EXTERNAL_IPS: ServiceFlags = ServiceFlags(1 << 0);
pub const SERVICE_FLAG_CLUSTER_IP: ServiceFlags = ServiceFlags(1 << 1);
pub const SERVICE_FLAG_LOAD_BALANCER: ServiceFlags = ServiceFlags(1 << 2);
pub const SERVICE_FLAG_HOST_PORT: ServiceFlags = ServiceFlags(1 << 3);
pub const SERVICE_FLAG_LOCAL_REDIRECT: ServiceFlags = ServiceFlags(1 << 4);
pub const SERVICE_FLAG_LOCAL: ServiceFlags = ServiceFlags(1 << 5);

const SERVICE_FLAG_MASK: u16 = (1 << 6) - 1;

impl ServiceFlags {
    pub fn new(svc_types: &[SVCType]) -> ServiceFlags {
        let flags: ServiceFlags = svc_types.iter().copied().collect();
        tracing::trace!(?svc_types, %flags, "create service flags");
        flags
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        *self == SERVICE_FLAG_NONE
    }

    // NodePort has no bit, so it only matches the zero value.
    pub fn is_svc_type(&self, svc_type: SVCType) -> bool {
        match svc_type {
            SVCType::NodePort => self.is_none(),
            t => self.0 & t.flag().0 != 0,
        }
    }

    pub fn union(&self, other: ServiceFlags) -> ServiceFlags {
        ServiceFlags(self.0 | other.0)
    }

    /// Returns the flagged service types in ascending bit order.
    pub fn svc_types(&self) -> impl Iterator<Item = SVCType> + '_ {
        SVCType::FLAGGED
            .into_iter()
            .filter(|t| self.is_svc_type(*t))
    }

    /// Returns the primary service type of the frontend.
    /// Local only qualifies the traffic policy, so it never becomes the primary type.
    pub fn svc_type(&self) -> SVCType {
        self.svc_types()
            .find(|t| *t != SVCType::Local)
            .unwrap_or(SVCType::NodePort)
    }
}

impl FromIterator<SVCType> for ServiceFlags {
    fn from_iter<I: IntoIterator<Item = SVCType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SERVICE_FLAG_NONE, |acc, t| acc.union(t.flag()))
    }
}

// Bits that no service type owns are rejected.
impl TryFrom<u16> for ServiceFlags {
    type Error = Error;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value & !SERVICE_FLAG_MASK != 0 {
            tracing::debug!(flags = value, "unknown service flag bits");
            return Err(Error::InvalidServiceFlags(value));
        }
        Ok(ServiceFlags(value))
    }
}

impl From<ServiceFlags> for u16 {
    fn from(value: ServiceFlags) -> Self {
        value.0
    }
}

impl From<SVCType> for ServiceFlags {
    fn from(value: SVCType) -> Self {
        value.flag()
    }
}

impl BitOr for ServiceFlags {
    type Output = ServiceFlags;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOr<SVCType> for ServiceFlags {
    type Output = ServiceFlags;
    fn bitor(self, rhs: SVCType) -> Self::Output {
        self.union(rhs.flag())
    }
}

impl std::fmt::Display for ServiceFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "NONE");
        }
        let names: Vec<String> = self.svc_types().map(|t| t.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}
