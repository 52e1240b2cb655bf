use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown L4 protocol: {0}")]
    UnknownProtocol(String),

    #[error("Invalid L4 protocol number: {0}")]
    InvalidProtocolNumber(u8),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid service flags: {0:#x}")]
    InvalidServiceFlags(u16),

    #[error("Unknown service type: {0}")]
    UnknownServiceType(String),
}
