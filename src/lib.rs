pub mod addr;
pub mod error;
pub mod flags;
pub mod protocol;

pub use addr::{equals, L3n4Addr, L3n4AddrID, L4Addr, ServiceID};
pub use error::Error;
pub use flags::{SVCType, ServiceFlags};
pub use protocol::L4Type;
