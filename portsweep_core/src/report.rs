//! This module contains everything we need to describe the results of a
//! sweep back to the caller.

use std::{
    fmt::{Display, Formatter},
    net::{IpAddr, SocketAddr},
};

/// An address that accepted a TCP connection at the moment it was probed.
/// The scan only ever reports open ports; closed, filtered and unreachable
/// ports all just produce nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanResult {
    /// The IP the connection was made to
    pub ip: IpAddr,
    /// The port that accepted the connection
    pub port: u16,
}

impl ScanResult {
    /// The full socket address that accepted the connection.  Handy for
    /// callers that want to immediately connect to what was found.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl Display for ScanResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.socket_addr().fmt(f)
    }
}

impl From<ScanResult> for SocketAddr {
    fn from(result: ScanResult) -> Self {
        result.socket_addr()
    }
}
