//! Module to place any error handling related code
use std::fmt::{Display, Formatter};

/// An issue with the scan configuration, caught before any probe is launched.
/// Individual ports failing to connect are not errors from the engine's point
/// of view; a port with no result simply wasn't open.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanSetupErr {
    /// The in flight cap was set to zero.  A scan needs at least one probe
    /// running to make progress.
    InvalidConcurrency,
    /// The connection timeout was set to zero.  Every connect attempt would
    /// expire before it could complete.
    InvalidTimeout,
}

impl Display for ScanSetupErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanSetupErr::InvalidConcurrency => {
                write!(f, "max in flight connections must be at least 1")
            }
            ScanSetupErr::InvalidTimeout => {
                write!(f, "connection timeout must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ScanSetupErr {}
