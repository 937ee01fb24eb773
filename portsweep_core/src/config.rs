//! The configuration surface of the engine.  A [`Scanner`] is built once per
//! scan invocation, adjusted through plain setters and validated only when a
//! scan actually starts.

use std::{
    net::{IpAddr, Ipv4Addr},
    ops::RangeInclusive,
    time::Duration,
};

use crate::err::ScanSetupErr;

/// Holds everything a scan needs: the resolved target, the port range, the
/// in flight cap and the per attempt timeout.  Resolving hostnames is the
/// caller's job; by the time an address reaches this type it is already an
/// [`IpAddr`].
///
/// Setters are plain field assignments.  Nothing is validated until
/// [`scan`](Scanner::scan) or [`scan_stream`](Scanner::scan_stream) runs, so
/// a half configured scanner is never an error by itself.
#[derive(Debug, Clone)]
pub struct Scanner {
    pub(crate) target: IpAddr,
    pub(crate) start_port: u16,
    pub(crate) end_port: u16,
    pub(crate) max_in_flight: usize,
    pub(crate) timeout: Duration,
    pub(crate) tracing: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        // These defaults are deliberately conservative: loopback target, one
        // connection at a time, a one second timeout.
        Self {
            target: IpAddr::V4(Ipv4Addr::LOCALHOST),
            start_port: 0,
            end_port: 1000,
            max_in_flight: 1,
            timeout: Duration::from_secs(1),
            tracing: false,
        }
    }
}

impl Scanner {
    /// Create a scanner for `target` with the default port range, cap and
    /// timeout.
    pub fn new(target: IpAddr) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Replace the target IP to scan.
    pub fn set_target(&mut self, target: IpAddr) {
        self.target = target;
    }

    /// Set the inclusive port range to scan.  An `end` below `start` is
    /// normalized at scan start to a single port scan of `start`.
    pub fn set_ports(&mut self, start: u16, end: u16) {
        self.start_port = start;
        self.end_port = end;
    }

    /// Set the maximum number of in flight connection attempts.  This is the
    /// hard cap on simultaneous probes and is useful for limiting resource
    /// utilization on both ends.
    pub fn set_max_in_flight(&mut self, max_in_flight: usize) {
        self.max_in_flight = max_in_flight;
    }

    /// Set how long a single connection attempt may take before it is counted
    /// as not open.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Enable or disable extremely detailed internal logging.  This is only
    /// useful for internal development.
    pub fn set_tracing(&mut self, tracing: bool) {
        self.tracing = tracing;
    }

    /// The normalized inclusive range of ports this scan will issue, in the
    /// order they will be issued.
    pub(crate) fn port_range(&self) -> RangeInclusive<u16> {
        let end = self.end_port.max(self.start_port);
        self.start_port..=end
    }

    pub(crate) fn validate(&self) -> Result<(), ScanSetupErr> {
        if self.max_in_flight == 0 {
            return Err(ScanSetupErr::InvalidConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ScanSetupErr::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Scanner;
    use crate::err::ScanSetupErr;

    #[test]
    fn reversed_range_becomes_single_port() {
        let mut scanner = Scanner::default();
        scanner.set_ports(22, 1);
        assert_eq!(scanner.port_range(), 22..=22);
        assert_eq!(scanner.port_range().count(), 1);
    }

    #[test]
    fn normal_range_is_untouched() {
        let mut scanner = Scanner::default();
        scanner.set_ports(8999, 9002);
        assert_eq!(scanner.port_range(), 8999..=9002);
    }

    #[test]
    fn zero_max_in_flight_is_rejected() {
        let mut scanner = Scanner::default();
        scanner.set_max_in_flight(0);
        assert_eq!(scanner.validate(), Err(ScanSetupErr::InvalidConcurrency));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut scanner = Scanner::default();
        scanner.set_timeout(Duration::ZERO);
        assert_eq!(scanner.validate(), Err(ScanSetupErr::InvalidTimeout));
    }

    #[test]
    fn defaults_pass_validation() {
        assert_eq!(Scanner::default().validate(), Ok(()));
    }
}
