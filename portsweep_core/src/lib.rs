#![warn(missing_docs)]
//! The engine of a bounded-concurrency TCP connect scanner.  Given an already
//! resolved IP address and a contiguous port range, it reports which ports
//! accepted a connection while capping how many connection attempts are in
//! flight at once and how long each attempt may take.  The consumers of this
//! crate own flag parsing, hostname resolution and output formatting; the
//! APIs here only ever see a resolved address and hand back results to drain.

pub use crate::{
    config::Scanner,
    err::ScanSetupErr,
    report::ScanResult,
    tcp::full_open::{Dialer, TcpDialer},
};

mod config;
mod err;
mod logging;
mod report;
mod scan;
mod tcp;
