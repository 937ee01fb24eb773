use std::{
    io,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use async_trait::async_trait;
use tokio::{net::TcpStream, time::timeout};
use tracing::instrument;

use crate::report::ScanResult;

/// The capability to attempt one connection establishment.  The probe and the
/// dispatcher only ever talk to this trait, so tests can swap in a fake that
/// never touches a socket.  [`TcpDialer`] is the real implementation.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Try to establish a connection to `addr`, waiting at most `timeout`.
    /// `Ok(())` means the connection completed; any error, including the
    /// timeout expiring, means it did not.  Exactly one attempt, no retries.
    async fn dial(&self, addr: SocketAddr, timeout: Duration) -> io::Result<()>;
}

/// A [`Dialer`] over the operating system's real TCP stack.  A successful
/// dial performs the full three way handshake and then immediately drops the
/// connection; establishment alone is all an open check needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, addr: SocketAddr, limit: Duration) -> io::Result<()> {
        // The deadline wraps the connect future itself.  There is no separate
        // watchdog to race against a late success.
        match timeout(limit, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(elapsed) => Err(io::Error::new(io::ErrorKind::TimedOut, elapsed)),
        }
    }
}

/// Probe a single port.  Open ports come back as a [`ScanResult`]; every
/// failure mode, whether refused, unreachable or timed out, collapses to
/// `None`.  The caller never learns why a port wasn't open, by design the
/// engine doesn't either.
#[instrument(level = "trace", skip(dialer))]
pub(crate) async fn probe_port<D: Dialer + ?Sized>(
    dialer: &D,
    ip: IpAddr,
    port: u16,
    limit: Duration,
) -> Option<ScanResult> {
    match dialer.dial(SocketAddr::new(ip, port), limit).await {
        Ok(()) => Some(ScanResult { ip, port }),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        net::{IpAddr, Ipv4Addr, SocketAddr},
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::net::TcpListener;

    use super::{probe_port, Dialer, TcpDialer};

    struct StaticDialer {
        open: bool,
    }

    #[async_trait]
    impl Dialer for StaticDialer {
        async fn dial(&self, _addr: SocketAddr, _timeout: Duration) -> io::Result<()> {
            if self.open {
                Ok(())
            } else {
                Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
            }
        }
    }

    #[tokio::test]
    async fn tcp_dialer_reaches_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let result = TcpDialer.dial(addr, Duration::from_millis(500)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn tcp_dialer_errors_on_dead_port() {
        // Bind and immediately drop to find a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = TcpDialer.dial(addr, Duration::from_millis(500)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn open_dial_produces_a_result() {
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let dialer = StaticDialer { open: true };
        let result = probe_port(&dialer, ip, 9000, Duration::from_millis(200)).await;
        assert_eq!(result.map(|r| (r.ip, r.port)), Some((ip, 9000)));
    }

    #[tokio::test]
    async fn failed_dial_produces_nothing() {
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let dialer = StaticDialer { open: false };
        let result = probe_port(&dialer, ip, 9000, Duration::from_millis(200)).await;
        assert!(result.is_none());
    }
}
