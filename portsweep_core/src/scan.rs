//! The dispatch loop that drives a scan, plus the two entry points exposed on
//! [`Scanner`]: collect everything, or consume results as they arrive.

use std::{net::IpAddr, ops::RangeInclusive, sync::Arc, time::Duration};

use async_stream::stream;
use futures::{future::join_all, Stream, StreamExt};
use tokio::sync::{mpsc, Semaphore};
use tracing::{instrument, trace};

use crate::{
    config::Scanner,
    err::ScanSetupErr,
    logging::setup_tracing,
    report::ScanResult,
    tcp::full_open::{probe_port, Dialer, TcpDialer},
};

impl Scanner {
    /// Run a full scan and hand back every open address found.  Blocks until
    /// every port in the range has been attempted.  Results are in arrival
    /// order, not port order; probes finish whenever they finish.
    pub async fn scan(&self) -> Result<Vec<ScanResult>, ScanSetupErr> {
        let results = self.scan_stream().await?;
        Ok(results.collect().await)
    }

    /// Kick off a scan and return a stream of open addresses as they are
    /// discovered.  The stream is finite: it ends once every port in the
    /// range has been attempted, and only then.  Each call runs a fresh
    /// scan; the stream is not restartable.
    pub async fn scan_stream(
        &self,
    ) -> Result<impl Stream<Item = ScanResult>, ScanSetupErr> {
        if self.tracing {
            setup_tracing()
        }
        self.validate()?;
        let mut rx = dispatch_probes(
            Arc::new(TcpDialer),
            self.target,
            self.port_range(),
            self.max_in_flight,
            self.timeout,
        );
        Ok(stream! {
            while let Some(result) = rx.recv().await {
                yield result;
            }
        })
    }
}

/// Spawn the dispatch controller and return the receiving end of the result
/// stream.  The controller walks the port range in ascending order, takes a
/// semaphore permit per port and spawns one probe task that owns that permit
/// for its whole lifetime, so at most `max_in_flight` probes are ever between
/// acquire and release.  After the last port is issued it waits on every
/// probe before dropping its sender; once the probe tasks have dropped theirs
/// too the channel closes, which is the one authoritative signal that the
/// scan is complete.
#[instrument(level = "trace", skip(dialer))]
pub(crate) fn dispatch_probes<D: Dialer + 'static>(
    dialer: Arc<D>,
    ip: IpAddr,
    ports: RangeInclusive<u16>,
    max_in_flight: usize,
    limit: Duration,
) -> mpsc::Receiver<ScanResult> {
    let semaphore = Arc::new(Semaphore::new(max_in_flight));
    let (tx, rx) = mpsc::channel(max_in_flight);
    tokio::spawn(async move {
        let mut probes = Vec::with_capacity(ports.len());
        for port in ports {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                // The semaphore is never closed while we hold it, but if it
                // ever were there is nothing left to issue.
                Err(_) => break,
            };
            let dialer = dialer.clone();
            let tx = tx.clone();
            probes.push(tokio::spawn(async move {
                if let Some(result) = probe_port(dialer.as_ref(), ip, port, limit).await {
                    // A send only fails when the caller stopped listening,
                    // and then the result has nowhere to go anyway.
                    let _ = tx.send(result).await;
                }
                drop(permit);
            }));
        }
        trace!("every port in range has been issued");
        join_all(probes).await;
        trace!("all probes finished, closing the result stream");
        // Dropping the last sender is what closes the channel.
        drop(tx);
    });
    rx
}
