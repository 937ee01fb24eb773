use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, FmtSubscriber};

/// Set up the tracing module.  This dumps out detailed traces of the exact
/// code path to stdout.  This is only useful for internal development and not
/// to a consumer of the library.  A second scan in the same process will find
/// a subscriber already installed; that's fine, we keep the first one.
pub(crate) fn setup_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_span_events(FmtSpan::FULL)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
