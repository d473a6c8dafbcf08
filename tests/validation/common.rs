//! Shared test helpers

/// Install a verbose subscriber so failing runs show the walk's trace
/// events. Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
