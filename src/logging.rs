use tracing_subscriber::EnvFilter;

/// Installs a subscriber printing the resolver’s events in tests.
///
/// Without a RUST_LOG environment variable only warnings from this crate
/// are shown. The output goes through the test harness so it only appears
/// for failing tests or with `--nocapture`.
///
/// E.g. to see every attempt made by the stub resolver:
///   RUST_LOG=dnsstub::resolv::stub=TRACE
///
/// Or to see the transports but not the cache:
///   RUST_LOG=dnsstub::resolv=TRACE,dnsstub::resolv::cache=OFF
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dnsstub=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
