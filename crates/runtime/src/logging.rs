//! Tracing subscriber setup.
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to INFO.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place and return `false`.
pub fn init() -> bool {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}
