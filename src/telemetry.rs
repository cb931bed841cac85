//! Tracing setup for the command-line tools.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for progress lines. The filter
/// comes from `RUST_LOG`, defaulting to `egotools=info`.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("egotools=info"));

    if tracing::subscriber::set_global_default(
        fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .finish(),
    )
    .is_err()
    {
        // Already installed; happens when tests share a process.
    }
}
