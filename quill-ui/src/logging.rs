// Tracing subscriber setup for the quill binary.

use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset.
pub const DEFAULT_FILTER: &str = "info,quill_ui=debug,quill_history=debug";

/// Install a fmt subscriber on stderr. RUST_LOG overrides `default_filter`.
/// Safe to call more than once; later calls are ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
