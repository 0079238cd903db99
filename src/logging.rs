//! Diagnostic output
//!
//! Diagnostics go to stderr and only in debug mode (`-d`). `RUST_LOG`
//! overrides the default `debug` directive.

use tracing_subscriber::EnvFilter;

pub fn init(debug: bool) {
    if !debug {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
