// ── Diagnostics ───────────────────────────────────────────────────────────────
//
// The shim emits `tracing` events; installing a subscriber is the driver's
// call.  `init` is safe to call more than once.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted first for the log filter.
pub const LOG_ENV: &str = "BOOTSHIM_LOG";

/// Install a stderr `fmt` subscriber.
///
/// The filter comes from `BOOTSHIM_LOG`, then `RUST_LOG`, then `info`.
pub fn init() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
