//! Logging setup for the `influx-output` binary.
//!
//! Settings resolution, client creation and batch writes are logged through `tracing`.
//! Logs go to stderr so stdout stays free for the `check` output.

use tracing_subscriber::filter::{self};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default `INFO`. `influx_output=debug` adds resolved settings
/// and skipped results, `trace` every dropped non-numeric value.
pub fn init() {
    let env_filter = filter::EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    registry().with(fmt_layer).init();
}
