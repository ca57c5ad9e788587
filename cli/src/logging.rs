//! Log setup for the `dexkit` binary.
//!
//! Logs go to stderr; stdout carries only the JSON that `datum` and
//! `simulate` print, so it can be piped straight into `jq`.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored lines with file and line of each event.
    Pretty,
    /// One JSON object per event, with the `tx_id`/`step`/`status` fields
    /// as keys.
    Json,
}

/// Installs the global subscriber for the `dexkit` binary.
///
/// `default_level` is the `--log` / `DEXKIT_LOG` directive string, by
/// default `dexkit=info,dexkit_protocol=info`. Lifecycle events are logged
/// under the `dexkit_protocol::transaction` target, so
/// `dexkit_protocol::transaction=debug` shows every delegation and status
/// write without the rest of the library. `RUST_LOG` overrides it.
///
/// Must run once, before the first command does any work.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Exactly one of the two layers is present.
    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
    });
    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .init();

    tracing::debug!(?format, "dexkit logging ready");
}
