//! Process-wide diagnostics.

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset or unparsable: this crate at `info`, everything
/// else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,skyzen_render=info";

/// Set up error reports and log output for the process.
///
/// Runs at most once. When the host already installed a global subscriber it is left alone and
/// only `color-eyre` is added. `log` records are bridged into `tracing` only when this call
/// owns the subscriber.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(install);
}

fn install() {
    if let Err(error) = color_eyre::install() {
        eprintln!("color-eyre not installed: {error}");
    }
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(true));
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return;
    }

    if let Err(error) = tracing_log::LogTracer::init() {
        tracing::debug!(%error, "`log` already has a logger");
    }
}
