use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "OSREPORT_LOG";

/// Initialize tracing on stderr.
///
/// `OSREPORT_LOG` wins when set; otherwise `warn`, or `debug` for this
/// crate when `verbose` is on.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,osreport=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
