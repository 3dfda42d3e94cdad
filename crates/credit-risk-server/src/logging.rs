use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG: &str = "CREDIT_RISK_LOG";
/// Prefix match, so it covers every `credit_risk_*` crate.
pub const DEFAULT_FILTER: &str = "credit_risk=info";

static INIT: Once = Once::new();

/// Installs the global subscriber. Filter comes from `CREDIT_RISK_LOG`
/// (e.g. `credit_risk_server=debug`), falling back to `DEFAULT_FILTER`.
/// Output goes to stderr so the stdio transport keeps stdout for responses.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
