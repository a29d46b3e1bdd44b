pub mod build_info;
pub mod paths;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "invoice_ledger=info";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `directive` (from the config file) or
/// the crate default applies. Logs go to stderr so they never mix with CLI output.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(directive.unwrap_or(DEFAULT_DIRECTIVE))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
        });

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
