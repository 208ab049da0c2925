//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Used unless `UI_LOG` is set at build time. `payloads` is included so the
/// outgoing event payload shows up in the console.
const DEFAULT_DIRECTIVES: &str = "error,ui=debug,payloads=debug";

/// Install the console subscriber. Call once, before rendering.
pub fn init_logging() {
    let directives = option_env!("UI_LOG").unwrap_or(DEFAULT_DIRECTIVES);
    let env_filter = EnvFilter::try_new(directives)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_target(true)
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .init();

    tracing::info!(directives, "Initialized logs");
}
