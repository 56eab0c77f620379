use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `useradm=debug,user_api=debug`
pub const LOG_ENV: &str = "USERADM_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber.
///
/// `USERADM_LOG` wins, then the `log` key from the config file, then `warn`.
pub fn init(configured: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Ignore an already-installed subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
