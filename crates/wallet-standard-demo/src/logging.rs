//! Log output setup for the demo binary

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that switches log output to JSON when set to `1`
pub const LOG_JSON_ENV: &str = "WALLET_STANDARD_LOG_JSON";

/// Initialize logging to stderr
///
/// The filter comes from `RUST_LOG` and defaults to `info`. JSON output is
/// used when `json` is set or `WALLET_STANDARD_LOG_JSON=1`.
pub fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = json || json_from_env();

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn json_from_env() -> bool {
    std::env::var(LOG_JSON_ENV)
        .map(|value| value == "1")
        .unwrap_or(false)
}
