use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `WISH_LOG=trace`.
pub const LOG_ENV: &str = "WISH_LOG";

/// Installs the global subscriber, writing to stderr.
///
/// Logging is off unless `debug` is set or [`LOG_ENV`] says otherwise, so a
/// plain run keeps stderr for the shell's error message alone.
pub fn init(debug: bool) {
    let default = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
