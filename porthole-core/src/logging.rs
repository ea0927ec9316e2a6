//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `verbose` lifts the filter from `info` to `debug`; `json` switches to
/// structured output. Logs always go to stderr so stdout stays reserved for
/// resolved URLs and listings.
pub fn init(verbose: bool, json: bool) {
    let filter = EnvFilter::new(if verbose { "debug" } else { "info" });

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr) // logs to stderr, not stdout
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr) // logs to stderr, not stdout
            .init();
    }
}
