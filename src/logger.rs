//! Logging initialisation via tracing-subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::MemeError;

/// Install the global stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` is used
/// (`"warn"` normally, `"debug"` with `--verbose`).
///
/// # Errors
///
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init(level: &str) -> Result<(), MemeError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| MemeError::Config(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| MemeError::Config(format!("failed to set subscriber: {e}")))
}

/// Default level for the given verbosity.
#[must_use]
pub fn level_for(verbose: bool) -> &'static str {
    if verbose {
        "memeforge=debug,warn"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_debug_for_this_crate() {
        assert_eq!(level_for(false), "warn");
        assert!(level_for(true).contains("memeforge=debug"));
        assert!(EnvFilter::try_new(level_for(true)).is_ok());
    }

    #[test]
    fn init_succeeds_or_already_init() {
        match init("warn") {
            Ok(()) => {}
            Err(MemeError::Config(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
