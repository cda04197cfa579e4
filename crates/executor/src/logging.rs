use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use super::error::Error;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins, then `EXECUTOR_LOG`, then the configured level. A bare
/// level such as `debug` applies to both workspace crates.
pub fn init_tracing(level: &str) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("EXECUTOR_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directive_for(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::LoggingInit(e.to_string()))
}

fn directive_for(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("executor={level},alt_paths_core={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_targets_workspace_crates() {
        assert_eq!(directive_for("debug"), "executor=debug,alt_paths_core=debug");
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(directive_for("alt_paths_core=trace"), "alt_paths_core=trace");
    }
}
