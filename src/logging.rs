use crate::error::{AtmError, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when neither `RUST_LOG` nor an explicit filter is given.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a stderr `tracing` subscriber.
///
/// An explicit `filter` wins over `RUST_LOG`, which wins over [`DEFAULT_FILTER`].
pub fn init_tracing(filter: Option<&str>) -> Result<()> {
    let env_filter = build_env_filter(filter)?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .with(env_filter)
        .try_init()
        .map_err(|e| AtmError::ValidationError(format!("failed to initialize tracing: {}", e)))
}

fn build_env_filter(filter: Option<&str>) -> Result<EnvFilter> {
    match filter {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            AtmError::ValidationError(format!("invalid log filter '{}': {}", directives, e))
        }),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_is_validated() {
        assert!(build_env_filter(Some("atm_sim=debug,warn")).is_ok());
        assert!(build_env_filter(Some("atm_sim=loud")).is_err());
    }
}
