use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `fallback`
/// (the `[logging] filter` from config.toml). Output goes to stderr so
/// stdout stays usable for ICS and JSON.
pub fn init_logging(fallback: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .with_context(|| format!("invalid log filter '{fallback}'"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("logger already initialised")?;

    Ok(())
}
