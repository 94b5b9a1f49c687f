//! Console logging for the `skewflake` binary.
//!
//! Events go to stderr so stdout carries only IDs. The level is taken from
//! `RUST_LOG` and defaults to `warn`, which is enough to surface clock
//! rollbacks observed by the generator:
//!
//! ```bash
//! RUST_LOG=skewflake=debug skewflake generate -n 10
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}
