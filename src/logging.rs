//! Console tracing setup.
//!
//! The interactive menu owns stdout, so tracing defaults to warnings only;
//! set `RUST_LOG` to see operation spans and schema-fallback details.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}=info,sqlx=warn", env!("CARGO_CRATE_NAME")))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}
