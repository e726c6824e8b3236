//! Log subscriber for the CLI.
//!
//! Nothing is installed unless `BRINE_LOG` holds filter directives
//! (`brine_eval=debug`, `trace`, ...). `BRINE_LOG_TREE=1` switches from
//! flat lines to an indented span tree.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("BRINE_LOG") else {
            return;
        };
        let filter = EnvFilter::new(directives);

        if std::env::var("BRINE_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
