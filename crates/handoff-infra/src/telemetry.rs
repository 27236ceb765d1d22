use tracing_subscriber::{
    fmt::{self, format::Format},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize tracing. `RUST_LOG` overrides `default_filter`.
///
/// Production gets JSON lines; everything else gets the compact format.
pub fn init_telemetry(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry
            .with(fmt::layer().event_format(Format::default().compact().with_target(false)))
            .init();
    }
}
