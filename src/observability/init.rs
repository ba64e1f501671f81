//! Tracing initialization and subscriber setup.

use std::path::{Path, PathBuf};

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the OTLP trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "yamiyume-otlp.json";

/// Installs the global subscriber exporting spans to the trace file.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`. Spans land in `<data dir>/yamiyume-otlp.json`.
///
/// # Subscriber stack
///
/// ```text
/// Registry
///   ├─ EnvFilter            (RUST_LOG or trace_level)
///   └─ OpenTelemetryLayer   → FileSpanExporter → yamiyume-otlp.json
/// ```
///
/// Nothing is written to stdout or stderr, so the terminal UI is left alone.
///
/// # Returns
///
/// The trace file path, or `None` when the data directory could not be
/// created or a subscriber was already installed. Neither case is an error.
///
/// ```rust,no_run
/// use yamiyume::observability::init_tracing;
/// use yamiyume::Config;
///
/// let config = Config { trace_level: "yamiyume=debug".to_string(), ..Default::default() };
/// if let Some(path) = init_tracing(&config) {
///     tracing::info!(path = %path.display(), "tracing to file");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = crate::infrastructure::data_dir();
    init_tracing_in(&data_dir, &config.trace_level)
}

fn init_tracing_in(data_dir: &Path, level: &str) -> Option<PathBuf> {
    std::fs::create_dir_all(data_dir).ok()?;

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "yamiyume"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = tracer::create_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
