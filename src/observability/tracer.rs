//! Tracer provider backed by a file span exporter.
//!
//! Spans are written to a rotating JSON file instead of being sent to a
//! collector. Each exported batch becomes one line holding a complete OTLP
//! document, so the file can be replayed into any OTLP-aware tool.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Instrumentation scope name used for every exported span.
pub const SCOPE: &str = "yamiyume";

/// File-based OpenTelemetry span exporter.
///
/// Implements `SpanExporter` by formatting each batch with [`SpanFormatter`]
/// and appending it to a [`FileWriter`]. After [`shutdown`] every export
/// fails.
///
/// [`shutdown`]: SpanExporter::shutdown
struct FileSpanExporter {
    /// Rotating output file.
    writer: FileWriter,
    /// OTLP JSON formatter carrying the resource and scope.
    formatter: SpanFormatter,
    /// Set once by `shutdown`.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter writing to `file_path`.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Trace file, created on the first export
    /// * `resource` - Resource attributes attached to every batch
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource, SCOPE),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    /// Writes `batch` as a single OTLP JSON line.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(TraceError)` if the exporter is shut down or the write fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = self.formatter.format_batch(&batch).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// Resource is fixed at construction.
    fn set_resource(&mut self, _res: &Resource) {}
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider that exports to `file_path`.
///
/// Uses the simple (synchronous) span processor: every span is written as
/// soon as it ends.
///
/// # Parameters
///
/// * `file_path` - Trace file, usually `<data dir>/yamiyume-otlp.json`
/// * `resource` - Service metadata (`service.name`, `service.version`)
///
/// # Example
///
/// ```rust,ignore
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::Resource;
///
/// let resource = Resource::new(vec![KeyValue::new("service.name", "yamiyume")]);
/// let provider = create_tracer_provider("/tmp/yamiyume-otlp.json".into(), resource);
/// ```
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
