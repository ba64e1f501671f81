//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: spans go to `<data dir>/yamiyume-otlp.json`
//!   (see [`crate::infrastructure::data_dir`]) instead of a collector
//! - **Automatic Rotation**: files rotate at 10 MB with 3 backups kept
//! - **OTLP Format**: every line is a complete OTLP JSON document
//!
//! # Configuration
//!
//! The filter is taken from `RUST_LOG` when set, otherwise from the
//! `trace_level` config key (default `"info"`). Any `EnvFilter` directive
//! works, e.g. `trace_level=yamiyume::runtime=trace`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: Size-rotated line writer

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
