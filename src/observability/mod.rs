//! Tracing to a local OTLP/JSON file.
//!
//! ```text
//! tracing macros → EnvFilter → tracing-opentelemetry → FileSpanExporter → trace file
//! ```
//!
//! Nothing is sent over the network. Each exported batch is one JSON line in
//! `<data_dir>/pocket-notes-otlp.json`, rotated at 2 MiB with two old files
//! kept.
//!
//! - [`init`]: subscriber setup
//! - `tracer`: provider and exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: rotating trace file

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
