//! Tracer provider whose exporter appends OTLP/JSON lines to a local file.

use super::file_writer::TraceFile;
use super::span_formatter::OtlpJson;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one line of the trace file.
#[derive(Debug)]
struct FileSpanExporter {
    file: TraceFile,
    encoder: OtlpJson,
    closed: bool,
}

impl FileSpanExporter {
    const fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            file: TraceFile::new(path),
            encoder: OtlpJson::new(resource),
            closed: false,
        }
    }

    fn write(&self, batch: &[SpanData]) -> ExportResult {
        if self.closed {
            return Err(TraceError::from("trace exporter is shut down"));
        }
        let line = self.encoder.encode_batch(batch).to_string();
        self.file.append(&line).map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(std::future::ready(self.write(&batch)))
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.encoder = OtlpJson::new(resource.clone());
    }
}

/// Builds a provider that exports every finished span synchronously to `path`.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    TracerProvider::builder()
        .with_simple_exporter(FileSpanExporter::new(path, resource.clone()))
        .with_resource(resource)
        .build()
}
