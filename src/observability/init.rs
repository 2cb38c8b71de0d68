//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE: &str = "pocket-notes-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an [`EnvFilter`] feeding an
/// OpenTelemetry layer that writes to `<data_dir>/pocket-notes-otlp.json`.
///
/// The filter comes from `config.trace_level`, then `RUST_LOG`, then `info`.
///
/// Tracing is optional. If the data directory can't be created, or a
/// subscriber is already installed, this does nothing.
///
/// ```no_run
/// use pocket_notes::observability::init_tracing;
/// use pocket_notes::Config;
///
/// let config = Config {
///     trace_level: Some("pocket_notes=debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = config
        .trace_level
        .as_deref()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL));

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "pocket-notes"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::file_tracer_provider(config.data_dir.join(TRACE_FILE), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer("pocket-notes"));

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
