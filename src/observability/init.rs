//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every span.
const SERVICE_NAME: &str = "BookFinder";

/// Span file inside the data directory.
pub const SPAN_FILE_NAME: &str = "bookfinder-spans.json";

/// Default filter when `trace_level` is not configured.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file span export.
///
/// Spans pass an [`EnvFilter`] built from `config.trace_level` (default
/// `"info"`) and are exported through OpenTelemetry to
/// `/host/.local/share/zellij/bookfinder/bookfinder-spans.json`.
///
/// Observability is optional: if the data directory cannot be created, tracing
/// stays disabled and the plugin works as usual. Only the first successful call
/// installs a subscriber.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let provider = tracer::create_tracer_provider(data_dir.join(SPAN_FILE_NAME), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);

    let _ = subscriber.try_init();
}
