//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Spans are written to `~/.local/share/zellij/bookfinder/bookfinder-spans.json`,
//!   one JSON record per line
//! - Files rotate at 10MB with 3-backup retention
//! - The span that issues a search fetch and the span that handles its response
//!   share one trace, through the trace context carried in the request
//!
//! The filter level comes from the `trace_level` plugin option (default `"info"`).
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`tracer`]: Tracer provider with file export
//! - [`span_formatter`]: Flat JSON span records
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SPAN_FILE_NAME};
