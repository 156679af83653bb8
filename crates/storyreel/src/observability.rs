//! Logging and span export.
//!
//! Log lines go to stderr, leaving stdout to the story itself. Builds with the
//! `observability` feature also print finished spans through OpenTelemetry.

use derive_getters::Getters;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

type RegistryLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Shape of each log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    #[display("text")]
    Text,
    /// One JSON object per event
    #[display("json")]
    Json,
}

/// Logging settings resolved from command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LoggingConfig {
    /// Service name attached to exported spans
    service: &'static str,
    /// Service version attached to exported spans
    version: &'static str,
    /// Filter directives used when `RUST_LOG` is unset
    filter: String,
    /// Line format
    format: LogFormat,
}

impl LoggingConfig {
    /// `info` by default, `debug` when `verbose` is set.
    ///
    /// ```
    /// use storyreel::observability::{LogFormat, LoggingConfig};
    ///
    /// let config = LoggingConfig::new(true, LogFormat::Json);
    /// assert_eq!(config.filter(), "debug");
    /// assert_eq!(*config.format(), LogFormat::Json);
    /// ```
    pub fn new(verbose: bool, format: LogFormat) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            filter: if verbose { "debug" } else { "info" }.to_string(),
            format,
        }
    }

    /// Replace the fallback filter directives.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(false, LogFormat::Text)
    }
}

/// Flushes exported spans when dropped. Hold it until the program exits.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    #[cfg(feature = "observability")]
    provider: Option<opentelemetry_sdk::trace::SdkTracerProvider>,
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        #[cfg(feature = "observability")]
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to flush spans: {e}");
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// [`LoggingConfig::filter`].
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;

    let lines = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    let mut guard = LoggingGuard::default();
    let spans = span_export(config, &mut guard);

    tracing_subscriber::registry()
        .with(spans)
        .with(filter)
        .with(lines)
        .try_init()?;

    tracing::debug!(format = %config.format, "Logging initialized");
    Ok(guard)
}

#[cfg(feature = "observability")]
fn span_export(config: &LoggingConfig, guard: &mut LoggingGuard) -> Option<RegistryLayer> {
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .with_resource(
            Resource::builder()
                .with_service_name(config.service)
                .with_attribute(KeyValue::new("service.version", config.version))
                .build(),
        )
        .build();
    global::set_tracer_provider(provider.clone());

    let layer = tracing_opentelemetry::layer()
        .with_tracer(provider.tracer(config.service))
        .boxed();
    guard.provider = Some(provider);
    Some(layer)
}

#[cfg(not(feature = "observability"))]
fn span_export(_config: &LoggingConfig, _guard: &mut LoggingGuard) -> Option<RegistryLayer> {
    None
}
