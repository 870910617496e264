use anyhow::Result;

use opentelemetry::{global, trace::TracerProvider};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_aws::detector::LambdaResourceDetector;
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter};
use opentelemetry_resource_detectors::{OsResourceDetector, ProcessResourceDetector};
use opentelemetry_sdk::{
    logs::SdkLoggerProvider,
    metrics::SdkMeterProvider,
    propagation::TraceContextPropagator,
    resource::{EnvResourceDetector, ResourceDetector, TelemetryResourceDetector},
    trace::{RandomIdGenerator, SdkTracerProvider},
    Resource,
};
use tracing::Level;
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};
use tracing_subscriber::{prelude::*, EnvFilter};

// Every provider shares one resource describing the Lambda environment,
// assembled from all the detectors available to us.
fn lambda_resource() -> Resource {
    let detectors: [Box<dyn ResourceDetector>; 5] = [
        Box::new(OsResourceDetector),
        Box::new(ProcessResourceDetector),
        Box::new(EnvResourceDetector::new()),
        Box::new(TelemetryResourceDetector),
        Box::new(LambdaResourceDetector),
    ];

    Resource::builder().with_detectors(&detectors).build()
}

// A Tracer Provider is a factory for Tracers.
// A Tracer creates spans describing what is happening for a given operation,
// such as a single invocation of the function.
fn init_tracer_provider() -> Result<SdkTracerProvider> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let exporter = SpanExporter::builder().with_tonic().build()?;

    Ok(SdkTracerProvider::builder()
        .with_resource(lambda_resource())
        .with_id_generator(RandomIdGenerator::default())
        .with_batch_exporter(exporter)
        .build())
}

// A Meter Provider is a factory for Meters, capturing measurements about the
// function at runtime.
fn init_meter_provider() -> Result<SdkMeterProvider> {
    let exporter = MetricExporter::builder().with_tonic().build()?;

    let meter_provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .with_resource(lambda_resource())
        .build();

    global::set_meter_provider(meter_provider.clone());

    Ok(meter_provider)
}

// A Logger Provider is a factory for Loggers; log records emitted through
// the tracing bridge below end up here.
fn init_logger_provider() -> Result<SdkLoggerProvider> {
    let exporter = LogExporter::builder().with_tonic().build()?;

    Ok(SdkLoggerProvider::builder()
        .with_resource(lambda_resource())
        .with_simple_exporter(exporter)
        .build())
}

/// Configures the SDK with everything available wired in. Invoked exactly
/// once after preloading; any failure here propagates to the caller.
pub fn init_otel() -> Result<OtelGuard> {
    let logger_provider = init_logger_provider()?;
    let tracer_provider = init_tracer_provider()?;
    let meter_provider = init_meter_provider()?;

    let tracer = tracer_provider.tracer("lambda-otel-wrapper");

    // Keep the transport crates' own logs out of the pipeline, otherwise
    // exporting telemetry generates telemetry.
    let filter_otel = EnvFilter::new("info")
        .add_directive("hyper=off".parse()?)
        .add_directive("opentelemetry=off".parse()?)
        .add_directive("tonic=off".parse()?)
        .add_directive("h2=off".parse()?)
        .add_directive("reqwest=off".parse()?);
    let otel_layer = OpenTelemetryTracingBridge::new(&logger_provider).with_filter(filter_otel);

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            Level::INFO,
        ))
        .with(otel_layer)
        .with(MetricsLayer::new(meter_provider.clone()))
        .with(OpenTelemetryLayer::new(tracer))
        .init();

    Ok(OtelGuard {
        tracer_provider,
        meter_provider,
        logger_provider,
    })
}

pub struct OtelGuard {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
    logger_provider: SdkLoggerProvider,
}

impl OtelGuard {
    /// Pushes buffered telemetry out before the runtime freezes the
    /// execution environment.
    pub fn flush(&self) {
        if let Err(err) = self.tracer_provider.force_flush() {
            eprintln!("{err:?}");
        }
        if let Err(err) = self.meter_provider.force_flush() {
            eprintln!("{err:?}");
        }
        if let Err(err) = self.logger_provider.force_flush() {
            eprintln!("{err:?}");
        }
    }
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(err) = self.tracer_provider.shutdown() {
            eprintln!("{err:?}");
        }
        if let Err(err) = self.meter_provider.shutdown() {
            eprintln!("{err:?}");
        }
        if let Err(err) = self.logger_provider.shutdown() {
            eprintln!("{err:?}");
        }
    }
}
