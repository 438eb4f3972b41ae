//! OTLP span export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

/// Tracer provider exporting over gRPC with a batch processor.
pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.as_str())
        .with_timeout(Duration::from_secs(config.otel_exporter_otlp_timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_resource(resource(config))
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .with_attribute(KeyValue::new(
            "deployment.environment.name",
            config.otel_deployment_environment.clone(),
        ))
        .build()
}

/// Respect the caller's sampling decision; sample new roots by ratio.
fn sampler(ratio: f64) -> Sampler {
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) };

    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_ratio(sampler: &Sampler) -> Option<f64> {
        match sampler {
            Sampler::ParentBased(root) => match root.as_ref() {
                Sampler::TraceIdRatioBased(ratio) => Some(*ratio),
                _ => None,
            },
            _ => None,
        }
    }

    #[test]
    fn sample_ratio_is_clamped() {
        assert_eq!(root_ratio(&sampler(2.5)), Some(1.0));
        assert_eq!(root_ratio(&sampler(-1.0)), Some(0.0));
        assert_eq!(root_ratio(&sampler(0.25)), Some(0.25));
        assert_eq!(root_ratio(&sampler(f64::NAN)), Some(1.0));
    }
}
