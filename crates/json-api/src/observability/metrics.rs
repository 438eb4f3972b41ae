//! Prometheus collectors and the `/metrics` endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Response, handler,
    http::{StatusCode, header::CONTENT_TYPE, header::HeaderValue},
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_requests_in_flight: IntGauge,
    orders_placed_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

/// Holds the in-flight gauge up until the request finishes.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.http_requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status: u16, elapsed_seconds: f64) {
    if let Some(metrics) = metrics() {
        let status = status.to_string();

        metrics
            .http_requests_total
            .with_label_values(&[method, route, &status])
            .inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(elapsed_seconds);
    }
}

/// Count one checkout attempt by its outcome (`placed` or an error kind).
pub(crate) fn record_order_outcome(outcome: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .orders_placed_total
            .with_label_values(&[outcome])
            .inc();
    }
}

/// Prometheus text exposition of every registered collector.
#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let encoder = TextEncoder::new();

    let body = metrics()
        .ok_or("metrics registry unavailable".to_owned())
        .and_then(|metrics| {
            encoder
                .encode_to_string(&metrics.registry.gather())
                .map_err(|source| source.to_string())
        });

    match body {
        Ok(body) => {
            if let Ok(content_type) = HeaderValue::from_str(encoder.format_type()) {
                res.headers_mut().insert(CONTENT_TYPE, content_type);
            }

            res.render(body);
        }
        Err(reason) => {
            error!("failed to render metrics: {reason}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| match build_metrics() {
            Ok(metrics) => Some(metrics),
            Err(source) => {
                error!("failed to build metrics registry: {source}");
                None
            }
        })
        .as_ref()
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

fn build_metrics() -> prometheus::Result<Metrics> {
    let registry = Registry::new();

    let http_requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "audioshelf_http_requests_total",
                "HTTP requests by method, route and status code.",
            ),
            &["method", "route", "status_code"],
        )?,
    )?;

    let http_request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "audioshelf_http_request_duration_seconds",
                "HTTP request latency in seconds by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?,
    )?;

    let http_requests_in_flight = register(
        &registry,
        IntGauge::new(
            "audioshelf_http_requests_in_flight",
            "HTTP requests currently being served.",
        )?,
    )?;

    let orders_placed_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "audioshelf_orders_placed_total",
                "Checkout attempts by outcome.",
            ),
            &["outcome"],
        )?,
    )?;

    Ok(Metrics {
        registry,
        http_requests_total,
        http_request_duration_seconds,
        http_requests_in_flight,
        orders_placed_total,
    })
}
