//! W3C trace context propagated by upstream callers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Returns the caller's trace context when the headers carry a valid one.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    let carrier = Headers(headers);

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a request without trace headers
        // never inherits whatever span is current on this task.
        let context = propagator.extract_with_context(&Context::new(), &carrier);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
