//! Route templates for span names and metric labels.

use uuid::Uuid;

const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Names recorded for one request: the templated route and its span name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RouteNames {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn route_names(method: &str, path: &str) -> RouteNames {
    let route = route_template(path);
    let span_name = format!("{method} {route}");

    RouteNames { route, span_name }
}

/// Collapse identifiers so that label cardinality stays bounded.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else if segment.starts_with(ORDER_NUMBER_PREFIX) {
                "{order_number}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
