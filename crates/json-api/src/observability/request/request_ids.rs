//! Correlation ids carried on the `x-request-id` header.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuse the caller's id when one was sent, otherwise mint a fresh one.
pub(super) fn request_id_from(header_value: Option<String>) -> String {
    match header_value {
        Some(value) if !value.trim().is_empty() => value,
        _ => Uuid::now_v7().to_string(),
    }
}

pub(super) fn echo_request_id(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(request_id, "request id is not a valid header value: {source}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_id_is_kept() {
        assert_eq!(request_id_from(Some("abc-123".to_owned())), "abc-123");
    }

    #[test]
    fn blank_or_missing_id_is_replaced() {
        let generated = request_id_from(Some("   ".to_owned()));

        assert!(Uuid::parse_str(&generated).is_ok(), "expected a uuid, got {generated}");
        assert!(Uuid::parse_str(&request_id_from(None)).is_ok());
    }
}
