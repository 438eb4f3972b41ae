//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

pub(crate) trait ResultExt<T> {
    /// Log the error and answer with an opaque 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error().detail("internal_error")
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_500_hides_cause() {
        let result: Result<(), &str> = Err("connection reset");

        let error = result.or_500("failed to list orders").err();

        assert_eq!(
            error.as_ref().map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(
            error.as_ref().and_then(|e| e.detail.as_deref()),
            Some("internal_error")
        );
    }
}
