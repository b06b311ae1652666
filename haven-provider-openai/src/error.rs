//! Internal error helpers for mapping HTTP/reqwest errors to [`ProviderError`].

use haven_turn::ProviderError;

/// Map a non-success HTTP status to a [`ProviderError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthFailed(body.to_string()),
        429 => ProviderError::RateLimited,
        500 | 502 | 503 | 504 => ProviderError::ServiceUnavailable(body.to_string()),
        _ => ProviderError::RequestFailed(format!("HTTP {status}: {body}")),
    }
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::RequestFailed(format!("timed out: {err}"))
    } else {
        ProviderError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn map_401_and_403_to_auth_failed() {
        assert!(matches!(
            map_http_status(StatusCode::UNAUTHORIZED, "Invalid API key"),
            ProviderError::AuthFailed(_)
        ));
        assert!(matches!(
            map_http_status(StatusCode::FORBIDDEN, "forbidden"),
            ProviderError::AuthFailed(_)
        ));
    }

    #[test]
    fn map_429_to_rate_limited() {
        let err = map_http_status(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded");
        assert!(matches!(err, ProviderError::RateLimited));
        assert!(err.is_retryable());
    }

    #[test]
    fn map_5xx_to_service_unavailable() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            let err = map_http_status(status, "down");
            assert!(matches!(err, ProviderError::ServiceUnavailable(_)), "{status}");
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn map_other_status_to_request_failed() {
        let err = map_http_status(StatusCode::BAD_REQUEST, "bad tools");
        match err {
            ProviderError::RequestFailed(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("bad tools"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }
}
