//! HTTP plumbing shared by the provider implementations.

use std::time::Duration;
use docmentor_core::error::ProviderError;
use tracing::warn;

/// Default request timeout when none is configured.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the HTTP client used for completion calls.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build configured HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// Map a transport failure to the provider error taxonomy.
pub(crate) fn send_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Turn any non-2xx response into an error, keeping the body as the message.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();

    if status == 429 {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        return Err(ProviderError::RateLimited { retry_after_secs });
    }

    if status == 401 || status == 403 {
        return Err(ProviderError::AuthenticationFailed(
            "Invalid API key or insufficient permissions".into(),
        ));
    }

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        warn!(provider, status, body = %error_body, "Provider returned error");
        return Err(ProviderError::ApiError {
            status_code: status,
            message: error_body,
        });
    }

    Ok(response)
}

/// Error for a 2xx response whose body is not the expected envelope.
pub(crate) fn malformed(message: impl Into<String>) -> ProviderError {
    ProviderError::ApiError {
        status_code: 200,
        message: message.into(),
    }
}
