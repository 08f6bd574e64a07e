//! Shared HTTP plumbing for the API clients

use std::time::Duration;

use reqwest::{Client as HttpClient, Response, StatusCode};

use crate::error::{ApiError, Result};

/// Build the underlying reqwest client.
///
/// No timeout is applied unless one is configured.
pub fn build_http_client(timeout: Option<Duration>) -> Result<HttpClient> {
    let mut builder = HttpClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| ApiError::Network(e.to_string()).into())
}

/// Convert a non-success response into the matching `ApiError`.
pub async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Resource not found".to_string());
            ApiError::NotFound(error_msg)
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            ApiError::RateLimit(Duration::from_secs(retry_after))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            ApiError::BadRequest(error_msg)
        }
        status if status.is_server_error() => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            ApiError::ServerError(error_msg)
        }
        status => ApiError::Status(status.as_u16()),
    }
}

/// Pass successful responses through, map everything else to an error.
pub async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(response).await.into())
    }
}
