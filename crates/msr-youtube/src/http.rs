//! Shared GET-and-parse plumbing for the Data and Analytics clients.

use reqwest::{Client, StatusCode, Url};

use crate::error::YoutubeError;

/// Sends a bearer-authenticated GET request, maps non-2xx statuses to typed
/// errors, and parses the body as JSON.
///
/// Google error payloads carry the human-readable reason at
/// `error.message`; that string is surfaced in [`YoutubeError::Api`].
pub(crate) async fn get_json(
    client: &Client,
    token: &str,
    url: Url,
) -> Result<serde_json::Value, YoutubeError> {
    let response = client.get(url.clone()).bearer_auth(token).send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(YoutubeError::RateLimited { retry_after_secs });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(YoutubeError::Api {
            status: status.as_u16(),
            message: extract_api_message(&body),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

/// Pulls `error.message` out of a Google API error body, falling back to a
/// generic string when the body is not the expected envelope.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "unknown error".to_string())
}
