//! HTTP client for the Google Sheets `values` API.
//!
//! Two operations only: a range read and a range write. Writes always use
//! `valueInputOption=USER_ENTERED` — the same interpretation mode for header
//! cells and summary blocks, so the grid renders consistently.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::error::SheetsError;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// One read/write range payload, as the values API frames it.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Client for one spreadsheet's `values` endpoints.
///
/// Use [`SheetsClient::new`] for production or
/// [`SheetsClient::with_base_url`] to point at a mock server in tests.
pub struct SheetsClient {
    client: Client,
    token: String,
    base_url: Url,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Creates a new client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, spreadsheet_id: &str, timeout_secs: u64) -> Result<Self, SheetsError> {
        Self::with_base_url(token, spreadsheet_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        token: &str,
        spreadsheet_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("msr/0.1 (monthly-summary-report)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
            spreadsheet_id: spreadsheet_id.to_owned(),
        })
    }

    /// Reads a range as a row-major matrix of display strings.
    ///
    /// An absent `values` key (a fully empty range) reads as an empty matrix.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(range, &[]);
        let response = self.client.get(url).bearer_auth(&self.token).send().await?;
        let body = Self::check_response(response, range).await?;

        let parsed: ValueRange =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: format!("values.get({range})"),
                source: e,
            })?;

        Ok(parsed
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Writes a row-major matrix into a range in one batched call.
    ///
    /// The API applies a single `values.update` atomically: either the whole
    /// range reflects the new values or, on transport failure, none of it
    /// does.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    pub async fn update_values(
        &self,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<(), SheetsError> {
        let url = self.values_url(range, &[("valueInputOption", "USER_ENTERED")]);
        let body = serde_json::json!({
            "majorDimension": "ROWS",
            "values": values,
        });

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        Self::check_response(response, range).await?;
        Ok(())
    }

    /// Builds `v4/spreadsheets/{id}/values/{range}` with the range as a
    /// percent-encoded path segment (sheet names may be non-ASCII).
    fn values_url(&self, range: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("v4")
                .push("spreadsheets")
                .push(&self.spreadsheet_id)
                .push("values")
                .push(range);
        }
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Asserts a 2xx status and returns the body text, mapping error payloads
    /// to [`SheetsError::Api`].
    async fn check_response(response: Response, range: &str) -> Result<String, SheetsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: format!("{} (range {range})", extract_api_message(&body)),
            });
        }
        Ok(response.text().await?)
    }
}

/// Renders one cell as the string the grid logic compares and writes.
fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Pulls `error.message` out of a Google API error body.
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
