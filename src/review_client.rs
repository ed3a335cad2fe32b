//! Homework review API client.
//!
//! Issues authenticated GET requests for submissions updated since a unix
//! timestamp, and validates the payload shape before the poll loop consumes
//! it.

use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default endpoint for homework review status queries.
pub const DEFAULT_REVIEW_API_URL: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Fetch failures, tagged by where in the request lifecycle they happened.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("review API request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("review API returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("review API response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Response-shape failures for the `homeworks` payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("response payload has no `homeworks` key")]
    MissingHomeworksKey,
    #[error("`homeworks` is not an array")]
    HomeworksNotArray,
}

#[derive(Clone)]
pub struct ReviewApiClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for ReviewApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewApiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ReviewApiClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            token,
        }
    }

    /// Fetch submissions updated since `from_date` (unix seconds).
    ///
    /// The response is decoded but not shape-checked here; pass it through
    /// [`extract_submissions`] before reading individual submissions.
    pub async fn fetch_updates(&self, from_date: i64) -> Result<Value, FetchError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date.to_string())])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        debug!("review API returned {} bytes for from_date={}", body.len(), from_date);
        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull the submission list out of a fetched payload.
pub fn extract_submissions(payload: &Value) -> Result<&Vec<Value>, PayloadError> {
    payload
        .get("homeworks")
        .ok_or(PayloadError::MissingHomeworksKey)?
        .as_array()
        .ok_or(PayloadError::HomeworksNotArray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_submissions() {
        let payload = json!({
            "homeworks": [{ "homework_name": "hw05_final", "status": "approved" }],
            "current_date": 1_693_305_600,
        });
        let subs = extract_submissions(&payload).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0]["status"], "approved");
    }

    #[test]
    fn test_extract_empty_list_is_valid() {
        let payload = json!({ "homeworks": [] });
        assert!(extract_submissions(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_extract_missing_key() {
        let payload = json!({ "current_date": 1_693_305_600 });
        assert_eq!(
            extract_submissions(&payload).unwrap_err(),
            PayloadError::MissingHomeworksKey
        );
    }

    #[test]
    fn test_extract_rejects_non_array() {
        for bad in [json!({ "homeworks": "hw05" }), json!({ "homeworks": { "a": 1 } })] {
            assert_eq!(
                extract_submissions(&bad).unwrap_err(),
                PayloadError::HomeworksNotArray
            );
        }
    }
}
