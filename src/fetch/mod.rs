//! Asynchronous fetch of the remote configuration document.
//!
//! One fetch resolves to exactly one [`FetchOutcome`]; transport, HTTP, and
//! body-shape failures each map to their own terminal outcome. Retry and
//! backoff are a caller concern — nothing here re-issues a request.

use std::fmt;

use ::url::Url;
use reqwest::StatusCode;
use tracing::{debug, warn};
use uuid::Uuid;

pub mod url;

/// Terminal result of one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Downloaded, validated, published, and persisted.
    Ok,
    /// Empty or unparseable URL, or a transport-level failure.
    ConfigHostInvalid,
    /// Any HTTP status other than 200.
    InvalidHttpCode,
    /// HTTP 200 with an empty body.
    EmptyResponse,
    /// Body is not valid JSON.
    AnswerParseError,
    /// Valid JSON rejected by the required-field policy.
    AnswerNotEnoughFields,
}

impl FetchOutcome {
    pub const fn is_ok(self) -> bool {
        matches!(self, FetchOutcome::Ok)
    }

    /// Stable label, used for logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            FetchOutcome::Ok => "ok",
            FetchOutcome::ConfigHostInvalid => "config_host_invalid",
            FetchOutcome::InvalidHttpCode => "invalid_http_code",
            FetchOutcome::EmptyResponse => "empty_response",
            FetchOutcome::AnswerParseError => "answer_parse_error",
            FetchOutcome::AnswerNotEnoughFields => "answer_not_enough_fields",
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion event delivered to the application's task queue by
/// [`ConfigService::spawn_fetch`](crate::service::ConfigService::spawn_fetch).
#[derive(Debug, Clone)]
pub struct FetchEvent {
    pub outcome: FetchOutcome,
    pub url: String,
}

/// GET the document body.
///
/// Classifies everything up to and including the raw body; JSON and field
/// validation happen in the service. An empty or invalid URL fails before any
/// request is issued.
pub(crate) async fn download(client: &reqwest::Client, raw_url: &str) -> Result<Vec<u8>, FetchOutcome> {
    if raw_url.trim().is_empty() {
        return Err(FetchOutcome::ConfigHostInvalid);
    }

    let url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(error) => {
            warn!(url = raw_url, %error, "invalid configuration url");
            return Err(FetchOutcome::ConfigHostInvalid);
        }
    };

    let request_id = Uuid::new_v4();
    debug!(%request_id, %url, "downloading remote configuration");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(error) => {
            warn!(%request_id, %error, "configuration request failed");
            return Err(FetchOutcome::ConfigHostInvalid);
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        warn!(%request_id, status = status.as_u16(), "configuration request rejected");
        return Err(FetchOutcome::InvalidHttpCode);
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(error) => {
            warn!(%request_id, %error, "configuration body read failed");
            return Err(FetchOutcome::ConfigHostInvalid);
        }
    };

    if body.is_empty() {
        return Err(FetchOutcome::EmptyResponse);
    }

    Ok(body.to_vec())
}
