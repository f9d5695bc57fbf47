//! Provider response handling.
//!
//! Providers fail in two layers. Transport failures show up in the status
//! code. Alpha Vantage and BLS also answer `200 OK` when they throttle or
//! refuse a request, with the reason in the JSON body. A response is usable
//! only after both layers pass.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::Value;

use crate::error::ProviderError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
/// Longest slice of an error body kept in [`ProviderError::Api`].
const ERROR_BODY_CHARS: usize = 200;

const BLS_SUCCEEDED: &str = "REQUEST_SUCCEEDED";
const BLS_NOT_PROCESSED: &str = "REQUEST_NOT_PROCESSED";

/// Map the status code of a provider response.
///
/// 429 becomes [`ProviderError::RateLimited`] using `Retry-After` seconds
/// (60 when absent). Any other non-success becomes [`ProviderError::Api`]
/// with the start of the body, which for these providers is often an HTML
/// error page.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited {
            retry_after_secs: retry_after(resp.headers()),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: body.trim().chars().take(ERROR_BODY_CHARS).collect(),
        });
    }
    Ok(resp)
}

/// Read a JSON provider body, rejecting in-body throttling and refusals.
pub(crate) async fn read_json(resp: reqwest::Response) -> Result<Value, ProviderError> {
    let body: Value = check_status(resp).await?.json().await?;
    match notice(&body) {
        Some(err) => Err(err),
        None => Ok(body),
    }
}

/// The failure a `200 OK` body reports, if any.
///
/// - Alpha Vantage `Note` / `Information`: call quota spent, [`ProviderError::Throttled`].
/// - Alpha Vantage `Error Message`: bad symbol or key, [`ProviderError::Api`].
/// - BLS `status` other than `REQUEST_SUCCEEDED`: `REQUEST_NOT_PROCESSED`
///   is the daily quota and maps to `Throttled`, the rest to `Api`.
pub(crate) fn notice(body: &Value) -> Option<ProviderError> {
    if let Some(note) = body
        .get("Note")
        .or_else(|| body.get("Information"))
        .and_then(Value::as_str)
    {
        return Some(ProviderError::Throttled(note.to_string()));
    }
    if let Some(message) = body.get("Error Message").and_then(Value::as_str) {
        return Some(ProviderError::Api {
            status: 200,
            message: message.to_string(),
        });
    }

    let status = body.get("status").and_then(Value::as_str)?;
    if status == BLS_SUCCEEDED {
        return None;
    }
    let message = body
        .get("message")
        .and_then(Value::as_array)
        .map(|m| m.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("; "))
        .unwrap_or_default();
    Some(if status == BLS_NOT_PROCESSED {
        ProviderError::Throttled(message)
    } else {
        ProviderError::Api {
            status: 200,
            message: format!("{status}: {message}"),
        }
    })
}

fn retry_after(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
