//! Response decoding shared by regular requests and the refresh call

use crate::error::{ApiClientError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Body of a successful response
#[derive(Debug)]
pub(crate) struct ResponseBody {
    pub(crate) status: StatusCode,
    pub(crate) body: Value,
}

/// Read a response, turning non-2xx statuses into [`ApiClientError`]
///
/// JSON content types are parsed; anything else comes back as a JSON
/// string holding the raw text, whitespace included. A zero-length body
/// (or a blank JSON one) is `null`.
pub(crate) async fn read_response(url: &str, response: Response) -> Result<ResponseBody> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_json_content_type);

    let text = response
        .text()
        .await
        .map_err(|e| ApiClientError::network(url, &e))?;

    let body = if text.is_empty() || (is_json && text.trim().is_empty()) {
        Value::Null
    } else if is_json {
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(ApiClientError::new(
                    status.as_u16(),
                    format!("Malformed JSON in response from {url}: {e}"),
                    Value::String(text),
                ));
            }
            Err(_) => Value::String(text),
        }
    } else {
        Value::String(text)
    };

    if status.is_success() {
        Ok(ResponseBody { status, body })
    } else {
        Err(ApiClientError::from_response(status, body))
    }
}

/// Deserialize a successful body into the caller's type
pub(crate) fn decode<T: DeserializeOwned>(url: &str, response: ResponseBody) -> Result<T> {
    let decoded = match T::deserialize(&response.body) {
        // An absent body reads as an empty string for text callers
        Err(e) if response.body.is_null() => {
            T::deserialize(Value::String(String::new())).map_err(|_| e)
        }
        other => other,
    };
    decoded.map_err(|e| {
        ApiClientError::new(
            response.status.as_u16(),
            format!("Failed to decode response from {url}: {e}"),
            response.body,
        )
    })
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
