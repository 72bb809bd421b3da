//! Raw request handler

use crate::error::{CliError, Result};
use crate::output::json_output;
use marketplace_sdk::{MarketplaceClient, RequestBody, RequestOptions};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

/// Build request options from command-line input
pub fn build_options(method: &str, data: Option<&str>, no_auth: bool) -> Result<RequestOptions> {
    let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| CliError::invalid_argument(format!("Unknown HTTP method: {method}")))?;

    let mut options = RequestOptions::new(method);
    if let Some(data) = data {
        let body: Value = serde_json::from_str(data)
            .map_err(|e| CliError::invalid_argument(format!("--data is not valid JSON: {e}")))?;
        options = options.body(RequestBody::Json(body));
    }
    if no_auth {
        options = options.skip_auth();
    }
    Ok(options)
}

/// Send one request and print whatever came back
pub async fn handle_request(
    client: &MarketplaceClient,
    method: &str,
    path: &str,
    data: Option<&str>,
    no_auth: bool,
) -> Result<()> {
    let options = build_options(method, data, no_auth)?;
    debug!(method = %options.method, path, "Raw request");

    let response: Value = client.request(path, options).await?;
    match response {
        Value::Null => Ok(()),
        Value::String(text) => {
            println!("{text}");
            Ok(())
        }
        other => json_output(&other),
    }
}
