//! Per-call request description

use crate::error::{ApiClientError, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Body of an outgoing request
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(Value),
    /// Sent as `multipart/form-data`; the transport picks the boundary
    Form(FormPayload),
}

impl RequestBody {
    /// Serialize any value into a JSON body
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiClientError::local(format!("Failed to serialize request body: {e}")))
    }
}

#[derive(Debug, Clone)]
enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: Option<String>,
        data: Bytes,
    },
}

/// Multipart form that can be materialized more than once
///
/// A refreshed request is sent twice, so the parts are kept as plain data
/// and a fresh [`Form`] is built for every attempt.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.map(str::to_string),
            data: data.into(),
        });
        self
    }

    pub(crate) fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime,
                    data,
                } => {
                    let mut file = Part::bytes(data.to_vec()).file_name(file_name.clone());
                    if let Some(mime) = mime {
                        file = file.mime_str(mime).map_err(|e| {
                            ApiClientError::local(format!("Invalid MIME type {mime}: {e}"))
                        })?;
                    }
                    form.part(name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

/// Everything a single call needs besides the path
///
/// Built per call and consumed by
/// [`MarketplaceClient::request`](crate::MarketplaceClient::request).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    /// Header overrides merged over the client defaults
    pub headers: HeaderMap,
    /// Never attach `Authorization` and never refresh on `401`
    pub skip_auth_header: bool,
    /// Token to use instead of the session's current one
    pub access_token: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a serializable JSON body
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        Ok(self.body(RequestBody::json(body)?))
    }

    pub fn form(self, form: FormPayload) -> Self {
        self.body(RequestBody::Form(form))
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn skip_auth(mut self) -> Self {
        self.skip_auth_header = true;
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub(crate) fn is_form(&self) -> bool {
        matches!(self.body, Some(RequestBody::Form(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.body.is_none());
        assert!(!options.skip_auth_header);
        assert!(options.access_token.is_none());
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Item {
            product_id: &'static str,
            quantity: u32,
        }

        let options = RequestOptions::post()
            .json(&Item {
                product_id: "p-1",
                quantity: 3,
            })
            .unwrap();
        match options.body {
            Some(RequestBody::Json(value)) => {
                assert_eq!(value, json!({ "product_id": "p-1", "quantity": 3 }))
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_form_payload_rebuilds() {
        let payload = FormPayload::new()
            .text("alt", "Front view")
            .file("image", "front.png", Some("image/png"), vec![0x89, 0x50]);
        let options = RequestOptions::post().form(payload);
        assert!(options.is_form());

        let Some(RequestBody::Form(payload)) = &options.body else {
            panic!("expected form body");
        };
        assert!(payload.to_form().is_ok());
        assert!(payload.to_form().is_ok());
    }

    #[test]
    fn test_invalid_mime_is_local_error() {
        let payload = FormPayload::new().file("image", "x.bin", Some("not a mime"), vec![1]);
        let err = payload.to_form().unwrap_err();
        assert!(err.is_network_error());
        assert!(err.message.contains("not a mime"));
    }
}
