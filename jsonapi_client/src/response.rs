//! The response shape consumed by [`ApiError`](crate::ApiError).

use serde_json::Value;

/// Anything that carries an HTTP status code and a parsed JSON body.
pub trait HttpResponse {
    fn status(&self) -> u16;
    fn body(&self) -> &Value;
}

/// A captured HTTP response: status code plus the parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Builds a response from raw body text.
    ///
    /// An empty body becomes `null`; text that is not valid JSON is kept as a
    /// JSON string so it still shows up in diagnostics.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }
}

impl HttpResponse for Response {
    fn status(&self) -> u16 {
        self.status
    }

    fn body(&self) -> &Value {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{HttpResponse, Response};

    #[test]
    fn parses_json_text() {
        let response = Response::from_text(404, r#"{"errors":[{"code":"not_found"}]}"#);
        assert_eq!(response.status(), 404);
        assert_eq!(response.body(), &json!({"errors": [{"code": "not_found"}]}));
    }

    #[test]
    fn empty_text_is_null() {
        assert_eq!(Response::from_text(500, "").body(), &json!(null));
        assert_eq!(Response::from_text(500, " \n").body(), &json!(null));
    }

    #[test]
    fn invalid_json_is_kept_as_string() {
        let response = Response::from_text(502, "Bad Gateway");
        assert_eq!(response.body(), &json!("Bad Gateway"));
    }
}
