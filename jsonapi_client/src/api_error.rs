//! Classification and rendering of error responses returned by the API.
//!
//! A failed response becomes an [`ApiError`] tagged with the most specific
//! [`ApiErrorKind`] registered for its status code. The error carries the
//! `code` and `detail` fields of the body's `errors` list, a short summary
//! built from them, and a full diagnostic that dumps the whole body.

use std::fmt;

use serde_json::Value;

use crate::response::HttpResponse;

/// Status codes that map to a specific error kind.
const KNOWN_ERRORS: &[(u16, ApiErrorKind)] = &[
    (404, ApiErrorKind::NotFound),
    (422, ApiErrorKind::UnprocessableEntity),
];

/// The kind of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Any failure status without a registered kind.
    Generic,
    /// HTTP 404.
    NotFound,
    /// HTTP 422.
    UnprocessableEntity,
}

impl ApiErrorKind {
    /// Looks up the kind registered for `status`.
    pub fn for_status(status: u16) -> Option<Self> {
        KNOWN_ERRORS
            .iter()
            .find(|(known, _)| *known == status)
            .map(|(_, kind)| *kind)
    }

    /// Resolves the kind an error should have when `requested` is asked for.
    ///
    /// Only a generic request is narrowed through the registry; a specific
    /// request is returned unchanged.
    pub fn classify(status: u16, requested: ApiErrorKind) -> Self {
        match requested {
            ApiErrorKind::Generic => Self::for_status(status).unwrap_or(ApiErrorKind::Generic),
            specific => specific,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiErrorKind::Generic => "ApiError",
            ApiErrorKind::NotFound => "NotFoundError",
            ApiErrorKind::UnprocessableEntity => "UnprocessableEntityError",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error response from the API.
///
/// Everything is computed once in the constructor; the value is immutable
/// afterwards. `Display` renders [`ApiError::message`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    status: u16,
    body: Value,
    codes: Vec<Value>,
    details: Vec<Value>,
    summary: String,
    message: String,
}

impl ApiError {
    /// Builds an error for `response`, picking the registered kind for its status.
    pub fn new(response: &impl HttpResponse) -> Self {
        Self::with_kind(ApiErrorKind::Generic, response)
    }

    /// Builds an error of the `requested` kind.
    ///
    /// A generic request is still narrowed to the registered kind for the
    /// response's status; see [`ApiErrorKind::classify`].
    pub fn with_kind(requested: ApiErrorKind, response: &impl HttpResponse) -> Self {
        let status = response.status();
        let body = response.body().clone();
        let kind = ApiErrorKind::classify(status, requested);
        tracing::debug!(status, kind = %kind, "Classified API error response");

        let codes = error_field(&body, "code");
        let details = error_field(&body, "detail");
        let summary = summarize(status, &codes, &details);
        let message = full_message(status, &body);

        Self {
            kind,
            status,
            body,
            codes,
            details,
            summary,
            message,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The non-null `code` values of the body's `errors`, in order.
    pub fn codes(&self) -> &[Value] {
        &self.codes
    }

    /// The non-null `detail` values of the body's `errors`, in order.
    pub fn details(&self) -> &[Value] {
        &self.details
    }

    /// One-line description: error codes if any, else details, else the bare status.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Full diagnostic with the pretty-printed response body.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }

    pub fn is_unprocessable_entity(&self) -> bool {
        self.kind == ApiErrorKind::UnprocessableEntity
    }
}

fn error_records(body: &Value) -> &[Value] {
    body.get("errors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn error_field(body: &Value, field: &str) -> Vec<Value> {
    error_records(body)
        .iter()
        .filter_map(|record| record.as_object()?.get(field))
        .filter(|value| !value.is_null())
        .cloned()
        .collect()
}

fn summarize(status: u16, codes: &[Value], details: &[Value]) -> String {
    if !codes.is_empty() {
        listing(status, "code", codes)
    } else if !details.is_empty() {
        listing(status, "detail", details)
    } else {
        format!("The API responded with a {} error status.", status)
    }
}

fn listing(status: u16, noun: &str, values: &[Value]) -> String {
    let plural = if values.len() == 1 { "" } else { "s" };
    let rendered = values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "The API returned a {} error status with the following error {}{}: {}",
        status, noun, plural, rendered
    )
}

fn full_message(status: u16, body: &Value) -> String {
    let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
    let content = pretty
        .lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "The API returned a {} error status and this content:\n{}",
        status, content
    )
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{ApiError, ApiErrorKind};
    use crate::Response;

    fn api_error(status: u16, body: Value) -> ApiError {
        ApiError::new(&Response::new(status, body))
    }

    #[test]
    fn registered_statuses_get_specific_kinds() {
        assert_eq!(api_error(404, json!({})).kind(), ApiErrorKind::NotFound);
        assert_eq!(
            api_error(422, json!({})).kind(),
            ApiErrorKind::UnprocessableEntity
        );
    }

    #[test]
    fn unknown_statuses_stay_generic() {
        for status in [400, 401, 403, 409, 429, 500, 503] {
            assert_eq!(api_error(status, json!({})).kind(), ApiErrorKind::Generic);
        }
    }

    #[test]
    fn specific_request_is_not_reclassified() {
        let response = Response::new(500, json!({}));
        let error = ApiError::with_kind(ApiErrorKind::NotFound, &response);
        assert_eq!(error.kind(), ApiErrorKind::NotFound);

        let response = Response::new(404, json!({}));
        let error = ApiError::with_kind(ApiErrorKind::UnprocessableEntity, &response);
        assert_eq!(error.kind(), ApiErrorKind::UnprocessableEntity);
    }

    #[test]
    fn single_code() {
        let error = api_error(404, json!({"errors": [{"code": "not_found"}]}));
        assert!(error.is_not_found());
        assert_eq!(error.codes(), &[json!("not_found")]);
        assert!(error.details().is_empty());
        assert_eq!(
            error.summary(),
            r#"The API returned a 404 error status with the following error code: "not_found""#
        );
    }

    #[test]
    fn codes_keep_order_and_duplicates() {
        let error = api_error(
            400,
            json!({"errors": [
                {"code": "b"},
                {"detail": "no code here"},
                {"code": "a"},
                {"code": "b"},
                {"code": null}
            ]}),
        );
        assert_eq!(error.codes(), &[json!("b"), json!("a"), json!("b")]);
        assert_eq!(
            error.summary(),
            r#"The API returned a 400 error status with the following error codes: "b", "a", "b""#
        );
    }

    #[test]
    fn falsy_values_are_present() {
        let error = api_error(400, json!({"errors": [{"code": 0}, {"code": ""}, {"code": false}]}));
        assert_eq!(error.codes(), &[json!(0), json!(""), json!(false)]);
        assert_eq!(
            error.summary(),
            r#"The API returned a 400 error status with the following error codes: 0, "", false"#
        );
    }

    #[test]
    fn details_used_without_codes() {
        let error = api_error(
            422,
            json!({"errors": [
                {"detail": "name is required"},
                {"detail": "email is invalid"}
            ]}),
        );
        assert!(error.is_unprocessable_entity());
        assert!(error.codes().is_empty());
        assert_eq!(
            error.details(),
            &[json!("name is required"), json!("email is invalid")]
        );
        assert_eq!(
            error.summary(),
            r#"The API returned a 422 error status with the following error details: "name is required", "email is invalid""#
        );
    }

    #[test]
    fn single_detail_is_singular() {
        let error = api_error(422, json!({"errors": [{"detail": "name is required"}]}));
        assert_eq!(
            error.summary(),
            r#"The API returned a 422 error status with the following error detail: "name is required""#
        );
    }

    #[test]
    fn codes_win_over_details() {
        let error = api_error(
            422,
            json!({"errors": [
                {"code": "blank", "detail": "name is required"},
                {"detail": "email is invalid"}
            ]}),
        );
        assert_eq!(error.details().len(), 2);
        assert_eq!(
            error.summary(),
            r#"The API returned a 422 error status with the following error code: "blank""#
        );
        assert!(!error.summary().contains("detail"));
    }

    #[test]
    fn default_summary_without_errors() {
        let error = api_error(500, json!({}));
        assert_eq!(error.kind(), ApiErrorKind::Generic);
        assert!(error.codes().is_empty());
        assert!(error.details().is_empty());
        assert_eq!(error.summary(), "The API responded with a 500 error status.");

        let error = api_error(500, json!({"errors": []}));
        assert_eq!(error.summary(), "The API responded with a 500 error status.");
    }

    #[test]
    fn malformed_bodies_degrade() {
        let bodies = [
            json!(null),
            json!("Internal Server Error"),
            json!([{"code": "x"}]),
            json!({"errors": "boom"}),
            json!({"errors": {"code": "x"}}),
            json!({"errors": ["x", 1, null, [{"code": "y"}]]}),
        ];
        for body in bodies {
            let error = api_error(500, body);
            assert!(error.codes().is_empty());
            assert!(error.details().is_empty());
            assert_eq!(error.summary(), "The API responded with a 500 error status.");
        }
    }

    #[test]
    fn message_dumps_indented_body() {
        let error = api_error(
            404,
            json!({"errors": [{"code": "not_found", "detail": "No such widget"}]}),
        );
        let expected = [
            "The API returned a 404 error status and this content:",
            "  {",
            "    \"errors\": [",
            "      {",
            "        \"code\": \"not_found\",",
            "        \"detail\": \"No such widget\"",
            "      }",
            "    ]",
            "  }",
        ]
        .join("\n");
        assert_eq!(error.message(), expected);
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn message_keeps_key_order() {
        let body: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let error = api_error(500, body);
        assert_eq!(
            error.message(),
            "The API returned a 500 error status and this content:\n  {\n    \"zeta\": 1,\n    \"alpha\": 2\n  }"
        );
    }

    #[test]
    fn message_for_scalar_bodies() {
        assert_eq!(
            api_error(502, json!("Bad Gateway")).message(),
            "The API returned a 502 error status and this content:\n  \"Bad Gateway\""
        );
        assert_eq!(
            api_error(500, json!({})).message(),
            "The API returned a 500 error status and this content:\n  {}"
        );
    }

    #[test]
    fn equal_responses_give_equal_errors() {
        let body = json!({"errors": [{"code": "taken"}, {"detail": "already exists"}]});
        let first = api_error(409, body.clone());
        let second = api_error(409, body);
        assert_eq!(first, second);
        assert_eq!(first.message(), second.message());
        assert_eq!(first.codes(), second.codes());
        assert_eq!(first.details(), second.details());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ApiErrorKind::Generic.to_string(), "ApiError");
        assert_eq!(ApiErrorKind::NotFound.to_string(), "NotFoundError");
        assert_eq!(
            ApiErrorKind::UnprocessableEntity.to_string(),
            "UnprocessableEntityError"
        );
        assert_eq!(ApiErrorKind::for_status(418), None);
    }
}
