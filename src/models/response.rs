//! Typed endpoint response envelope.
//!
//! Backends answer with a JSON object carrying either a `result` field or an
//! `error` (legacy: `ERROR`) field, plus whatever sibling fields the endpoint
//! adds (totals, cursors, ...). [`ApiResponse`] keeps that envelope intact and
//! exposes the decoded [`ApiOutcome`] next to it, so callers branch on
//! variants instead of probing fields.

use serde_json::Value;

/// Decoded meaning of an endpoint response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// Payload carried a `result` field (which may still be falsy).
    Success(Value),
    /// Payload carried an `error` or `ERROR` field.
    ApplicationError(String),
    /// Payload carried neither field, or was not an object.
    Empty,
}

/// An endpoint response: the untouched envelope plus its decoded outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    outcome: ApiOutcome,
    envelope: Value,
}

impl ApiResponse {
    /// Decode a raw endpoint payload.
    ///
    /// For the outcome, error fields take precedence over `result`; a null or
    /// `false` error field is ignored. The envelope is kept as received.
    pub fn from_value(envelope: Value) -> Self {
        Self {
            outcome: decode_outcome(&envelope),
            envelope,
        }
    }

    pub fn outcome(&self) -> &ApiOutcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> ApiOutcome {
        self.outcome
    }

    /// The payload exactly as the dispatcher returned it.
    pub fn envelope(&self) -> &Value {
        &self.envelope
    }

    pub fn into_envelope(self) -> Value {
        self.envelope
    }

    /// A top-level field of the envelope, e.g. a `total` next to `result`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.envelope.get(name)
    }

    /// The `result` value, if the outcome is a success.
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            ApiOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this response may be memoized.
    ///
    /// Only the envelope's `result` field decides: it must be truthy. Error
    /// fields sent alongside a truthy result do not prevent caching.
    pub fn is_cacheable(&self) -> bool {
        self.field("result").is_some_and(is_truthy)
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn decode_outcome(envelope: &Value) -> ApiOutcome {
    let Value::Object(fields) = envelope else {
        return ApiOutcome::Empty;
    };

    for key in ["ERROR", "error"] {
        if let Some(err) = fields.get(key)
            && is_truthy(err)
        {
            return ApiOutcome::ApplicationError(error_message(err));
        }
    }

    match fields.get("result") {
        Some(result) => ApiOutcome::Success(result.clone()),
        None => ApiOutcome::Empty,
    }
}

fn error_message(err: &Value) -> String {
    match err {
        Value::String(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// JavaScript truthiness over JSON values.
///
/// `null`, `false`, `0` and `""` are falsy; everything else (including empty
/// arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(value: Value) -> ApiOutcome {
        ApiResponse::from_value(value).into_outcome()
    }

    #[test]
    fn test_decode_success() {
        let resp = ApiResponse::from_value(json!({"result": 42}));
        assert_eq!(resp.outcome(), &ApiOutcome::Success(json!(42)));
        assert!(resp.is_cacheable());
    }

    #[test]
    fn test_decode_falsy_success() {
        let resp = ApiResponse::from_value(json!({"result": false}));
        assert_eq!(resp.result(), Some(&json!(false)));
        assert!(!resp.is_cacheable());

        assert!(!ApiResponse::from_value(json!({"result": 0})).is_cacheable());
        assert!(!ApiResponse::from_value(json!({"result": ""})).is_cacheable());
        assert!(!ApiResponse::from_value(json!({"result": null})).is_cacheable());
    }

    #[test]
    fn test_envelope_keeps_sibling_fields() {
        let raw = json!({"result": ["r1", "r2"], "total": 100});
        let resp = ApiResponse::from_value(raw.clone());

        assert_eq!(resp.result(), Some(&json!(["r1", "r2"])));
        assert_eq!(resp.field("total"), Some(&json!(100)));
        assert_eq!(resp.into_envelope(), raw);
    }

    #[test]
    fn test_decode_application_error() {
        assert_eq!(
            outcome(json!({"error": "no such table"})),
            ApiOutcome::ApplicationError("no such table".to_string())
        );
        assert_eq!(
            outcome(json!({"ERROR": {"code": 7}})),
            ApiOutcome::ApplicationError(r#"{"code":7}"#.to_string())
        );
    }

    #[test]
    fn test_error_outcome_with_truthy_result_stays_cacheable() {
        let resp = ApiResponse::from_value(json!({"result": 5, "error": "warn"}));
        assert_eq!(
            resp.outcome(),
            &ApiOutcome::ApplicationError("warn".to_string())
        );
        assert!(resp.is_cacheable());

        let resp = ApiResponse::from_value(json!({"result": null, "error": "failed"}));
        assert!(!resp.is_cacheable());
    }

    #[test]
    fn test_null_error_field_is_ignored() {
        assert_eq!(
            outcome(json!({"result": "ok", "error": null})),
            ApiOutcome::Success(json!("ok"))
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(outcome(json!({})), ApiOutcome::Empty);
        assert_eq!(outcome(json!([1, 2])), ApiOutcome::Empty);
        assert_eq!(outcome(Value::Null), ApiOutcome::Empty);
        assert!(!ApiResponse::from_value(json!([1, 2])).is_cacheable());
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-0.5)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(false)));
    }
}
