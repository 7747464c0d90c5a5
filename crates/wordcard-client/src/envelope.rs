//! Decoding of the `{type, payload}` response envelope.
//!
//! Every failure is reported as an [`ApiFailure`] carrying a message that
//! can be shown to the user as-is.

use serde_json::Value;

use wordcard_core::error::ApiFailure;

use crate::schema::Schema;

pub const CONNECTION_PROBLEM: &str = "connection problem, please retry";
pub const NOT_JSON: &str = "response is not JSON";
pub const MALFORMED_RESPONSE: &str = "malformed response";
pub const VALIDATION_FAILED: &str = "payload validation failed";
pub const REQUEST_FAILED: &str = "request failed";

/// Decode a response body into `T`.
///
/// `ok` is whether the HTTP status was 2xx.
pub fn decode<T: Schema>(ok: bool, body: &[u8]) -> Result<T, ApiFailure> {
    if !ok {
        return Err(ApiFailure::error(CONNECTION_PROBLEM));
    }

    let data: Value =
        serde_json::from_slice(body).map_err(|_| ApiFailure::error(NOT_JSON))?;

    let (kind, payload) = match &data {
        Value::Object(map) => match (map.get("type"), map.get("payload")) {
            (Some(kind), Some(payload)) => (kind, payload),
            _ => return Err(ApiFailure::error(MALFORMED_RESPONSE)),
        },
        _ => return Err(ApiFailure::error(MALFORMED_RESPONSE)),
    };

    if kind.as_str() == Some("Success") {
        let value = T::deserialize(payload).map_err(|e| {
            tracing::warn!("payload does not match schema: {e}");
            ApiFailure::error(VALIDATION_FAILED)
        })?;
        value.validate().map_err(|e| {
            tracing::warn!("payload failed validation: {e}");
            ApiFailure::error(VALIDATION_FAILED)
        })?;
        return Ok(value);
    }

    Err(server_failure(kind, payload))
}

/// A non-success envelope keeps the server's message when it has one.
fn server_failure(kind: &Value, payload: &Value) -> ApiFailure {
    let message = payload.get("message").and_then(Value::as_str);
    match (kind.as_str(), message) {
        (Some(_), Some(message)) => ApiFailure::error(message),
        _ => ApiFailure::error(REQUEST_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wordcard_core::model::StudyDeck;

    fn body(v: Value) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    #[test]
    fn success_payload_decodes() {
        let count: u64 = decode(true, &body(json!({"type": "Success", "payload": 3}))).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn error_mapping() {
        let err = decode::<u64>(false, b"{}").unwrap_err();
        assert_eq!(err.message(), CONNECTION_PROBLEM);

        let err = decode::<u64>(true, b"<html>").unwrap_err();
        assert_eq!(err.message(), NOT_JSON);

        let err = decode::<u64>(true, &body(json!({"payload": 1}))).unwrap_err();
        assert_eq!(err.message(), MALFORMED_RESPONSE);

        let err = decode::<u64>(true, &body(json!([1, 2]))).unwrap_err();
        assert_eq!(err.message(), MALFORMED_RESPONSE);

        let err = decode::<u64>(true, &body(json!({"type": "Success", "payload": "x"}))).unwrap_err();
        assert_eq!(err.message(), VALIDATION_FAILED);

        let err = decode::<u64>(
            true,
            &body(json!({"type": "Error", "payload": {"message": "word set not found"}})),
        )
        .unwrap_err();
        assert_eq!(err.message(), "word set not found");
        assert!(!err.is_abort());

        let err = decode::<u64>(true, &body(json!({"type": "Error", "payload": {}}))).unwrap_err();
        assert_eq!(err.message(), REQUEST_FAILED);
    }

    #[test]
    fn schema_validation_runs_after_decoding() {
        let word = json!({
            "id": "w", "order": 1, "vocabulary": "a", "definition": "b",
            "vocabularySound": "en-US", "definitionSound": "zh-TW", "star": false
        });
        let payload = json!({"id": "d", "title": "t", "words": [word.clone(), word], "shouldSwap": false});
        let err = decode::<StudyDeck>(true, &body(json!({"type": "Success", "payload": payload})))
            .unwrap_err();
        assert_eq!(err.message(), VALIDATION_FAILED);
    }
}
