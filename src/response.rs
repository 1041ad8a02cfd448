//! Response envelope decoding
//!
//! Every BaseSpace payload arrives wrapped:
//!
//! ```text
//! { "Response": { ... }, "ResponseStatus": { ... }, "Notifications": [ ... ] }
//! ```
//!
//! [`decode_response`] is the seam between a raw HTTP result and the typed model.
//! A failed call always becomes a [`BaseSpaceError`]; it is never turned into an
//! empty [`PropertyContainer`](basespace_types::PropertyContainer).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BaseSpaceError, ResponseStatus, Result};

/// Wrapped response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope<T> {
    #[serde(default = "Option::default")]
    pub response: Option<T>,
    #[serde(default)]
    pub response_status: Option<ResponseStatus>,
    /// Server notices; shape varies, kept as JSON
    #[serde(default)]
    pub notifications: Vec<serde_json::Value>,
}

/// Decode the body of a completed call.
///
/// Non-2xx statuses become [`BaseSpaceError::Api`]; a 2xx body without a
/// `Response` member is [`BaseSpaceError::MissingResponse`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        let err = BaseSpaceError::from_response(status, body);
        debug!(status, error = %err, "BaseSpace call failed");
        return Err(err);
    }

    let envelope: ResponseEnvelope<T> = serde_json::from_str(body)?;
    if !envelope.notifications.is_empty() {
        debug!(count = envelope.notifications.len(), "response carried notifications");
    }
    envelope.response.ok_or(BaseSpaceError::MissingResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use basespace_types::PropertyContainer;

    #[test]
    fn decodes_property_container_envelope() {
        let body = r#"{
            "Response": {
                "Items": [{"Type": "string", "Name": "BarcodeId", "Content": "7"}],
                "DisplayedCount": 1,
                "TotalCount": 1
            },
            "ResponseStatus": {},
            "Notifications": []
        }"#;

        let container: PropertyContainer = decode_response(200, body).unwrap();
        assert_eq!(container.len(), 1);
        assert!(!container.is_truncated());
    }

    #[test]
    fn error_status_is_not_an_empty_container() {
        let body = r#"{"ResponseStatus":{"ErrorCode":"BASESPACE.UNAUTHORIZED","Message":"Bad token"}}"#;
        let err = decode_response::<PropertyContainer>(401, body).unwrap_err();

        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn missing_response_is_reported() {
        let err = decode_response::<PropertyContainer>(200, r#"{"ResponseStatus":{}}"#).unwrap_err();
        assert!(matches!(err, BaseSpaceError::MissingResponse));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_response::<PropertyContainer>(200, "{not json").unwrap_err();
        assert!(matches!(err, BaseSpaceError::Decode(_)));
    }
}
