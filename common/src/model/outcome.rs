use serde::{Deserialize, Serialize};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Upload successful!";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred during upload.";

/// JSON body returned by `POST /api/upload-csv`, for both success and error statuses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl UploadResponseBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            details: Some(details.into()),
        }
    }

    /// Lenient parse: bodies that are not the expected JSON object carry no fields.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Success,
    Error,
}

/// Result of one upload attempt, as displayed in the upload modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub kind: OutcomeKind,
    pub text: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl UploadOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }

    /// Maps an HTTP response (status + raw body) to an outcome.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = UploadResponseBody::parse(body);
        if (200..300).contains(&status) {
            let text = non_empty(body.message).unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
            return Self::success(text);
        }
        Self::failure(
            body.message,
            Some(format!("Request failed with status code {}", status)),
            body.details,
        )
    }

    /// Maps a request that never produced a response (network failure).
    pub fn from_transport_error(error_text: &str) -> Self {
        Self::failure(None, Some(error_text.to_string()), None)
    }

    /// Message priority: server message, transport text, generic fallback.
    /// Server details are appended as `"<message> (<details>)"`.
    fn failure(
        server_message: Option<String>,
        transport_text: Option<String>,
        details: Option<String>,
    ) -> Self {
        let message = non_empty(server_message)
            .or_else(|| non_empty(transport_text))
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        match non_empty(details) {
            Some(details) => Self::error(format!("{} ({})", message, details)),
            None => Self::error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_uses_server_message() {
        assert_eq!(
            UploadOutcome::from_response(200, r#"{"message":"OK"}"#),
            UploadOutcome::success("OK")
        );
    }

    #[test]
    fn success_without_message_uses_default() {
        for body in ["{}", "", "not json", r#"{"message":""}"#] {
            assert_eq!(
                UploadOutcome::from_response(201, body),
                UploadOutcome::success(DEFAULT_SUCCESS_MESSAGE)
            );
        }
    }

    #[test]
    fn error_details_are_appended() {
        assert_eq!(
            UploadOutcome::from_response(400, r#"{"message":"Bad row","details":"row 3"}"#),
            UploadOutcome::error("Bad row (row 3)")
        );
    }

    #[test]
    fn error_without_server_message_uses_status_text() {
        let outcome = UploadOutcome::from_response(500, "<html>oops</html>");
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert_eq!(outcome.text, "Request failed with status code 500");
    }

    #[test]
    fn details_attach_to_fallback_message() {
        assert_eq!(
            UploadOutcome::from_response(409, r#"{"details":"rollno 12"}"#).text,
            "Request failed with status code 409 (rollno 12)"
        );
    }

    #[test]
    fn transport_errors_fall_back_to_generic_text() {
        assert_eq!(
            UploadOutcome::from_transport_error("Network Error"),
            UploadOutcome::error("Network Error")
        );
        assert_eq!(
            UploadOutcome::from_transport_error(""),
            UploadOutcome::error(DEFAULT_ERROR_MESSAGE)
        );
    }

    #[test]
    fn body_serializes_without_absent_fields() {
        let json = serde_json::to_string(&UploadResponseBody::message("done")).unwrap();
        assert_eq!(json, r#"{"message":"done"}"#);
    }
}
