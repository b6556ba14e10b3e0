//! Upload client: sends the originally selected file as a tagged multipart
//! request and turns whatever comes back into an [`UploadOutcome`].
//!
//! The HTTP plumbing sits behind [`UploadTransport`] so the same client runs
//! over `gloo-net` in the browser and over a recording spy in tests.

use crate::model::outcome::UploadOutcome;
use crate::requests::{bearer, UPLOAD_PATH};
use crate::session::AuthSession;

/// Everything a transport needs to build the multipart request.
#[derive(Debug)]
pub struct UploadRequest<'a, F> {
    pub endpoint: &'a str,
    /// Sent as the `table_name` form field.
    pub table_name: &'a str,
    /// Sent untouched as the `csv_file` form field.
    pub file: &'a F,
    /// Full `Authorization` header value.
    pub authorization: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

#[allow(async_fn_in_trait)]
pub trait UploadTransport {
    type File;

    async fn send(
        &self,
        request: UploadRequest<'_, Self::File>,
    ) -> Result<TransportResponse, TransportError>;
}

pub struct UploadClient<T> {
    transport: T,
    endpoint: String,
}

impl<T: UploadTransport> UploadClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_endpoint(transport, UPLOAD_PATH)
    }

    pub fn with_endpoint(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Uploads `file` to `table_name`, exactly one attempt.
    ///
    /// Returns `None` without sending anything when there is no file or the
    /// session has no token; callers are expected to disable the action instead.
    pub async fn upload(
        &self,
        file: Option<&T::File>,
        table_name: &str,
        session: &AuthSession,
    ) -> Option<UploadOutcome> {
        let file = file?;
        let token = session.token()?;

        let request = UploadRequest {
            endpoint: &self.endpoint,
            table_name,
            file,
            authorization: bearer(token),
        };

        let outcome = match self.transport.send(request).await {
            Ok(response) => UploadOutcome::from_response(response.status, &response.body),
            Err(TransportError(text)) => UploadOutcome::from_transport_error(&text),
        };
        Some(outcome)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::SpyTransport;
    use super::*;
    use crate::model::outcome::{OutcomeKind, DEFAULT_ERROR_MESSAGE};

    fn signed_in() -> AuthSession {
        AuthSession::from_token(Some("token-1".to_string()))
    }

    #[tokio::test]
    async fn missing_file_sends_nothing() {
        let client = UploadClient::new(SpyTransport::replying(200, "{}"));
        let outcome = client.upload(None, "student", &signed_in()).await;
        assert_eq!(outcome, None);
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn missing_token_sends_nothing() {
        let client = UploadClient::new(SpyTransport::replying(200, "{}"));
        let file = "rollno\n1".to_string();
        let outcome = client.upload(Some(&file), "student", &AuthSession::new()).await;
        assert_eq!(outcome, None);
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn request_carries_table_file_and_bearer() {
        let client = UploadClient::new(SpyTransport::replying(200, r#"{"message":"OK"}"#));
        let file = "rollno,name\n1,A".to_string();
        let outcome = client.upload(Some(&file), "student", &signed_in()).await;

        assert_eq!(outcome, Some(UploadOutcome::success("OK")));
        let requests = client.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, "/api/upload-csv");
        assert_eq!(requests[0].table_name, "student");
        assert_eq!(requests[0].file, file);
        assert_eq!(requests[0].authorization, "Bearer token-1");
    }

    #[tokio::test]
    async fn success_without_message_uses_default() {
        let client = UploadClient::new(SpyTransport::replying(200, "{}"));
        let file = String::from("x");
        let outcome = client.upload(Some(&file), "student", &signed_in()).await.unwrap();
        assert_eq!(outcome, UploadOutcome::success("Upload successful!"));
    }

    #[tokio::test]
    async fn server_error_with_details() {
        let client = UploadClient::new(SpyTransport::replying(
            400,
            r#"{"message":"Bad row","details":"row 3"}"#,
        ));
        let file = String::from("x");
        let outcome = client.upload(Some(&file), "student", &signed_in()).await.unwrap();
        assert_eq!(outcome, UploadOutcome::error("Bad row (row 3)"));
    }

    #[tokio::test]
    async fn network_failure_is_an_error_outcome() {
        let client = UploadClient::new(SpyTransport::failing(""));
        let file = String::from("x");
        let outcome = client.upload(Some(&file), "student", &signed_in()).await.unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert_eq!(outcome.text, DEFAULT_ERROR_MESSAGE);
        assert_eq!(client.transport().calls(), 1);
    }
}
