//! Errors of the upload pipeline and their HTTP mapping.
//!
//! Every variant renders as a JSON `UploadResponseBody`: the `Display` text
//! becomes `message` and, where there is more to say, `details` carries the
//! specifics the client appends in parentheses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::outcome::UploadResponseBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Authorization token is missing.")]
    MissingToken,
    #[error("Authorization token is invalid.")]
    InvalidToken,
    #[error("Malformed multipart request.")]
    Multipart(String),
    #[error("No table_name specified.")]
    MissingTableName,
    #[error("No csv_file part in request.")]
    MissingFile,
    #[error("No file selected.")]
    NoFileSelected,
    #[error("Only one csv_file part is allowed.")]
    DuplicateFilePart,
    #[error("Updating table '{0}' is not allowed.")]
    TableNotAllowed(String),
    #[error("File is not a CSV.")]
    NotCsv,
    #[error("Uploaded file is too large.")]
    TooLarge { limit: usize },
    #[error("CSV file is not valid UTF-8.")]
    NotUtf8,
    #[error("CSV file is empty or headers are missing.")]
    MissingHeaders,
    #[error("CSV header cells must not be empty.")]
    EmptyHeaderCell { position: usize },
    #[error("CSV header cells must contain only letters, digits, spaces, '-' or '_'.")]
    InvalidHeaderCell(String),
    #[error("Column mismatch: CSV is missing required columns.")]
    MissingColumns(Vec<String>),
    #[error("Column mismatch: CSV contains columns that do not exist in the table.")]
    UnexpectedColumns(Vec<String>),
    #[error("Malformed CSV.")]
    MalformedCsv(#[from] csv::Error),
    #[error("Validation Error on Row {row}: expected {expected} columns, found {found}.")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Validation Error on Row {row}: Column '{column}' cannot be empty.")]
    EmptyKey { row: usize, column: String },
    #[error("CSV file contains no data rows.")]
    NoDataRows,
    #[error("No {0} found in CSV rows.")]
    NoLookupValues(&'static str),
    #[error("Project Lookup Failed")]
    ProjectLookup(Vec<String>),
    #[error("Course Lookup Failed")]
    CourseLookup(Vec<String>),
    #[error("Database error.")]
    Database(#[from] rusqlite::Error),
    #[error("Upload could not be processed.")]
    Internal(String),
}

impl UploadError {
    pub fn details(&self) -> Option<String> {
        match self {
            UploadError::Multipart(reason) => Some(reason.clone()),
            UploadError::TooLarge { limit } => Some(format!("limit is {} bytes", limit)),
            UploadError::EmptyHeaderCell { position } => {
                Some(format!("header cell {} is empty", position))
            }
            UploadError::InvalidHeaderCell(cell) => Some(format!("invalid header '{}'", cell)),
            UploadError::MissingColumns(columns) => Some(format!("missing: {}", columns.join(", "))),
            UploadError::UnexpectedColumns(columns) => {
                Some(format!("unexpected: {}", columns.join(", ")))
            }
            UploadError::MalformedCsv(err) => Some(err.to_string()),
            UploadError::ProjectLookup(titles) => Some(format!(
                "The following project titles were not found in the database: {}. Please ensure strings match exactly.",
                titles.join(", ")
            )),
            UploadError::CourseLookup(courses) => Some(format!(
                "Could not find course_id for: {}... Ensure NPTEL Courses are uploaded first.",
                courses.iter().take(5).cloned().collect::<Vec<_>>().join(", ")
            )),
            UploadError::Database(err) => Some(err.to_string()),
            UploadError::Internal(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn body(&self) -> UploadResponseBody {
        UploadResponseBody {
            message: Some(self.to_string()),
            details: self.details(),
        }
    }
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::MissingToken | UploadError::InvalidToken => StatusCode::UNAUTHORIZED,
            UploadError::TableNotAllowed(_) => StatusCode::FORBIDDEN,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Database(_) | UploadError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_failure_class() {
        assert_eq!(UploadError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            UploadError::TableNotAllowed("users".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(UploadError::NotCsv.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UploadError::Internal("join".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn body_carries_message_and_details() {
        let body = UploadError::MissingColumns(vec!["rollno".into(), "name".into()]).body();
        assert_eq!(
            body.message.as_deref(),
            Some("Column mismatch: CSV is missing required columns.")
        );
        assert_eq!(body.details.as_deref(), Some("missing: rollno, name"));

        let body = UploadError::EmptyKey {
            row: 3,
            column: "rollno".into(),
        }
        .body();
        assert_eq!(
            body.message.as_deref(),
            Some("Validation Error on Row 3: Column 'rollno' cannot be empty.")
        );
        assert_eq!(body.details, None);
    }

    #[test]
    fn course_lookup_lists_at_most_five_courses() {
        let missing = (1..=7).map(|i| format!("NPTEL{} (2023 Spring)", i)).collect();
        let body = UploadError::CourseLookup(missing).body();
        assert_eq!(body.message.as_deref(), Some("Course Lookup Failed"));
        assert_eq!(
            body.details.as_deref(),
            Some("Could not find course_id for: NPTEL1 (2023 Spring), NPTEL2 (2023 Spring), NPTEL3 (2023 Spring), NPTEL4 (2023 Spring), NPTEL5 (2023 Spring)... Ensure NPTEL Courses are uploaded first.")
        );
    }
}
