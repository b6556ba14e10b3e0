//! Wire contract shared by the upload client and the upload receiver.

use crate::model::table::TableId;
use serde::{Deserialize, Serialize};

/// Endpoint receiving multipart CSV uploads.
pub const UPLOAD_PATH: &str = "/api/upload-csv";
/// Base path of the template endpoints.
pub const TEMPLATES_PATH: &str = "/api/templates";

/// Multipart field carrying the destination table name.
pub const TABLE_NAME_FIELD: &str = "table_name";
/// Multipart field carrying the raw CSV file.
pub const CSV_FILE_FIELD: &str = "csv_file";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Extracts the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Entry of `GET /api/templates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub table_name: TableId,
    pub headers: Vec<String>,
}
