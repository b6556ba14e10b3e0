use super::store::UploadStore;
use super::validate::validate_csv;
use crate::config::ServerConfig;
use crate::error::UploadError;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use common::model::outcome::UploadResponseBody;
use common::model::table::TableId;
use common::requests::{parse_bearer, AUTHORIZATION_HEADER, CSV_FILE_FIELD, TABLE_NAME_FIELD};
use futures_util::StreamExt;
use log::{info, warn};
use md5::Context;

/// Raw multipart form as received, before any field checks.
#[derive(Debug, Default)]
struct UploadForm {
    table_name: Option<String>,
    file_name: Option<String>,
    bytes: Vec<u8>,
    oversized: bool,
    md5: String,
}

fn authorize(req: &HttpRequest, config: &ServerConfig) -> Result<(), UploadError> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer)
        .ok_or(UploadError::MissingToken)?;
    if config.accepts_token(token) {
        Ok(())
    } else {
        Err(UploadError::InvalidToken)
    }
}

/// Reads every part of the form.
///
/// Only one `csv_file` part is accepted. The file is hashed while it streams in. Past `limit` bytes it is no longer
/// buffered, only drained, so the size check can be reported after the
/// cheaper field checks.
async fn read_form(mut payload: Multipart, limit: usize) -> Result<UploadForm, UploadError> {
    let mut form = UploadForm::default();
    let mut hasher = Context::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Multipart(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some(TABLE_NAME_FIELD) => {
                let mut value = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
                    value.extend_from_slice(&chunk);
                }
                form.table_name = Some(String::from_utf8_lossy(&value).trim().to_string());
            }
            Some(CSV_FILE_FIELD) => {
                if form.file_name.is_some() {
                    return Err(UploadError::DuplicateFilePart);
                }
                form.file_name = Some(
                    field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                        .unwrap_or_default(),
                );
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
                    if form.oversized {
                        continue;
                    }
                    if form.bytes.len() + chunk.len() > limit {
                        form.oversized = true;
                        form.bytes = Vec::new();
                        continue;
                    }
                    hasher.consume(&chunk);
                    form.bytes.extend_from_slice(&chunk);
                }
            }
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
                }
            }
        }
    }

    form.md5 = format!("{:x}", hasher.finalize());
    Ok(form)
}

/// Field checks, in the order their failures are reported.
fn check_form(form: &UploadForm, limit: usize) -> Result<(TableId, String), UploadError> {
    let requested = form
        .table_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(UploadError::MissingTableName)?;
    let file_name = form.file_name.as_deref().ok_or(UploadError::MissingFile)?;
    if file_name.is_empty() {
        return Err(UploadError::NoFileSelected);
    }
    let table = TableId::from_name_ignore_case(requested).ok_or_else(|| {
        warn!("Rejected upload into non-whitelisted table '{}'", requested);
        UploadError::TableNotAllowed(requested.to_string())
    })?;
    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(UploadError::NotCsv);
    }
    if form.oversized {
        return Err(UploadError::TooLarge { limit });
    }
    Ok((table, file_name.to_string()))
}

fn success_message(table: TableId, written: usize, duplicates_removed: usize) -> String {
    let mut message = format!("Successfully updated {} rows in '{}'.", written, table);
    if duplicates_removed > 0 {
        message.push_str(&format!(
            " Removed {} duplicate row(s) based on unique key(s): {}.",
            duplicates_removed,
            table.template().unique_key.join(", ")
        ));
    }
    message
}

/// Actix web handler for the `POST /api/upload-csv` endpoint.
///
/// Authorizes the bearer token, reads the multipart form and runs the field
/// checks. Validation and the database write then run on the blocking pool;
/// the whole file is applied in one transaction or not at all.
///
/// # Arguments
/// * `req` - The request, for its `Authorization` header.
/// * `payload` - Multipart body with a `table_name` field and one `csv_file` part.
/// * `config` - Server configuration: accepted tokens and the upload size limit.
/// * `store` - SQLite store the rows are written to.
///
/// # Returns
/// - `200 OK` with a JSON `message` naming the number of rows written.
/// - `401`, `403`, `413` or `400` with a JSON `message` (and `details` when
///   available) for rejected requests.
/// - `500 Internal Server Error` if the database write fails.
pub async fn process(
    req: HttpRequest,
    payload: Multipart,
    config: web::Data<ServerConfig>,
    store: web::Data<UploadStore>,
) -> Result<HttpResponse, UploadError> {
    authorize(&req, &config)?;
    let form = read_form(payload, config.max_upload_bytes).await?;
    let (table, file_name) = check_form(&form, config.max_upload_bytes)?;
    info!(
        "Received '{}' ({} bytes, md5 {}) for table '{}'",
        file_name,
        form.bytes.len(),
        form.md5,
        table
    );

    let UploadForm { bytes, md5, .. } = form;
    let (written, duplicates_removed) = web::block(move || -> Result<(usize, usize), UploadError> {
        let batch = validate_csv(table, &bytes)?;
        if store.last_md5(table)?.as_deref() == Some(md5.as_str()) {
            info!("'{}' is identical to the last upload into '{}'", file_name, table);
        }
        let written = store.apply(&batch, &file_name, &md5)?;
        Ok((written, batch.duplicates_removed))
    })
    .await
    .map_err(|e| UploadError::Internal(e.to_string()))??;

    info!("Upserted {} rows into '{}'", written, table);
    Ok(HttpResponse::Ok().json(UploadResponseBody::message(success_message(
        table,
        written,
        duplicates_removed,
    ))))
}
