//! Receives CSV uploads from the dashboard's upload modal.
//!
//! `POST /api/upload-csv` takes a multipart form with a `table_name` field and
//! a `csv_file` part, plus a bearer token. The file is validated against the
//! template catalog of the target table and its rows are upserted into the
//! SQLite store on the table's unique key. Every response carries a JSON
//! `{ "message": ..., "details": ... }` body the client renders as is.
//!
//! - `upload`: the handler, multipart reading and field checks.
//! - `validate`: header matching, row checks, normalization and dedupe.
//! - `store`: table creation, upserts and the `uploads` ledger.

use actix_web::web::{post, resource};
use actix_web::Resource;
use common::requests::UPLOAD_PATH;

mod store;
mod upload;
mod validate;

pub use store::UploadStore;

pub fn configure_routes() -> Resource {
    resource(UPLOAD_PATH).route(post().to(upload::process))
}
