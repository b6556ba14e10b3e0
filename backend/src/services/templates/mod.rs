//! # Template Service Module
//!
//! Serves the CSV template catalog so tools other than the dashboard can
//! fetch the expected column layout of every upload target.
//!
//! ## Sub-modules:
//! - `list`: the catalog as JSON.
//! - `get`: one template as a downloadable CSV file.

mod get;
mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;
use common::requests::TEMPLATES_PATH;

/// Configures and returns the Actix `Scope` for the template routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns every upload target with its required headers,
///       as a JSON array of `TemplateSummary`.
///
/// *   **`GET /{table_name}`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the header row and sample row of one table as
///       `{table_name}_template.csv`. Unknown tables answer `404` with a JSON
///       `{ "message": ... }` body.
pub fn configure_routes() -> Scope {
    scope(TEMPLATES_PATH)
        .route("", get().to(list::process))
        .route("/", get().to(list::process))
        .route("/{table_name}", get().to(get::process))
}
