//! # Template Download
//!
//! Backend counterpart of the modal's "Download CSV Template" button: the same
//! header and sample rows, produced by `common::model::template`, served as a
//! file attachment for `GET /api/templates/{table_name}`.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use common::model::outcome::UploadResponseBody;
use common::model::template::{template_csv, template_file_name, TEMPLATE_MIME};
use log::debug;

/// Actix web handler for the `GET /api/templates/{table_name}` endpoint.
///
/// # Arguments
/// * `table_name` - Catalog name of the table, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the header and sample row as a CSV attachment.
/// - `404 Not Found` with a JSON `message` for a table outside the catalog.
pub async fn process(table_name: web::Path<String>) -> impl Responder {
    let table_name = table_name.into_inner();
    match template_csv(&table_name) {
        Some(csv) => {
            debug!("Serving template for '{}'", table_name);
            HttpResponse::Ok()
                .content_type(TEMPLATE_MIME.trim_end_matches(';'))
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(template_file_name(&table_name))],
                })
                .body(csv)
        }
        None => HttpResponse::NotFound().json(UploadResponseBody::message(format!(
            "No template for table '{}'.",
            table_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test as actix_test;
    use actix_web::App;

    #[actix_web::test]
    async fn serves_the_template_as_an_attachment() {
        let app = actix_test::init_service(App::new().service(super::super::configure_routes())).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/templates/igrs_yearwise")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.contains("igrs_yearwise_template.csv"));

        let body = actix_test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("grievance_year,total_grievances_filed"));
        assert_eq!(text.lines().count(), 2);
    }

    #[actix_web::test]
    async fn unknown_tables_are_not_found() {
        let app = actix_test::init_service(App::new().service(super::super::configure_routes())).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/templates/users")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: UploadResponseBody = actix_test::read_body_json(resp).await;
        assert_eq!(body.message.as_deref(), Some("No template for table 'users'."));
    }
}
