use actix_web::{HttpResponse, Responder};
use common::model::table::TableId;
use common::requests::TemplateSummary;

fn summaries() -> Vec<TemplateSummary> {
    TableId::ALL
        .into_iter()
        .map(|table| TemplateSummary {
            table_name: table,
            headers: table
                .template()
                .headers
                .iter()
                .map(|h| h.to_string())
                .collect(),
        })
        .collect()
}

/// Actix web handler for the `GET /api/templates` endpoint.
///
/// # Returns
/// - `200 OK` with a JSON array of every table name and its headers.
pub async fn process() -> impl Responder {
    HttpResponse::Ok().json(summaries())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_table_once() {
        let list = summaries();
        assert_eq!(list.len(), TableId::ALL.len());
        assert_eq!(list[0].table_name, TableId::Student);
        assert_eq!(list[0].headers[0], "rollno");
        assert!(list.iter().all(|s| !s.headers.is_empty()));
    }
}
