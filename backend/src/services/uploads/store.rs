//! SQLite persistence for accepted uploads.
//!
//! Each upload target gets a table named after its `TableId`, with one TEXT
//! column per catalog header and a UNIQUE constraint over the catalog's unique
//! key. Rows are upserted on that key; tables without a key are appended to.
//! Every accepted file is also recorded in the `uploads` ledger.
//!
//! Two tables reference rows of other tables. `uba_events` rows name a
//! project that must already exist in `uba_projects`, and `nptel_enrollments`
//! rows name a course offering that must already exist in `nptel_courses`.
//! Those references are checked inside the same transaction as the write.

use super::validate::ValidatedBatch;
use crate::error::UploadError;
use common::model::table::TableId;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Transaction};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const LEDGER_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS uploads (
    id TEXT PRIMARY KEY,
    table_name TEXT NOT NULL,
    file_name TEXT NOT NULL,
    md5 TEXT NOT NULL,
    row_count INTEGER NOT NULL,
    uploaded_at INTEGER NOT NULL
)";

fn quoted(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_table_sql(table: TableId) -> String {
    let definition = table.template();
    let columns = definition
        .headers
        .iter()
        .map(|c| format!("\"{}\" TEXT", c))
        .collect::<Vec<_>>()
        .join(", ");
    if definition.unique_key.is_empty() {
        format!("CREATE TABLE IF NOT EXISTS \"{}\" ({})", table, columns)
    } else {
        format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({}, UNIQUE ({}))",
            table,
            columns,
            quoted(definition.unique_key)
        )
    }
}

fn upsert_sql(table: TableId) -> String {
    let definition = table.template();
    let placeholders = (1..=definition.headers.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let insert = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        quoted(definition.headers),
        placeholders
    );
    if definition.unique_key.is_empty() {
        return insert;
    }

    let updates: Vec<String> = definition
        .headers
        .iter()
        .filter(|c| !definition.unique_key.contains(*c))
        .map(|c| format!("\"{0}\" = excluded.\"{0}\"", c))
        .collect();
    let action = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };
    format!(
        "{} ON CONFLICT ({}) {}",
        insert,
        quoted(definition.unique_key),
        action
    )
}

fn column_index(batch: &ValidatedBatch, column: &str) -> Result<usize, UploadError> {
    batch
        .columns
        .iter()
        .position(|c| *c == column)
        .ok_or_else(|| UploadError::Internal(format!("column '{}' missing from batch", column)))
}

/// Every `project_title` of an event batch must name an existing project.
///
/// Titles compare case-insensitively. Rows with a blank title are not looked up.
fn check_projects(tx: &Transaction, batch: &ValidatedBatch) -> Result<(), UploadError> {
    let title = column_index(batch, "project_title")?;
    let mut titles: Vec<&str> = Vec::new();
    for row in &batch.rows {
        if let Some(value) = row[title].as_deref() {
            if !titles.iter().any(|t| t.eq_ignore_ascii_case(value)) {
                titles.push(value);
            }
        }
    }
    if titles.is_empty() {
        return Err(UploadError::NoLookupValues("project_title"));
    }

    tx.execute_batch(&create_table_sql(TableId::UbaProjects))?;
    let mut stmt = tx.prepare(
        "SELECT 1 FROM \"uba_projects\" WHERE LOWER(\"project_title\") = LOWER(?1) LIMIT 1",
    )?;
    let mut missing = Vec::new();
    for t in titles {
        if !stmt.exists(params![t])? {
            missing.push(t.to_string());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(UploadError::ProjectLookup(missing))
    }
}

/// Every enrollment must match a course offering on code, year and semester.
fn check_courses(tx: &Transaction, batch: &ValidatedBatch) -> Result<(), UploadError> {
    let code = column_index(batch, "course_code")?;
    let year = column_index(batch, "enrollment_year")?;
    let semester = column_index(batch, "enrollment_semester")?;

    let mut offerings: Vec<(&str, &str, Option<&str>)> = Vec::new();
    for row in &batch.rows {
        if let (Some(c), Some(y)) = (row[code].as_deref(), row[year].as_deref()) {
            let offering = (c, y, row[semester].as_deref());
            if !offerings.contains(&offering) {
                offerings.push(offering);
            }
        }
    }
    if offerings.is_empty() {
        return Err(UploadError::NoLookupValues("course_code/year"));
    }

    tx.execute_batch(&create_table_sql(TableId::NptelCourses))?;
    let mut stmt = tx.prepare(
        "SELECT 1 FROM \"nptel_courses\"
         WHERE \"course_code\" = ?1 AND \"offering_year\" = ?2 AND \"offering_semester\" IS ?3
         LIMIT 1",
    )?;
    let mut missing = Vec::new();
    for (c, y, s) in offerings {
        if !stmt.exists(params![c, y, s])? {
            missing.push(format!("{} ({} {})", c, y, s.unwrap_or_default()));
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(UploadError::CourseLookup(missing))
    }
}

fn check_references(tx: &Transaction, batch: &ValidatedBatch) -> Result<(), UploadError> {
    match batch.table {
        TableId::UbaEvents => check_projects(tx, batch),
        TableId::NptelEnrollments => check_courses(tx, batch),
        _ => Ok(()),
    }
}

pub struct UploadStore {
    db_path: PathBuf,
}

impl UploadStore {
    /// Opens the upload database, creating the file and its ledger if needed.
    ///
    /// # Arguments
    /// * `db_path` - Path of the SQLite file.
    ///
    /// # Returns
    /// - `Ok(UploadStore)` once the `uploads` ledger exists.
    /// - `Err(rusqlite::Error)` if the file cannot be opened or the ledger created.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, rusqlite::Error> {
        let store = Self {
            db_path: db_path.into(),
        };
        store.connect()?.execute_batch(LEDGER_SCHEMA)?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Looks up the MD5 of the most recent accepted upload for a table.
    ///
    /// # Arguments
    /// * `table` - The upload target to look up in the ledger.
    ///
    /// # Returns
    /// - `Ok(Some(md5))` for the latest ledger entry of `table`.
    /// - `Ok(None)` if nothing was ever accepted for it.
    pub fn last_md5(&self, table: TableId) -> Result<Option<String>, rusqlite::Error> {
        self.connect()?
            .query_row(
                "SELECT md5 FROM uploads WHERE table_name = ?1 ORDER BY uploaded_at DESC, rowid DESC LIMIT 1",
                params![table.as_str()],
                |row| row.get(0),
            )
            .optional()
    }

    /// Writes a validated batch and its ledger entry in one transaction.
    ///
    /// The target table is created on first use. Keyed tables are upserted on
    /// their unique key; keyless tables are appended to. Cross-table references
    /// are checked before any row is written, and any failure rolls the whole
    /// batch back.
    ///
    /// # Arguments
    /// * `batch` - Rows already checked by `validate_csv`.
    /// * `file_name` - Client-side name of the uploaded file, kept in the ledger.
    /// * `md5` - Hex digest of the uploaded bytes, kept in the ledger.
    ///
    /// # Returns
    /// - `Ok(count)` with the number of rows written.
    /// - `Err(UploadError::ProjectLookup | CourseLookup)` if a referenced row is missing.
    /// - `Err(UploadError::Database)` on any SQLite failure.
    pub fn apply(
        &self,
        batch: &ValidatedBatch,
        file_name: &str,
        md5: &str,
    ) -> Result<usize, UploadError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute_batch(&create_table_sql(batch.table))?;
        check_references(&tx, batch)?;
        {
            let mut stmt = tx.prepare(&upsert_sql(batch.table))?;
            for row in &batch.rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }

        let uploaded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        tx.execute(
            "INSERT INTO uploads (id, table_name, file_name, md5, row_count, uploaded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uuid::Uuid::new_v4().to_string(),
                batch.table.as_str(),
                file_name,
                md5,
                batch.rows.len() as i64,
                uploaded_at
            ],
        )?;
        tx.commit()?;
        Ok(batch.rows.len())
    }

    #[cfg(test)]
    pub fn count_rows(&self, table: TableId) -> Result<i64, rusqlite::Error> {
        self.connect()?.query_row(
            &format!("SELECT COUNT(*) FROM \"{}\"", table),
            [],
            |row| row.get(0),
        )
    }

    #[cfg(test)]
    pub fn cell(
        &self,
        table: TableId,
        column: &str,
        key_column: &str,
        key: &str,
    ) -> Result<Option<String>, rusqlite::Error> {
        self.connect()?.query_row(
            &format!(
                "SELECT \"{}\" FROM \"{}\" WHERE \"{}\" = ?1",
                column, table, key_column
            ),
            params![key],
            |row| row.get(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::validate::validate_csv;
    use super::*;

    fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path().join("test.sqlite")).unwrap();
        (dir, store)
    }

    #[test]
    fn upsert_sql_updates_non_key_columns() {
        let sql = upsert_sql(TableId::IgrsYearwise);
        assert!(sql.starts_with("INSERT INTO \"igrs_yearwise\""));
        assert!(sql.contains("ON CONFLICT (\"grievance_year\") DO UPDATE SET"));
        assert!(sql.contains("\"grievances_pending\" = excluded.\"grievances_pending\""));
        assert!(!sql.contains("\"grievance_year\" = excluded"));
        assert!(!upsert_sql(TableId::ResearchMous).contains("ON CONFLICT"));
    }

    #[test]
    fn reupload_updates_rows_in_place() {
        let (_dir, store) = store();
        let header = "grievance_year,total_grievances_filed,grievances_resolved,grievances_pending";

        let first = validate_csv(
            TableId::IgrsYearwise,
            format!("{}\n2022,4,4,0\n2023,10,8,2", header).as_bytes(),
        )
        .unwrap();
        assert_eq!(store.apply(&first, "igrs.csv", "aaa").unwrap(), 2);

        let second = validate_csv(
            TableId::IgrsYearwise,
            format!("{}\n2023,10,10,0", header).as_bytes(),
        )
        .unwrap();
        store.apply(&second, "igrs.csv", "bbb").unwrap();

        assert_eq!(store.count_rows(TableId::IgrsYearwise).unwrap(), 2);
        assert_eq!(
            store
                .cell(TableId::IgrsYearwise, "grievances_pending", "grievance_year", "2023")
                .unwrap()
                .as_deref(),
            Some("0")
        );
        assert_eq!(
            store.last_md5(TableId::IgrsYearwise).unwrap().as_deref(),
            Some("bbb")
        );
        assert_eq!(store.last_md5(TableId::Student).unwrap(), None);
    }

    #[test]
    fn keyless_tables_append() {
        let (_dir, store) = store();
        let csv = "partner_name,collaboration_nature,date_signed,validity_end,remarks\nTech Corp,Joint Research,2023-05-15,2026-05-15,";
        let batch = validate_csv(TableId::ResearchMous, csv.as_bytes()).unwrap();
        store.apply(&batch, "mous.csv", "x").unwrap();
        store.apply(&batch, "mous.csv", "x").unwrap();
        assert_eq!(store.count_rows(TableId::ResearchMous).unwrap(), 2);
    }

    const EVENTS_HEADER: &str =
        "project_title,event_title,event_type,event_date,location,description,photos_url,brochure_url";

    #[test]
    fn events_need_an_existing_project() {
        let (_dir, store) = store();
        let events = validate_csv(
            TableId::UbaEvents,
            format!(
                "{}\nwater conservation,Awareness Camp,Workshop,2023-03-22,Village Hall,,,\nSolar Village,Survey,Visit,2023-04-02,,,,",
                EVENTS_HEADER
            )
            .as_bytes(),
        )
        .unwrap();

        let err = store.apply(&events, "events.csv", "e1").unwrap_err();
        match err {
            UploadError::ProjectLookup(missing) => {
                assert_eq!(missing, vec!["water conservation", "Solar Village"])
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.last_md5(TableId::UbaEvents).unwrap(), None);

        let projects = validate_csv(
            TableId::UbaProjects,
            "project_title,coordinator_name,project_status,start_date,end_date,intervention_description,collaboration_partners\n\
             Water Conservation,Dr. Green,Ongoing,2023-01-01,,,\n\
             Solar Village,Dr. Sun,Ongoing,2023-02-01,,,"
                .as_bytes(),
        )
        .unwrap();
        store.apply(&projects, "projects.csv", "p1").unwrap();

        assert_eq!(store.apply(&events, "events.csv", "e1").unwrap(), 2);
        assert_eq!(store.count_rows(TableId::UbaEvents).unwrap(), 2);
    }

    #[test]
    fn events_without_any_project_title_are_rejected() {
        let (_dir, store) = store();
        let events = validate_csv(
            TableId::UbaEvents,
            format!("{}\n,Awareness Camp,Workshop,2023-03-22,,,,", EVENTS_HEADER).as_bytes(),
        )
        .unwrap();
        assert!(matches!(
            store.apply(&events, "events.csv", "e1"),
            Err(UploadError::NoLookupValues("project_title"))
        ));
    }

    #[test]
    fn enrollments_need_a_matching_course_offering() {
        let (_dir, store) = store();
        let enrollments = validate_csv(
            TableId::NptelEnrollments,
            "enrollment_year,course_code,student_name,enrollment_semester,certification_earned,certification_date\n\
             2023,NPTEL123,John Doe,Spring,yes,2023-05-20"
                .as_bytes(),
        )
        .unwrap();

        let err = store.apply(&enrollments, "enrollments.csv", "n1").unwrap_err();
        match err {
            UploadError::CourseLookup(missing) => {
                assert_eq!(missing, vec!["NPTEL123 (2023 Spring)"])
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let header = "course_code,course_title,course_category,offering_semester,offering_year";
        let autumn = validate_csv(
            TableId::NptelCourses,
            format!("{}\nNPTEL123,Data Structures,Engineering,Autumn,2023", header).as_bytes(),
        )
        .unwrap();
        store.apply(&autumn, "courses.csv", "c1").unwrap();
        assert!(matches!(
            store.apply(&enrollments, "enrollments.csv", "n1"),
            Err(UploadError::CourseLookup(_))
        ));

        let spring = validate_csv(
            TableId::NptelCourses,
            format!("{}\nNPTEL123,Data Structures,Engineering,Spring,2023", header).as_bytes(),
        )
        .unwrap();
        store.apply(&spring, "courses.csv", "c2").unwrap();
        assert_eq!(store.apply(&enrollments, "enrollments.csv", "n1").unwrap(), 1);
        assert_eq!(
            store.last_md5(TableId::NptelEnrollments).unwrap().as_deref(),
            Some("n1")
        );
    }
}
