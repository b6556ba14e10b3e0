//! Checks an uploaded CSV against the catalog layout of its table and turns it
//! into rows ready for the store.
//!
//! Unlike the client preview, parsing here goes through the `csv` crate, so
//! quoted fields containing commas are read correctly.

use crate::error::UploadError;
use common::model::table::TableId;
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;

/// Columns whose yes/no style values are stored as `TRUE`/`FALSE`.
const BOOLEAN_COLUMNS: &[&str] = &[
    "pwd",
    "is_active",
    "is_from_iitpkd",
    "pwd_exs",
    "certification_earned",
    "is_top_recruiter",
    "isactive",
];

/// Rows of one upload, in catalog column order.
#[derive(Debug)]
pub struct ValidatedBatch {
    pub table: TableId,
    pub columns: &'static [&'static str],
    /// Blank cells are `None`.
    pub rows: Vec<Vec<Option<String>>>,
    pub duplicates_removed: usize,
}

/// Validate each CSV header cell: non-empty, letters, digits, spaces, '-' or '_'.
fn validate_header_cells(headers: &[String]) -> Result<(), UploadError> {
    let header_re = Regex::new(r"^[\p{L}\p{M}\p{N}\s\-_]+$")
        .map_err(|e| UploadError::Internal(format!("Regex error: {}", e)))?;

    for (position, cell) in headers.iter().enumerate() {
        if cell.is_empty() {
            return Err(UploadError::EmptyHeaderCell {
                position: position + 1,
            });
        }
        if !header_re.is_match(cell) {
            return Err(UploadError::InvalidHeaderCell(cell.clone()));
        }
    }
    Ok(())
}

/// For every catalog column, the index of the matching CSV column (case-insensitive).
fn match_columns(table: TableId, headers: &[String]) -> Result<Vec<usize>, UploadError> {
    let expected = table.template().headers;
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let missing: Vec<String> = expected
        .iter()
        .filter(|column| !lowered.iter().any(|h| h == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(UploadError::MissingColumns(missing));
    }

    let unexpected: Vec<String> = headers
        .iter()
        .zip(&lowered)
        .filter(|(_, lower)| !expected.contains(&lower.as_str()))
        .map(|(header, _)| header.clone())
        .collect();
    if !unexpected.is_empty() {
        return Err(UploadError::UnexpectedColumns(unexpected));
    }

    Ok(expected
        .iter()
        .filter_map(|column| lowered.iter().position(|h| h == column))
        .collect())
}

fn check_record(
    row: usize,
    record: &csv::StringRecord,
    expected: usize,
    keys: &[(usize, &'static str)],
) -> Option<UploadError> {
    if record.len() != expected {
        return Some(UploadError::ColumnCount {
            row,
            expected,
            found: record.len(),
        });
    }
    keys.iter()
        .find(|(index, _)| record.get(*index).map_or(true, |cell| cell.trim().is_empty()))
        .map(|(_, column)| UploadError::EmptyKey {
            row,
            column: column.to_string(),
        })
}

fn normalize(table: TableId, column: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_lowercase();

    if BOOLEAN_COLUMNS.contains(&column) {
        match lower.as_str() {
            "yes" | "y" | "true" | "1" => return Some("TRUE".to_string()),
            "no" | "n" | "false" | "0" => return Some("FALSE".to_string()),
            _ => {}
        }
    }
    if column == "category" && lower == "general" {
        return Some("Gen".to_string());
    }
    if table == TableId::Student {
        if column == "program" {
            return Some(value.replace('.', ""));
        }
        if column == "status" && lower == "active" {
            return Some("Ongoing".to_string());
        }
    }
    Some(value.to_string())
}

/// Parses and validates `bytes` as a CSV upload for `table`.
///
/// Checks run in this order: encoding, header cells, header set against the
/// catalog, then every data row (field count, non-empty unique key cells).
/// The first failing row is reported. Rows are then normalized and
/// deduplicated on the table's unique key, keeping the first occurrence.
pub fn validate_csv(table: TableId, bytes: &[u8]) -> Result<ValidatedBatch, UploadError> {
    let text = std::str::from_utf8(bytes).map_err(|_| UploadError::NotUtf8)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(UploadError::MissingHeaders);
    }
    validate_header_cells(&headers)?;
    let column_index = match_columns(table, &headers)?;

    let definition = table.template();
    let keys: Vec<(usize, &'static str)> = definition
        .unique_key
        .iter()
        .filter_map(|key| {
            definition
                .headers
                .iter()
                .position(|h| h == key)
                .map(|pos| (column_index[pos], *key))
        })
        .collect();

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push((index + 1, record));
    }
    if records.is_empty() {
        return Err(UploadError::NoDataRows);
    }

    if let Some(err) = records
        .par_iter()
        .find_map_first(|(row, record)| check_record(*row, record, headers.len(), &keys))
    {
        return Err(err);
    }

    let mut rows: Vec<Vec<Option<String>>> = records
        .par_iter()
        .map(|(_, record)| {
            definition
                .headers
                .iter()
                .zip(&column_index)
                .map(|(column, &index)| normalize(table, column, record.get(index).unwrap_or("")))
                .collect()
        })
        .collect();

    let mut duplicates_removed = 0;
    if !keys.is_empty() {
        let key_positions: Vec<usize> = definition
            .unique_key
            .iter()
            .filter_map(|key| definition.headers.iter().position(|h| h == key))
            .collect();
        let mut seen = HashSet::new();
        rows.retain(|row| {
            let key: Vec<Option<String>> = key_positions.iter().map(|&i| row[i].clone()).collect();
            let first = seen.insert(key);
            if !first {
                duplicates_removed += 1;
            }
            first
        });
    }

    Ok(ValidatedBatch {
        table,
        columns: definition.headers,
        rows,
        duplicates_removed,
    })
}
