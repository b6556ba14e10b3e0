use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of data rows kept in a [`CsvPreview`].
pub const PREVIEW_ROW_LIMIT: usize = 5;

/// Header plus the first few data rows of a user-selected CSV file.
///
/// The preview is only ever rendered; the upload sends the original file bytes,
/// so the naive comma splitting used here (quoted commas are not respected)
/// never affects what the server receives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CsvPreview {
    pub header: Vec<String>,
    /// At most [`PREVIEW_ROW_LIMIT`] rows.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Nothing but whitespace in the file.
    Empty,
    /// The file could not be read as text.
    Unreadable(String),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Empty => write!(f, "CSV file is empty"),
            ParseFailure::Unreadable(reason) => write!(f, "CSV file could not be read: {}", reason),
        }
    }
}

impl std::error::Error for ParseFailure {}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}

/// Builds a preview from raw CSV text.
///
/// Line 0 becomes the header; the next non-blank lines, up to
/// [`PREVIEW_ROW_LIMIT`], become the rows. Lines are split on a literal comma.
pub fn parse_preview(csv_text: &str) -> Result<CsvPreview, ParseFailure> {
    let trimmed = csv_text.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let mut lines = trimmed
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = match lines.next() {
        Some(line) => split_cells(line),
        None => return Err(ParseFailure::Empty),
    };

    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .take(PREVIEW_ROW_LIMIT)
        .map(split_cells)
        .collect();

    Ok(CsvPreview { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_with_rows(n: usize) -> String {
        let mut text = String::from("rollno,name");
        for i in 0..n {
            text.push_str(&format!("\n{},Student {}", i, i));
        }
        text
    }

    #[test]
    fn row_count_is_capped_at_five() {
        for n in 0..9 {
            let preview = parse_preview(&csv_with_rows(n)).unwrap();
            assert_eq!(preview.rows.len(), n.min(PREVIEW_ROW_LIMIT), "{} data rows", n);
            assert_eq!(preview.header, vec!["rollno", "name"]);
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "a,b\n\n1,2\n   \n3,4\r\n\r\n5,6\n";
        let preview = parse_preview(text).unwrap();
        assert_eq!(
            preview.rows,
            vec![vec!["1", "2"], vec!["3", "4"], vec!["5", "6"]]
        );
    }

    #[test]
    fn blank_lines_do_not_count_towards_the_limit() {
        let text = "h\n1\n\n2\n\n3\n\n4\n\n5\n\n6";
        let preview = parse_preview(text).unwrap();
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.rows[4], vec!["5"]);
    }

    #[test]
    fn whitespace_only_text_is_a_failure() {
        assert_eq!(parse_preview(""), Err(ParseFailure::Empty));
        assert_eq!(parse_preview(" \n\t\r\n "), Err(ParseFailure::Empty));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let preview = parse_preview("  rollno,name,program\n").unwrap();
        assert_eq!(preview.header, vec!["rollno", "name", "program"]);
        assert!(preview.rows.is_empty());
    }

    #[test]
    fn quoted_commas_are_split_naively() {
        let preview = parse_preview("year,departments\n2023,\"CSE, ECE, ME\"").unwrap();
        assert_eq!(preview.rows[0], vec!["2023", "\"CSE", " ECE", " ME\""]);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let preview = parse_preview("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(preview.header, vec!["a", "b"]);
        assert_eq!(preview.rows, vec![vec!["1", "2"]]);
    }
}
