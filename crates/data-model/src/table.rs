//! CSV tables of per-frame metrics.
//!
//! Tables are loaded once and never mutated. The header order is kept
//! because column eligibility follows first-seen order.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracksync_common::error::{TracksyncError, TracksyncResult};

use crate::row::{FieldValue, Row};

/// Delimiters tried when sniffing the header line.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// An immutable, header-ordered collection of rows.
#[derive(Debug, Clone)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Row>,
    source_path: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl DataTable {
    /// Build a table directly from rows (used by tests and synthetic data).
    pub fn from_rows(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            headers,
            rows,
            source_path: None,
            loaded_at: Utc::now(),
        }
    }

    /// Parse delimited text with a header line.
    ///
    /// The delimiter is sniffed from the header. Blank lines are skipped,
    /// short records leave their trailing fields missing, and cells are
    /// trimmed before typing.
    pub fn parse(text: &str) -> TracksyncResult<Self> {
        let delimiter = sniff_delimiter(text.lines().find(|l| !l.trim().is_empty()).unwrap_or(""));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if let Some(dup) = first_duplicate(&headers) {
            return Err(TracksyncError::data(format!(
                "duplicate column name '{dup}' in header"
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) && record.len() <= 1 {
                continue;
            }
            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = record.get(i).map_or(FieldValue::Missing, FieldValue::parse);
                    (name.clone(), value)
                })
                .collect();
            rows.push(row);
        }

        tracing::debug!(
            rows = rows.len(),
            columns = headers.len(),
            delimiter = %(delimiter as char).escape_default(),
            "Parsed table"
        );

        Ok(Self::from_rows(headers, rows))
    }

    /// Read and parse a CSV file.
    pub fn load(path: &Path) -> TracksyncResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                TracksyncError::unsupported(format!("{} is not UTF-8 text", path.display()))
            } else {
                TracksyncError::from_io_at(e, path)
            }
        })?;
        let mut table = Self::parse(&text)?;
        table.source_path = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "Loaded table"
        );
        Ok(table)
    }

    /// Field names in header order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Coerced values of `name` for every row, NaN where not numeric.
    pub fn numbers(&self, name: &str) -> Vec<f64> {
        self.rows.iter().map(|row| row.number(name)).collect()
    }
}

fn first_duplicate(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .enumerate()
        .find(|(i, h)| !h.is_empty() && headers[..*i].contains(*h))
        .map(|(_, h)| h.as_str())
}

/// Pick the candidate delimiter that occurs most often in the header line.
fn sniff_delimiter(header_line: &str) -> u8 {
    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .map(|d| (d, header_line.bytes().filter(|b| *b == d).count()))
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map_or(b',', |(d, _)| d)
}
