//! Tabular candidate sources.
//!
//! Candidate activities arrive as CSV tables in one of two shapes: fixed
//! dates (`Title/Start/End/...`) or weekly templates
//! (`weekday/event_name/start_time/end_time/...`). Column names are
//! matched case-insensitively after trimming, and the category column is
//! recognized under the `kategorie` alias as well.

use std::path::Path;

use crate::error::SourceError;

/// Column aliases accepted for the category field.
pub const CATEGORY_ALIASES: &[&str] = &["category", "kategorie"];

/// An in-memory candidate table with normalized headers.
#[derive(Debug, Clone)]
pub struct CandidateTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CandidateTable {
    /// Build a table from raw header and row records.
    ///
    /// Headers are lowercased and trimmed so later lookups are
    /// case-insensitive.
    pub fn from_records(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        Self { headers, rows }
    }

    /// Index of a column by normalized name
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.headers.iter().position(|h| *h == name)
    }

    /// Index of the first column matching any of the given aliases
    pub fn column_any(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| self.column(alias))
    }

    /// Whether every named column is present
    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.column(name).is_some())
    }

    /// Trimmed cell value for `column_name` in row `row`; `None` when the
    /// column is missing or the cell is empty.
    pub fn get(&self, row: usize, column_name: &str) -> Option<&str> {
        let idx = self.column(column_name)?;
        self.cell(row, idx)
    }

    /// Like [`get`](Self::get), but over a list of column aliases.
    pub fn get_any(&self, row: usize, aliases: &[&str]) -> Option<&str> {
        let idx = self.column_any(aliases)?;
        self.cell(row, idx)
    }

    fn cell(&self, row: usize, idx: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(idx)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a candidate table from a CSV file.
///
/// Rows shorter or longer than the header are tolerated; cell lookups on
/// missing positions simply yield `None`. Returns `SourceError` on IO or
/// decode failure -- the occurrence generator turns that into an empty
/// batch, but direct callers (the CLI) want the cause.
pub fn load_candidates(path: impl AsRef<Path>) -> Result<CandidateTable, SourceError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| SourceError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| SourceError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(SourceError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            // One undecodable row does not poison the batch
            Err(err) => log::debug!("skipping unreadable candidate row: {err}"),
        }
    }

    Ok(CandidateTable::from_records(headers, rows))
}
