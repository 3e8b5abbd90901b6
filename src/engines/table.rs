use super::{InMemoryColumn, LOG_TARGET};
use crate::Result;
use camino::Utf8Path;
use csv::{Reader, StringRecord};
use ohno::{EnrichableExt, IntoAppError, app_err, bail};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read as IoRead;

/// Cell spellings read as null.
const NULL_MARKERS: &[&str] = &["", "nan", "na", "null"];

/// A set of equally long in-memory columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryTable {
    columns: Vec<InMemoryColumn>,
}

impl InMemoryTable {
    /// # Errors
    ///
    /// Fails if column names repeat or columns differ in length.
    pub fn new(columns: Vec<InMemoryColumn>) -> Result<Self> {
        let mut names = HashSet::new();
        for column in &columns {
            if !names.insert(column.name()) {
                bail!("duplicate column '{}'", column.name());
            }
        }

        if let Some(first) = columns.first()
            && let Some(other) = columns.iter().find(|c| c.len() != first.len())
        {
            bail!(
                "column '{}' has {} rows but column '{}' has {}",
                other.name(),
                other.len(),
                first.name(),
                first.len()
            );
        }

        Ok(Self { columns })
    }

    /// Load a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or parsed.
    pub fn from_csv_path(path: &Utf8Path) -> Result<Self> {
        let file = File::open(path).into_app_err_with(|| format!("opening CSV file '{path}'"))?;
        Self::from_csv_reader(file).map_err(|e| e.enrich_with(|| format!("loading CSV file '{path}'")))
    }

    /// Load CSV data with a header row.
    ///
    /// Empty cells and `NaN`, `NA`, `null` (any case) are nulls; every other
    /// cell must parse as a number.
    ///
    /// # Errors
    ///
    /// Fails on malformed CSV or a cell that is neither null nor numeric.
    pub fn from_csv_reader(reader: impl IoRead) -> Result<Self> {
        let mut reader = Reader::from_reader(reader);
        let headers = reader.headers().into_app_err("reading CSV header")?.clone();
        let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];
        let mut record = StringRecord::new();
        let mut row = 0_usize;

        while reader.read_record(&mut record).into_app_err("reading CSV record")? {
            row += 1;
            for ((header, cell), column) in headers.iter().zip(record.iter()).zip(values.iter_mut()) {
                column.push(parse_cell(cell).ok_or_else(|| app_err!("column '{header}' row {row}: cannot parse '{cell}' as a number"))?);
            }
        }

        log::debug!(target: LOG_TARGET, "Loaded {} columns with {row} rows from CSV", headers.len());

        Self::new(
            headers
                .iter()
                .zip(values)
                .map(|(header, values)| InMemoryColumn::new(header, values))
                .collect(),
        )
    }

    /// # Errors
    ///
    /// Fails if no column has this name.
    pub fn column(&self, name: &str) -> Result<&InMemoryColumn> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| app_err!("unknown column '{name}'"))
    }

    #[must_use]
    pub fn columns(&self) -> &[InMemoryColumn] {
        &self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, InMemoryColumn::len)
    }

    /// Copy of rows `start..end` of every column.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.slice(start, end)).collect(),
        }
    }
}

/// `Some(None)` for a null cell, `Some(Some(v))` for a number, `None` if unparseable.
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    let trimmed = cell.trim();
    if NULL_MARKERS.iter().any(|marker| trimmed.eq_ignore_ascii_case(marker)) {
        return Some(None);
    }
    trimmed.parse::<f64>().ok().map(Some)
}
