//! XLSX attendee file parsing
//!
//! Reads the first worksheet of a workbook: row 0 is the header row, every
//! later row becomes an ordered (header, value) record. Headers are trimmed,
//! lowercased and passed through a fixed alias table before use as field
//! keys.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use log::info;

/// Spreadsheet headers mapped onto the platform's canonical field names.
const HEADER_ALIASES: [(&str, &str); 10] = [
    ("firstname", "prenom"),
    ("first_name", "prenom"),
    ("prénom", "prenom"),
    ("lastname", "nom"),
    ("last_name", "nom"),
    ("barcode", "barcode_id"),
    ("mail", "email"),
    ("company", "societe"),
    ("rate", "tarif"),
    ("rate_name", "tarif"),
];

/// One attendee line: ordered mapping from normalized header to raw cell
/// value. Empty cells keep their key with an empty value.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Value for a normalized header, if the column exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All (key, value) pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parsed attendee spreadsheet.
pub struct Spreadsheet {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Spreadsheet {
    /// Open a workbook and parse its first worksheet.
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("failed to open workbook {}", path.display()))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .context("workbook has no worksheets")?
            .clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("failed to read sheet {sheet_name}"))?;

        let mut raw_rows = range.rows();
        let headers: Vec<String> = raw_rows
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| normalize_header(&cell_to_string(cell)))
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = raw_rows
            .map(|row| Row {
                fields: headers
                    .iter()
                    .cloned()
                    .zip(row.iter().map(cell_to_string))
                    .collect(),
            })
            .collect();

        info!("Parsed {} rows from {}", rows.len(), path.display());
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Trim, lowercase, then alias a raw header into its canonical field key.
pub fn normalize_header(raw: &str) -> String {
    let cleaned = raw.trim().to_lowercase();
    for (alias, canonical) in HEADER_ALIASES {
        if cleaned == alias {
            return canonical.to_string();
        }
    }
    cleaned
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
