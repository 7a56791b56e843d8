// SPDX-License-Identifier: MIT
//!
//! Read glossary rows from .csv or .xlsx
//!

use crate::error::{Error, Result};

/// Language column header
const HEADER: &str = "Language";

/// Number of semantic columns
const COLUMNS: usize = 7;

/// One data row of the glossary spreadsheet, cells trimmed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// Source line (CSV) or row number (xlsx)
    pub line: u64,
    pub language: String,
    pub label: String,
    pub definition: String,
    pub alt_labels: String,
    pub related: String,
    pub source: String,
    pub modified: String,
}

impl Record {
    /// Build record from raw cells
    ///
    /// Returns None for the header row and for blank padding rows.
    /// Older tables have an unused leading ID column, it is dropped.
    pub fn from_cells<S: AsRef<str>>(cells: Vec<S>, line: u64) -> Result<Option<Self>> {
        let mut cells: Vec<String> = cells
            .iter()
            .map(|cell| cell.as_ref().trim().to_string())
            .collect();

        if cells.iter().all(|cell| cell.is_empty()) {
            log::trace!("line {}: blank row", line);
            return Ok(None);
        }

        let found = cells.len();
        if found == COLUMNS + 1 {
            cells.remove(0);
        }

        if cells.first().map(|c| c.as_str()) == Some(HEADER) {
            log::trace!("line {}: header row", line);
            return Ok(None);
        }

        let fields: [String; COLUMNS] = cells
            .try_into()
            .map_err(|_| Error::MalformedRow { line, found })?;
        let [language, label, definition, alt_labels, related, source, modified] = fields;

        Ok(Some(Self {
            line,
            language,
            label,
            definition,
            alt_labels,
            related,
            source,
            modified,
        }))
    }
}

/// Lazily read records from CSV text
pub fn read_csv<R: std::io::Read>(reader: R) -> impl Iterator<Item = Result<Record>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .filter_map(|row| match row {
            Ok(row) => {
                let line = row.position().map_or(0, |pos| pos.line());
                Record::from_cells(row.iter().collect(), line).transpose()
            }
            Err(err) => Some(Err(err.into())),
        })
}

/// Read records from the first sheet of .xlsx workbook
pub fn read_xlsx<P: AsRef<std::path::Path>>(xlsx_path: P) -> Result<Vec<Record>> {
    let book = umya_spreadsheet::reader::xlsx::read(xlsx_path.as_ref())
        .map_err(|e| Error::Xlsx(format!("{:?}", e)))?;
    let sheet = book
        .get_sheet_collection()
        .first()
        .ok_or_else(|| Error::Xlsx("workbook has no sheet".to_string()))?;

    let max_col = sheet.get_highest_column();
    let max_row = sheet.get_highest_row();
    log::debug!(
        "Read {:?}: {} columns x {} rows",
        xlsx_path.as_ref(),
        max_col,
        max_row
    );

    let mut records = Vec::new();
    for row in 1..=max_row {
        let cells = (1..=max_col)
            .map(|col| sheet.get_value((col, row)))
            .collect::<Vec<String>>();
        if let Some(record) = Record::from_cells(cells, row as u64)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Open glossary file, .xlsx is read as workbook, anything else as CSV
pub fn read_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Box<dyn Iterator<Item = Result<Record>>>> {
    let path = path.as_ref();
    let is_xlsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        Ok(Box::new(read_xlsx(path)?.into_iter().map(Ok)))
    } else {
        log::debug!("Read CSV {:?}", path);
        let file = std::fs::File::open(path)?;
        Ok(Box::new(read_csv(file)))
    }
}
