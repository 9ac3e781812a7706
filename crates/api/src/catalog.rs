// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog normalization for uploaded role-catalog files.
//!
//! Each uploaded file arrives as CSV text. Row 0 is the header row;
//! headers are trimmed and blank headers are dropped together with
//! their column. Data rows whose surviving cells are all empty are
//! dropped. A malformed file aborts that file only and is reported
//! per file, so one bad export cannot sink a whole upload.

use csv::StringRecord;
use rolemap_domain::{ParsedFile, total_row_count};
use tracing::debug;

/// One uploaded catalog file, as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogFileUpload {
    /// The source file name.
    pub file_name: String,
    /// The raw CSV text.
    pub content: String,
}

/// A per-file parse failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CatalogFileError {
    /// The file that failed.
    pub file_name: String,
    /// Why it failed.
    pub error: String,
}

/// The outcome of parsing a batch of catalog files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogParseOutcome {
    /// Successfully parsed files in submission order.
    pub files: Vec<ParsedFile>,
    /// Files that could not be parsed, with reasons.
    pub file_errors: Vec<CatalogFileError>,
    /// Sum of kept data rows across all parsed files.
    pub total_rows: usize,
}

/// Parses a batch of uploaded catalog files into the uniform shape.
///
/// Files are independent: a failure in one is recorded in
/// `file_errors` and the rest of the batch proceeds.
#[must_use]
pub fn parse_catalog_files(uploads: &[CatalogFileUpload]) -> CatalogParseOutcome {
    let mut files: Vec<ParsedFile> = Vec::new();
    let mut file_errors: Vec<CatalogFileError> = Vec::new();

    for upload in uploads {
        match parse_one_file(upload) {
            Ok(parsed) => {
                debug!(
                    file_name = %parsed.file_name,
                    headers = parsed.headers.len(),
                    rows = parsed.rows.len(),
                    "Parsed catalog file"
                );
                files.push(parsed);
            }
            Err(error) => {
                debug!(file_name = %upload.file_name, %error, "Catalog file rejected");
                file_errors.push(CatalogFileError {
                    file_name: upload.file_name.clone(),
                    error,
                });
            }
        }
    }

    let total_rows: usize = total_row_count(&files);
    CatalogParseOutcome {
        files,
        file_errors,
        total_rows,
    }
}

/// Parses a single file, returning a human-readable reason on failure.
fn parse_one_file(upload: &CatalogFileUpload) -> Result<ParsedFile, String> {
    // Header handling is done by hand so blank columns can be dropped;
    // flexible mode tolerates ragged exports.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(upload.content.as_bytes());

    let mut records = reader.records();

    let header_record: StringRecord = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => return Err(format!("Failed to read header row: {e}")),
        None => return Err(String::from("File is empty")),
    };

    // Keep the positions of non-blank headers; cells under dropped
    // headers are skipped in every data row.
    let mut kept_columns: Vec<usize> = Vec::new();
    let mut headers: Vec<String> = Vec::new();
    for (idx, header) in header_record.iter().enumerate() {
        let trimmed: &str = header.trim();
        if !trimmed.is_empty() {
            kept_columns.push(idx);
            headers.push(String::from(trimmed));
        }
    }

    if headers.is_empty() {
        return Err(String::from("File has no usable column headers"));
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in records {
        let record: StringRecord = match result {
            Ok(record) => record,
            Err(e) => return Err(format!("Failed to read data row: {e}")),
        };

        let cells: Vec<String> = kept_columns
            .iter()
            .map(|&idx| record.get(idx).unwrap_or("").trim().to_string())
            .collect();

        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    Ok(ParsedFile {
        file_name: upload.file_name.clone(),
        headers,
        rows,
    })
}
