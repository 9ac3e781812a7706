// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The uniform shape one uploaded catalog file normalizes into.
///
/// Heterogeneous spreadsheets all collapse to a header row plus string
/// cells; this is the shape persisted on the upload session and read back
/// by the standardization engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFile {
    /// The source file name as submitted.
    pub file_name: String,
    /// Trimmed, non-blank column headers from row 0.
    pub headers: Vec<String>,
    /// Kept data rows, one cell per surviving header.
    pub rows: Vec<Vec<String>>,
}

impl ParsedFile {
    /// Returns the number of kept data rows in this file.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Sums the kept data rows across all parsed files.
///
/// This is the `total_rows` value stored on the upload session.
#[must_use]
pub fn total_row_count(files: &[ParsedFile]) -> usize {
    files.iter().map(ParsedFile::row_count).sum()
}
