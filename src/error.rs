// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

use std::path::PathBuf;

use thiserror::Error;

/// Errors at the file-system and export edges. Parsing itself degrades to
/// sentinel records and warnings instead of failing.
#[derive(Error, Debug)]
pub enum DefError {
    #[error("failed to read DEF file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}
