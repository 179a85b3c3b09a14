// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

use std::fs;
use std::path::Path;

use log::info;

use super::def_parser::DefParser;
use super::DefDataset;
use crate::error::DefError;

/// File-system entry point: reads a DEF file and returns the assembled
/// dataset. The only fallible step is reading the file.
pub struct DefReader {
    parser: DefParser,
}

impl DefReader {
    pub fn new() -> Self {
        Self {
            parser: DefParser::new(),
        }
    }

    pub fn with_parser(parser: DefParser) -> Self {
        Self { parser }
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<DefDataset, DefError> {
        let path = path.as_ref();
        info!("loading DEF file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| DefError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("DEF file size: {} bytes", content.len());

        let dataset = self.parser.parse_dataset(&content);
        info!(
            "parsed {} instances, {} nets",
            dataset.id_to_instance.len(),
            dataset.id_to_net.len()
        );
        Ok(dataset)
    }
}

impl Default for DefReader {
    fn default() -> Self {
        Self::new()
    }
}
