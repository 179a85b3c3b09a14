// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

//! Transformation pipeline for raw DEF sections
//!
//! A section transformer composes three steps over one raw section: clean
//! the head line, tokenize it, format the tokens into a typed record. A
//! block transformer maps a section transformer over every raw section of a
//! keyword block, preserving input order.

pub mod component;
pub mod net;
pub mod tokenize;

use super::extractor::RawSection;
use self::tokenize::{clean_line, normalize_line, tokenize};

/// Converts one token sequence into a typed record.
///
/// The formatter for a keyword block is chosen once, at transformer
/// construction time; records degrade to sentinels on malformed input
/// instead of failing.
pub trait RecordFormatter {
    type Record: CarriesRawLines;

    fn format(&self, tokens: &[String]) -> Self::Record;
}

/// Records that can carry the original physical lines of their entry.
/// Diagnostics only, never consulted by parse decisions.
pub trait CarriesRawLines {
    fn set_raw_lines(&mut self, lines: Vec<String>);
}

/// Head-line cleaning variant, fixed per keyword block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCleaner {
    /// Strip one trailing `;` plus surrounding whitespace.
    StripTerminator,
    /// Trim only; the multi-line extractor already removed the terminator.
    Passthrough,
}

impl LineCleaner {
    pub fn clean<'a>(&self, line: &'a str) -> &'a str {
        match self {
            LineCleaner::StripTerminator => clean_line(line),
            LineCleaner::Passthrough => normalize_line(line),
        }
    }
}

/// Clean → tokenize → format over one raw section.
pub struct SectionTransformer<F: RecordFormatter> {
    cleaner: LineCleaner,
    formatter: F,
}

impl<F: RecordFormatter> SectionTransformer<F> {
    pub fn new(cleaner: LineCleaner, formatter: F) -> Self {
        Self { cleaner, formatter }
    }

    pub fn transform(&self, section: &RawSection) -> F::Record {
        let head = self.cleaner.clean(&section.head_text);
        let tokens = tokenize(head);
        let mut record = self.formatter.format(&tokens);
        if let Some(raw) = &section.raw_content {
            record.set_raw_lines(raw.clone());
        }
        record
    }
}

/// Applies a section transformer to every raw section of a block. Sections
/// are independent; output order matches input order.
pub struct BlockTransformer<F: RecordFormatter> {
    section: SectionTransformer<F>,
}

impl<F: RecordFormatter> BlockTransformer<F> {
    pub fn new(cleaner: LineCleaner, formatter: F) -> Self {
        Self {
            section: SectionTransformer::new(cleaner, formatter),
        }
    }

    pub fn transform(&self, sections: &[RawSection]) -> Vec<F::Record> {
        sections
            .iter()
            .map(|section| self.section.transform(section))
            .collect()
    }
}

/// COMPONENTS transformer. Heads come pre-joined and pre-stripped from the
/// multi-line extractor.
pub fn component_block_transformer() -> BlockTransformer<component::ComponentFormatter> {
    BlockTransformer::new(LineCleaner::Passthrough, component::ComponentFormatter)
}

/// NETS transformer for files whose net entries fit on one physical line.
pub fn net_block_transformer() -> BlockTransformer<net::NetFormatter> {
    BlockTransformer::new(LineCleaner::StripTerminator, net::NetFormatter)
}

/// Multi-line-aware NETS transformer.
pub fn multiline_net_block_transformer() -> BlockTransformer<net::MultiLineNetFormatter> {
    BlockTransformer::new(LineCleaner::Passthrough, net::MultiLineNetFormatter)
}
