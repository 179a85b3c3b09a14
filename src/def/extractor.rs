// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

//! Raw block extraction
//!
//! These routines consume lines from the file cursor on behalf of the
//! orchestrator: single-statement extraction joins physical lines until the
//! `;` terminator, block extraction consumes everything up to the matching
//! `END <keyword>` marker. They know where a block or entry terminates;
//! interpreting the content is left to the transform layer.

use std::str::Lines;

use super::transform::tokenize::clean_line;

/// One raw entry of a keyword block, not yet tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    /// The entry's statement text. The multi-line extractor joins the
    /// entry's lines and strips the terminator; the plain extractor keeps
    /// the head line untouched.
    pub head_text: String,
    /// Continuation lines following a `-` head in a plain terminated block.
    /// Head-line parsing covers the supported keywords, so these are
    /// retained but not interpreted.
    pub property_lines: Vec<String>,
    /// Original physical lines of a multi-line entry, for diagnostics.
    pub raw_content: Option<Vec<String>>,
}

impl RawSection {
    pub fn from_head(head_text: &str) -> Self {
        Self {
            head_text: head_text.to_string(),
            property_lines: Vec::new(),
            raw_content: None,
        }
    }
}

/// `- name ...` starts a new entry; a bare `-` run inside a value does not.
fn is_entry_start(line: &str) -> bool {
    line.starts_with('-')
        && line.len() > 1
        && line.chars().nth(1).is_some_and(|c| c.is_whitespace())
}

fn is_end_marker(line: &str, keyword: &str) -> bool {
    line.strip_prefix("END")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .is_some_and(|rest| rest.trim() == keyword)
}

/// Join physical lines until the statement terminator appears.
fn statement_text(lines: &mut Lines<'_>, first_line: &str) -> String {
    let mut text = first_line.trim().to_string();
    while !text.contains(';') {
        let Some(line) = lines.next() else { break };
        text.push(' ');
        text.push_str(line.trim());
    }
    text
}

/// Extract one single-line header statement (VERSION, DESIGN, UNITS, ...).
pub fn header_statement(lines: &mut Lines<'_>, first_line: &str) -> String {
    statement_text(lines, first_line)
}

/// Extract one self-terminating statement (DIEAREA, ROW, TRACKS, ...).
pub fn single_statement(lines: &mut Lines<'_>, first_line: &str) -> String {
    statement_text(lines, first_line)
}

/// Consume a terminated block up to `END <keyword>`. Each `-` head opens an
/// entry; following non-head lines are collected as its property lines.
pub fn terminated_block(lines: &mut Lines<'_>, keyword: &str) -> Vec<RawSection> {
    let mut sections = Vec::new();
    let mut current: Option<RawSection> = None;

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if is_end_marker(trimmed, keyword) {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        if is_entry_start(trimmed) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(RawSection::from_head(trimmed));
        } else if let Some(section) = current.as_mut() {
            section.property_lines.push(trimmed.to_string());
        } else {
            sections.push(RawSection::from_head(trimmed));
        }
    }

    if let Some(section) = current.take() {
        sections.push(section);
    }
    sections
}

/// Consume a terminated block whose entries may span several physical
/// lines. Entries split on a leading `-` at statement start; each entry is
/// joined into one cleaned head line, keeping the original lines alongside.
pub fn multiline_terminated_block(lines: &mut Lines<'_>, keyword: &str) -> Vec<RawSection> {
    fn flush(head: &mut String, raw: &mut Vec<String>, sections: &mut Vec<RawSection>) {
        if head.is_empty() {
            return;
        }
        sections.push(RawSection {
            head_text: clean_line(head).to_string(),
            property_lines: Vec::new(),
            raw_content: Some(std::mem::take(raw)),
        });
        head.clear();
    }

    let mut sections = Vec::new();
    let mut head = String::new();
    let mut raw: Vec<String> = Vec::new();

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if is_end_marker(trimmed, keyword) {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        if is_entry_start(trimmed) {
            flush(&mut head, &mut raw, &mut sections);
            head.push_str(trimmed);
            raw.push(line.to_string());
        } else if !head.is_empty() {
            head.push(' ');
            head.push_str(trimmed);
            raw.push(line.to_string());
        }
    }

    flush(&mut head, &mut raw, &mut sections);
    sections
}
