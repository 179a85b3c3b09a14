// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

//! Net record formatters
//!
//! Token shape of a NETS entry:
//!
//! ```text
//! - netName ( instName pinName ) ( PIN portName ) + USE SIGNAL + WEIGHT 5
//! ```
//!
//! The multi-line-aware formatter stops treating parenthesized groups as
//! connections once the first `+ NAME` property appears. The simple variant
//! exists for files without multi-line NET entries and takes every
//! parenthesized token as a connection.

use log::warn;

use super::{CarriesRawLines, RecordFormatter};
use crate::def::{NetConnection, NetProperty, NetRecord};

impl CarriesRawLines for NetRecord {
    fn set_raw_lines(&mut self, lines: Vec<String>) {
        self.raw_lines = Some(lines);
    }
}

fn sentinel_net() -> NetRecord {
    NetRecord {
        net_name: "UNKNOWN".to_string(),
        connections: Vec::new(),
        properties: Vec::new(),
        raw_lines: None,
    }
}

/// Parse a `( instName pinName )` group token. Malformed groups are skipped
/// so the rest of the net survives.
fn connection_from_group(token: &str) -> Option<NetConnection> {
    let cleaned = token.trim_matches(|c| c == '(' || c == ')' || c == ' ');
    let mut parts = cleaned.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(instance), Some(pin)) => Some(NetConnection::new(instance, pin)),
        _ => {
            warn!("invalid net connection group: {token}");
            None
        }
    }
}

fn is_group(token: &str) -> bool {
    token.starts_with('(') && token.ends_with(')')
}

/// Multi-line-aware NETS formatter.
pub struct MultiLineNetFormatter;

impl RecordFormatter for MultiLineNetFormatter {
    type Record = NetRecord;

    fn format(&self, tokens: &[String]) -> NetRecord {
        if tokens.len() < 2 {
            warn!("invalid net entry, expected `- name ...`: {tokens:?}");
            return sentinel_net();
        }

        let net_name = tokens[1].clone();
        let mut connections = Vec::new();
        let mut properties = Vec::new();

        let mut i = 2;
        let mut property_start = false;

        while i < tokens.len() {
            let token = &tokens[i];

            if is_group(token) && !property_start {
                if let Some(connection) = connection_from_group(token) {
                    connections.push(connection);
                }
                i += 1;
            } else if let Some(name) = token.strip_prefix("+ ") {
                // From the first property on, groups are property values,
                // never connections.
                property_start = true;
                let value = tokens
                    .get(i + 1)
                    .filter(|next| !next.starts_with('+') && !next.starts_with('('))
                    .cloned();
                i += if value.is_some() { 2 } else { 1 };
                properties.push(NetProperty {
                    name: name.to_string(),
                    value,
                });
            } else {
                i += 1;
            }
        }

        NetRecord {
            net_name,
            connections,
            properties,
            raw_lines: None,
        }
    }
}

/// Single-line NETS formatter: every parenthesized token is a connection,
/// properties are ignored.
pub struct NetFormatter;

impl RecordFormatter for NetFormatter {
    type Record = NetRecord;

    fn format(&self, tokens: &[String]) -> NetRecord {
        if tokens.len() < 2 {
            warn!("invalid net entry, expected `- name ...`: {tokens:?}");
            return sentinel_net();
        }

        let net_name = tokens[1].clone();
        let connections = tokens[2..]
            .iter()
            .filter(|token| is_group(token))
            .filter_map(|token| connection_from_group(token))
            .collect();

        NetRecord {
            net_name,
            connections,
            properties: Vec::new(),
            raw_lines: None,
        }
    }
}
