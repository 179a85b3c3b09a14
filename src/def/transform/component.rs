// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

//! Component record formatter
//!
//! Token shape of a COMPONENTS entry:
//!
//! ```text
//! - instName cellName + PLACED ( x y ) N + FEATURE value1 value2 ...
//! ```

use std::collections::HashMap;

use log::warn;

use super::{CarriesRawLines, RecordFormatter};
use crate::def::{ComponentRecord, Coord, FeatureValue, Placement};

const PLACEMENT_KEYWORDS: [&str; 3] = ["PLACED", "FIXED", "COVER"];

impl CarriesRawLines for ComponentRecord {
    fn set_raw_lines(&mut self, lines: Vec<String>) {
        self.raw_lines = Some(lines);
    }
}

pub struct ComponentFormatter;

impl RecordFormatter for ComponentFormatter {
    type Record = ComponentRecord;

    fn format(&self, tokens: &[String]) -> ComponentRecord {
        if tokens.len() < 3 {
            warn!("invalid component entry, expected `- name cell ...`: {tokens:?}");
            return ComponentRecord {
                instance_name: "UNKNOWN".to_string(),
                cell_name: "UNKNOWN".to_string(),
                features: HashMap::new(),
                placement: None,
                raw_lines: None,
            };
        }

        let instance_name = tokens[1].clone();
        let cell_name = tokens[2].clone();
        let features = collect_features(&tokens[3..]);
        let placement = extract_placement(&features);

        ComponentRecord {
            instance_name,
            cell_name,
            features,
            placement,
            raw_lines: None,
        }
    }
}

/// Collect `+ NAME value...` runs. Each feature owns every token up to the
/// next `+ ` token; a single value stays a Scalar, several become a Multi.
fn collect_features(tokens: &[String]) -> HashMap<String, FeatureValue> {
    let mut features = HashMap::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some(name) = tokens[i].strip_prefix("+ ") else {
            i += 1;
            continue;
        };
        let mut values = Vec::new();
        i += 1;
        while i < tokens.len() && !tokens[i].starts_with("+ ") {
            values.push(tokens[i].clone());
            i += 1;
        }
        let value = if values.len() == 1 {
            FeatureValue::Scalar(values.pop().unwrap_or_default())
        } else {
            FeatureValue::Multi(values)
        };
        features.insert(name.to_string(), value);
    }

    features
}

/// Check PLACED, FIXED, COVER in priority order; the first key present
/// decides, even when its value yields no placement.
fn extract_placement(features: &HashMap<String, FeatureValue>) -> Option<Placement> {
    let value = PLACEMENT_KEYWORDS
        .iter()
        .find_map(|keyword| features.get(*keyword))?;

    match value {
        FeatureValue::Scalar(text) if text.starts_with('(') => {
            placement_from_coords(text, "N")
        }
        FeatureValue::Multi(values) if values.len() >= 2 => {
            placement_from_coords(&values[0], &values[1])
        }
        _ => None,
    }
}

/// Parse `( x y )` text. Integer parse failures keep the raw strings so the
/// record survives.
fn placement_from_coords(coords_text: &str, orientation: &str) -> Option<Placement> {
    let cleaned = coords_text.trim_matches(|c| c == '(' || c == ')' || c == ' ');
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let parse = |part: &str| match part.parse::<i64>() {
        Ok(v) => Coord::Db(v),
        Err(_) => {
            warn!("non-integer placement coordinate kept as text: {part}");
            Coord::Raw(part.to_string())
        }
    };

    Some(Placement {
        x: parse(parts[0]),
        y: parse(parts[1]),
        orientation: orientation.to_string(),
    })
}
