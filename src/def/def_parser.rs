// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

//! File orchestration
//!
//! One pass over the file: each logical line is routed by its leading
//! keyword to the matching block extractor, accumulated raw blocks are
//! transformed after the scan, and the records are assembled into the
//! id-indexed dataset. Parsing never aborts on malformed content; degraded
//! entries surface as sentinel records and log warnings.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use nom::{
    bytes::complete::{tag, take, take_while1},
    character::complete::{anychar, char, digit1, space1},
    sequence::delimited,
    IResult, Parser,
};

use super::extractor::{self, RawSection};
use super::transform::{component_block_transformer, multiline_net_block_transformer};
use super::{DefContent, DefDataset, HeaderInfo, InstanceInfo, NetInfo, Units};

/// Single-line header statements.
const HEADER_KEYWORDS: [&str; 7] = [
    "VERSION",
    "NAMESCASESENSITIVE",
    "DIVIDERCHAR",
    "BUSBITCHARS",
    "DESIGN",
    "TECHNOLOGY",
    "UNITS",
];

/// Self-terminating statements that may repeat.
const NO_END_KEYWORDS: [&str; 4] = ["DIEAREA", "ROW", "TRACKS", "GCELLGRID"];

/// Blocks running up to a matching `END <keyword>` marker.
const TERMINATED_KEYWORDS: [&str; 16] = [
    "PROPERTYDEFINITIONS",
    "VIAS",
    "STYLES",
    "NONDEFAULTRULES",
    "REGIONS",
    "COMPONENTS",
    "PINS",
    "PINPROPERTIES",
    "BLOCKAGES",
    "SPECIALNETS",
    "NETS",
    "SCANCHAINS",
    "GROUPS",
    "SLOTS",
    "FILLS",
    "BEGINEXT",
];

/// Terminated blocks whose entries span several physical lines.
const MULTILINE_KEYWORDS: [&str; 2] = ["COMPONENTS", "NETS"];

/// Instance name marking a connection to an external port.
const EXTERNAL_PIN_MARKER: &str = "PIN";

/// Routes DEF sections to extractors and transformers.
///
/// Only the sections named in `required` are transformed into records; the
/// raw text of every recognized section is collected either way.
pub struct DefParser {
    required: Vec<String>,
}

impl DefParser {
    pub fn new() -> Self {
        Self {
            required: vec!["COMPONENTS".to_string(), "NETS".to_string()],
        }
    }

    pub fn with_required(mut self, required: &[&str]) -> Self {
        self.required = required.iter().map(|s| s.to_string()).collect();
        self
    }

    fn requires(&self, keyword: &str) -> bool {
        self.required.iter().any(|k| k == keyword)
    }

    /// Parse DEF text into structured component/net records plus header
    /// attributes. Total: malformed content degrades, it never errors.
    pub fn parse_content(&self, content: &str) -> DefContent {
        let mut header_blocks: HashMap<String, String> = HashMap::new();
        let mut statement_blocks: HashMap<String, Vec<String>> = HashMap::new();
        let mut section_blocks: HashMap<String, Vec<RawSection>> = HashMap::new();

        let mut lines = content.lines();
        while let Some(line) = lines.next() {
            let Some(prefix) = line.split_whitespace().next() else {
                continue;
            };
            if prefix.starts_with('#') {
                continue;
            }

            if HEADER_KEYWORDS.contains(&prefix) {
                let text = extractor::header_statement(&mut lines, line);
                header_blocks.insert(prefix.to_string(), text);
            } else if NO_END_KEYWORDS.contains(&prefix) {
                let text = extractor::single_statement(&mut lines, line);
                statement_blocks
                    .entry(prefix.to_string())
                    .or_default()
                    .push(text);
            } else if TERMINATED_KEYWORDS.contains(&prefix) {
                let sections = if MULTILINE_KEYWORDS.contains(&prefix) {
                    extractor::multiline_terminated_block(&mut lines, prefix)
                } else {
                    extractor::terminated_block(&mut lines, prefix)
                };
                section_blocks.insert(prefix.to_string(), sections);
            } else {
                debug!("unknown DEF prefix: {prefix}");
            }
        }

        let mut found: Vec<&String> = header_blocks
            .keys()
            .chain(statement_blocks.keys())
            .chain(section_blocks.keys())
            .collect();
        found.sort();
        info!("found DEF sections: {found:?}");

        let header = extract_header(&header_blocks);

        let components = if self.requires("COMPONENTS") {
            match section_blocks.get("COMPONENTS") {
                Some(sections) => {
                    let records = component_block_transformer().transform(sections);
                    info!("parsed {} components", records.len());
                    records
                }
                None => {
                    warn!("COMPONENTS section not found in DEF file");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let nets = if self.requires("NETS") {
            match section_blocks.get("NETS") {
                Some(sections) => {
                    let records = multiline_net_block_transformer().transform(sections);
                    info!("parsed {} nets", records.len());
                    records
                }
                None => {
                    info!("no NETS section in DEF file (normal for placement-only files)");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        DefContent {
            components,
            nets,
            header,
        }
    }

    /// Parse and assemble the final id-indexed dataset.
    pub fn parse_dataset(&self, content: &str) -> DefDataset {
        build_dataset(self.parse_content(content))
    }
}

impl Default for DefParser {
    fn default() -> Self {
        Self::new()
    }
}

fn version_value(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("VERSION")(input)?;
    let (input, _) = space1(input)?;
    take_while1(|c: char| c.is_ascii_digit() || c == '.')(input)
}

fn design_value(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("DESIGN")(input)?;
    let (input, _) = space1(input)?;
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn technology_value(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("TECHNOLOGY")(input)?;
    let (input, _) = space1(input)?;
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn units_value(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("UNITS")(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("DISTANCE")(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("MICRONS")(input)?;
    let (input, _) = space1(input)?;
    digit1(input)
}

fn dividerchar_value(input: &str) -> IResult<&str, char> {
    let (input, _) = tag("DIVIDERCHAR")(input)?;
    let (input, _) = space1(input)?;
    delimited(char('"'), anychar, char('"')).parse(input)
}

fn busbitchars_value(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("BUSBITCHARS")(input)?;
    let (input, _) = space1(input)?;
    delimited(char('"'), take(2usize), char('"')).parse(input)
}

/// Extract header attributes from the accumulated header statements.
/// UNITS absent and UNITS unparsable both fall back to the 1000 default;
/// only the log message differs.
fn extract_header(blocks: &HashMap<String, String>) -> HeaderInfo {
    let mut header = HeaderInfo::default();

    if let Some(line) = blocks.get("VERSION") {
        if let Ok((_, value)) = version_value(line.trim_start()) {
            header.version = Some(value.to_string());
        }
    }
    if let Some(line) = blocks.get("DESIGN") {
        if let Ok((_, value)) = design_value(line.trim_start()) {
            header.design = Some(value.to_string());
        }
    }
    if let Some(line) = blocks.get("TECHNOLOGY") {
        if let Ok((_, value)) = technology_value(line.trim_start()) {
            header.technology = Some(value.to_string());
        }
    }

    match blocks.get("UNITS") {
        Some(line) => match units_value(line.trim_start())
            .ok()
            .and_then(|(_, digits)| digits.parse::<i64>().ok())
        {
            Some(value) => {
                info!("UNITS: {value} database units per micron");
                header.units = Units::parsed(value);
            }
            None => {
                warn!("failed to parse UNITS DISTANCE MICRONS value");
                header.units = Units::default();
            }
        },
        None => {
            warn!(
                "no UNITS in DEF file, using default ({})",
                Units::DEFAULT_DB_PER_MICRON
            );
            header.units = Units::default();
        }
    }

    if let Some(line) = blocks.get("DIVIDERCHAR") {
        if let Ok((_, value)) = dividerchar_value(line.trim_start()) {
            header.dividerchar = Some(value);
        }
    }
    if let Some(line) = blocks.get("BUSBITCHARS") {
        if let Ok((_, value)) = busbitchars_value(line.trim_start()) {
            header.busbitchars = Some(value.to_string());
        }
    }

    header
}

/// Assemble the id-indexed dataset from parsed records.
///
/// Ids follow file order. A repeated instance or net name keeps only its
/// last occurrence in both the name map and the id map, so the two always
/// agree. Nets whose connection count before PIN filtering is exactly one
/// are dangling and dropped from the id map.
pub fn build_dataset(content: DefContent) -> DefDataset {
    let DefContent {
        components,
        nets,
        header,
    } = content;

    let mut instance_to_id = HashMap::with_capacity(components.len());
    let mut id_to_instance = BTreeMap::new();
    for (id, component) in components.iter().enumerate() {
        if let Some(previous) = instance_to_id.insert(component.instance_name.clone(), id) {
            warn!(
                "duplicate instance name {}, keeping last occurrence",
                component.instance_name
            );
            id_to_instance.remove(&previous);
        }
        id_to_instance.insert(
            id,
            InstanceInfo {
                instance_name: component.instance_name.clone(),
                cell_name: component.cell_name.clone(),
                placement: component.placement.clone(),
            },
        );
    }

    let mut net_to_id = HashMap::with_capacity(nets.len());
    let mut id_to_net = BTreeMap::new();
    for (id, net) in nets.iter().enumerate() {
        if let Some(previous) = net_to_id.insert(net.net_name.clone(), id) {
            warn!(
                "duplicate net name {}, keeping last occurrence",
                net.net_name
            );
            id_to_net.remove(&previous);
        }
        let connections = net
            .connections
            .iter()
            .filter(|connection| connection.instance_name != EXTERNAL_PIN_MARKER)
            .cloned()
            .collect();
        id_to_net.insert(
            id,
            NetInfo {
                net_name: net.net_name.clone(),
                connections,
            },
        );
    }

    // The prune predicate uses the connection count before PIN filtering.
    // The id list is materialized once so removal cannot skip a candidate.
    let ids: Vec<usize> = id_to_net.keys().copied().collect();
    for id in ids {
        if nets[id].connections.len() == 1 {
            id_to_net.remove(&id);
        }
    }

    info!(
        "dataset: {} instances, {} nets after dangling-net pruning",
        id_to_instance.len(),
        id_to_net.len()
    );

    DefDataset {
        instance_to_id,
        id_to_instance,
        net_to_id,
        id_to_net,
        header,
    }
}
